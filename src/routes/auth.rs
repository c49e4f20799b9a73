use crate::{
    auth::{AuthUser, create_token},
    dto::{
        AuthResponse, FollowResponse, LoginRequest, ProfileResponse, RegisterRequest,
        UpdateProfileRequest, UserResponse, UsersResponse,
    },
    errors::ApiError,
    models::{Notification, NotificationKind, User},
    seed::DEMO_USERNAME,
    states::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if payload.username.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
        || payload.display_name.trim().is_empty()
    {
        return Err(ApiError::MissingFields(
            "Username, email, password, and display name are required",
        ));
    }
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if state.users.find_by_identifier(&payload.email).is_some()
        || state.users.find_by_identifier(&payload.username).is_some()
    {
        return Err(ApiError::UserAlreadyExists);
    }

    let hashed_password = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {e}")))?;

    let user = User::new(
        payload.username,
        payload.email,
        hashed_password,
        payload.display_name,
    );
    let token = create_token(&user.id, &state.jwt_secret)?;
    let response = AuthResponse {
        message: "User created successfully".to_owned(),
        token,
        user: UserResponse::from(&user),
    };

    info!("New user registered: {}", user.username);
    state.users.insert(user);

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::MissingFields("Email and password are required"));
    }

    let user = state
        .users
        .find_by_identifier(&payload.email)
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify(&payload.password, &user.hashed_password)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    state.users.touch_last_active(&user.id);
    let token = create_token(&user.id, &state.jwt_secret)?;

    info!("User logged in: {}", user.username);

    let user = state.users.get(&user.id).unwrap_or(user);
    Ok(Json(AuthResponse {
        message: "Login successful".to_owned(),
        token,
        user: UserResponse::from(&user),
    }))
}

/// POST /api/auth/quick-access
///
/// Demo convenience: hands out a token for the seeded account with no
/// credential check.
pub async fn quick_access(
    State(state): State<AppState>,
) -> Result<Json<AuthResponse>, ApiError> {
    let demo = state
        .users
        .find_by_identifier(DEMO_USERNAME)
        .ok_or_else(|| ApiError::Internal("Demo user not available".to_owned()))?;
    let token = create_token(&demo.id, &state.jwt_secret)?;

    Ok(Json(AuthResponse {
        message: "Quick access successful".to_owned(),
        token,
        user: UserResponse::from(&demo),
    }))
}

/// GET /api/auth/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get(&auth.id).ok_or(ApiError::InvalidToken)?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/profile
///
/// Partial update of mutable profile fields; identity and counts are never
/// read from the body.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .users
        .update(&auth.id, |user| {
            if let Some(display_name) = payload.display_name {
                if !display_name.trim().is_empty() {
                    user.display_name = display_name;
                }
            }
            if let Some(bio) = payload.bio {
                user.bio = bio;
            }
            if let Some(location) = payload.location {
                user.location = location;
            }
            if let Some(website) = payload.website {
                user.website = website;
            }
            if let Some(avatar) = payload.avatar {
                user.avatar = avatar;
            }
            if let Some(is_private) = payload.is_private {
                user.is_private = is_private;
            }
        })
        .ok_or(ApiError::InvalidToken)?;

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_owned(),
        user: UserResponse::from(&user),
    }))
}

/// POST /api/auth/follow/{userId}
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FollowResponse>, ApiError> {
    let (following_count, followers_count) = state.users.follow(auth.id, user_id)?;

    // Tell the target they gained a follower. A missing caller profile means
    // the token outlived the user; the edge update above would have failed
    // already in that case.
    if let Some(follower) = state.users.get(&auth.id) {
        state.notifications.insert(Notification::new(
            user_id,
            NotificationKind::Follow,
            follower.snapshot(),
            "started following you".to_owned(),
            None,
        ));
    }

    info!("User {} followed {}", auth.id, user_id);

    Ok(Json(FollowResponse {
        message: "Successfully followed user".to_owned(),
        following_count,
        followers_count,
    }))
}

/// POST /api/auth/unfollow/{userId}
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FollowResponse>, ApiError> {
    let (following_count, followers_count) = state.users.unfollow(auth.id, user_id)?;

    info!("User {} unfollowed {}", auth.id, user_id);

    Ok(Json(FollowResponse {
        message: "Successfully unfollowed user".to_owned(),
        following_count,
        followers_count,
    }))
}

/// GET /api/auth/users
pub async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    let users: Vec<UserResponse> = state.users.all().iter().map(UserResponse::from).collect();
    let count = users.len();
    Json(UsersResponse { users, count })
}
