use crate::{
    auth::AuthUser,
    dto::{
        CreateNotificationRequest, MarkAllReadResponse, MessageResponse, NotificationListParams,
        NotificationListResponse, NotificationResponse, UnreadCountResponse, paginate,
    },
    errors::ApiError,
    models::Notification,
    states::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

/// GET /api/notifications?page&limit&unreadOnly
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<NotificationListParams>,
) -> Json<NotificationListResponse> {
    let notifications = state.notifications.for_user(auth.id, params.unread_only);
    let unread_count = state.notifications.unread_count(auth.id);
    let (page, pagination) = paginate(&notifications, params.page, params.limit);
    Json(NotificationListResponse {
        notifications: page,
        unread_count,
        pagination,
    })
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<UnreadCountResponse> {
    Json(UnreadCountResponse {
        unread_count: state.notifications.unread_count(auth.id),
    })
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, ApiError> {
    let notification = state.notifications.get_owned(&id, auth.id)?;
    Ok(Json(notification))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let notification = state.notifications.mark_read(&id, auth.id)?;
    Ok(Json(NotificationResponse {
        message: "Notification marked as read".to_owned(),
        notification,
    }))
}

/// PUT /api/notifications/mark-all-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<MarkAllReadResponse> {
    let updated_count = state.notifications.mark_all_read(auth.id);
    Json(MarkAllReadResponse {
        message: "All notifications marked as read".to_owned(),
        updated_count,
    })
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notifications.delete(&id, auth.id)?;
    Ok(Json(MessageResponse {
        message: "Notification deleted successfully".to_owned(),
    }))
}

/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<NotificationResponse>), ApiError> {
    let (Some(kind), Some(from_user_id)) = (payload.kind, payload.from_user_id) else {
        return Err(ApiError::MissingFields(
            "Type, fromUserId, and content are required",
        ));
    };
    if payload.content.trim().is_empty() {
        return Err(ApiError::MissingFields(
            "Type, fromUserId, and content are required",
        ));
    }

    let from_user = state
        .users
        .get(&from_user_id)
        .ok_or(ApiError::NotFound("Sender"))?;

    let notification = Notification::new(
        auth.id,
        kind,
        from_user.snapshot(),
        payload.content,
        payload.post_id,
    );
    state.notifications.insert(notification.clone());

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse {
            message: "Notification created successfully".to_owned(),
            notification,
        }),
    ))
}
