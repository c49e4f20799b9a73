use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    MissingFields(&'static str),
    Validation(String),
    InvalidCredentials,
    InvalidAction(&'static str),
    AlreadyFollowing,
    InvalidContent,
    InvalidQuery,
    NotLive,
    UserAlreadyExists,
    Unauthorized,
    InvalidToken,
    Forbidden(&'static str),
    NotFound(&'static str),
    Internal(String),
}

/// Convert our custom errors to HTTP responses
///
/// Every error renders as `{ "error": ..., "message": ... }` so clients get a
/// uniform body regardless of which handler failed.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, err, message) = match self {
            ApiError::MissingFields(msg) => (
                StatusCode::BAD_REQUEST,
                "Missing required fields",
                msg.to_owned(),
            ),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation error", msg),
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "Invalid credentials",
                "Invalid email or password".to_owned(),
            ),
            ApiError::InvalidAction(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid action", msg.to_owned())
            }
            ApiError::AlreadyFollowing => (
                StatusCode::BAD_REQUEST,
                "Already following",
                "Already following this user".to_owned(),
            ),
            ApiError::InvalidContent => (
                StatusCode::BAD_REQUEST,
                "Invalid content",
                "Post content is required".to_owned(),
            ),
            ApiError::InvalidQuery => (
                StatusCode::BAD_REQUEST,
                "Invalid query",
                "Search query is required".to_owned(),
            ),
            ApiError::NotLive => (
                StatusCode::BAD_REQUEST,
                "Livestream not live",
                "This livestream is not currently live".to_owned(),
            ),
            ApiError::UserAlreadyExists => (
                StatusCode::BAD_REQUEST,
                "User already exists",
                "User with this email or username already exists".to_owned(),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "Access token is required".to_owned(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid token",
                "Invalid or expired token".to_owned(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "Forbidden", msg.to_owned()),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "Not found",
                format!("{what} does not exist"),
            ),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "Internal server error".to_owned(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": err,
              "message": message
            })),
        )
            .into_response()
    }
}
