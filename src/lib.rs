//! Clickereen API: a mock social-graph backend over in-memory stores.
//!
//! Everything lives in process-lifetime `DashMap` stores that are reseeded on
//! boot; there is no database. Handlers resolve the caller once through the
//! [`auth::AuthUser`] extractor and operate on the stores synchronously.

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod seed;
pub mod states;
pub mod stores;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use states::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request bodies beyond this are rejected by the extractor layer, not by
/// handler logic.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the full application router around shared state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/quick-access", post(routes::auth::quick_access))
        .route("/me", get(routes::auth::get_current_user))
        .route("/profile", put(routes::auth::update_profile))
        .route("/follow/{user_id}", post(routes::auth::follow))
        .route("/unfollow/{user_id}", post(routes::auth::unfollow))
        .route("/users", get(routes::auth::list_users));

    let post_routes = Router::new()
        .route("/", get(routes::post::list_posts).post(routes::post::create_post))
        .route(
            "/{id}",
            get(routes::post::get_post).delete(routes::post::delete_post),
        )
        .route("/{id}/like", post(routes::post::toggle_like))
        .route("/{id}/retweet", post(routes::post::toggle_retweet))
        .route("/{id}/bookmark", post(routes::post::toggle_bookmark))
        .route("/search/{query}", get(routes::post::search_posts));

    let notification_routes = Router::new()
        .route(
            "/",
            get(routes::notification::list_notifications)
                .post(routes::notification::create_notification),
        )
        .route("/unread-count", get(routes::notification::unread_count))
        .route("/mark-all-read", put(routes::notification::mark_all_read))
        .route(
            "/{id}",
            get(routes::notification::get_notification)
                .delete(routes::notification::delete_notification),
        )
        .route("/{id}/read", put(routes::notification::mark_read));

    let livestream_routes = Router::new()
        .route(
            "/",
            get(routes::livestream::list_streams).post(routes::livestream::create_stream),
        )
        .route("/live", get(routes::livestream::live_streams))
        .route("/{id}", get(routes::livestream::get_stream))
        .route("/{id}/start", post(routes::livestream::start_stream))
        .route("/{id}/end", post(routes::livestream::end_stream))
        .route("/{id}/join", post(routes::livestream::join_stream))
        .route("/{id}/leave", post(routes::livestream::leave_stream));

    let analytics_routes = Router::new()
        .route("/overview", get(routes::analytics::overview))
        .route("/detailed", get(routes::analytics::detailed))
        .route("/engagement", get(routes::analytics::engagement))
        .route("/audience", get(routes::analytics::audience))
        .route("/content", get(routes::analytics::content))
        .route("/growth", get(routes::analytics::growth))
        .route("/update", post(routes::analytics::update));

    let media_routes = Router::new()
        .route("/upload", post(routes::media::upload))
        .route("/upload-multiple", post(routes::media::upload_multiple))
        .route(
            "/{id}",
            get(routes::media::get_media).delete(routes::media::delete_media),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/status", get(routes::health::api_status))
        .nest("/api/auth", auth_routes)
        .nest("/api/posts", post_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/livestreams", livestream_routes)
        .nest("/api/analytics", analytics_routes)
        .nest("/api/media", media_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
