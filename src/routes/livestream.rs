use crate::{
    auth::AuthUser,
    dto::{
        CreateLivestreamRequest, LiveStreamsResponse, StreamListParams, StreamListResponse,
        StreamResponse, ViewerResponse, paginate,
    },
    errors::ApiError,
    models::{Livestream, StreamStatus},
    states::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

fn parse_status(raw: Option<&str>) -> Option<StreamStatus> {
    match raw {
        Some("scheduled") => Some(StreamStatus::Scheduled),
        Some("live") => Some(StreamStatus::Live),
        Some("ended") => Some(StreamStatus::Ended),
        _ => None,
    }
}

/// GET /api/livestreams?status&page&limit
pub async fn list_streams(
    State(state): State<AppState>,
    Query(params): Query<StreamListParams>,
) -> Json<StreamListResponse> {
    let status = parse_status(params.status.as_deref());
    let streams = state.livestreams.listed(status);
    let (page, pagination) = paginate(&streams, params.page, params.limit);
    Json(StreamListResponse {
        livestreams: page,
        pagination,
    })
}

/// GET /api/livestreams/live
pub async fn live_streams(State(state): State<AppState>) -> Json<LiveStreamsResponse> {
    let livestreams = state.livestreams.live();
    let count = livestreams.len();
    Json(LiveStreamsResponse { livestreams, count })
}

/// GET /api/livestreams/{id}
pub async fn get_stream(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Livestream>, ApiError> {
    let stream = state
        .livestreams
        .get(&id)
        .ok_or(ApiError::NotFound("Livestream"))?;
    Ok(Json(stream))
}

/// POST /api/livestreams
pub async fn create_stream(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateLivestreamRequest>,
) -> Result<(StatusCode, Json<StreamResponse>), ApiError> {
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(ApiError::MissingFields("Title and description are required"));
    }

    let streamer = state.users.get(&auth.id).ok_or(ApiError::InvalidToken)?;
    let stream = Livestream::new(
        payload.title,
        payload.description,
        streamer.snapshot(),
        payload.scheduled_at,
    );

    info!("Livestream created: {} by user {}", stream.id, auth.id);
    state.livestreams.insert(stream.clone());

    Ok((
        StatusCode::CREATED,
        Json(StreamResponse {
            message: "Livestream created successfully".to_owned(),
            livestream: stream,
        }),
    ))
}

/// POST /api/livestreams/{id}/start
pub async fn start_stream(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StreamResponse>, ApiError> {
    let stream = state.livestreams.start(&id, auth.id)?;
    info!("Livestream started: {}", id);
    Ok(Json(StreamResponse {
        message: "Livestream started successfully".to_owned(),
        livestream: stream,
    }))
}

/// POST /api/livestreams/{id}/end
pub async fn end_stream(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StreamResponse>, ApiError> {
    let stream = state.livestreams.end(&id, auth.id)?;
    info!("Livestream ended: {}", id);
    Ok(Json(StreamResponse {
        message: "Livestream ended successfully".to_owned(),
        livestream: stream,
    }))
}

/// POST /api/livestreams/{id}/join
pub async fn join_stream(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViewerResponse>, ApiError> {
    let viewers = state.livestreams.join(&id)?;
    Ok(Json(ViewerResponse {
        message: "Joined livestream successfully".to_owned(),
        viewers,
    }))
}

/// POST /api/livestreams/{id}/leave
pub async fn leave_stream(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViewerResponse>, ApiError> {
    let viewers = state.livestreams.leave(&id)?;
    Ok(Json(ViewerResponse {
        message: "Left livestream successfully".to_owned(),
        viewers,
    }))
}
