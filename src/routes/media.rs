use crate::{
    auth::AuthUser,
    dto::{MediaListResponse, MediaResponse, MessageResponse},
    errors::ApiError,
    models::{MediaRecord, media::is_supported_mime},
    states::AppState,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

const MAX_FILES_PER_UPLOAD: usize = 5;

/// Drain one multipart field into a metadata record. The bytes are read only
/// to measure them and are dropped immediately; nothing is stored.
async fn record_from_field(
    field: axum::extract::multipart::Field<'_>,
    user_id: Uuid,
) -> Result<MediaRecord, ApiError> {
    let original_name = field.file_name().unwrap_or("upload").to_owned();
    let mime_type = field.content_type().unwrap_or("").to_owned();
    if !is_supported_mime(&mime_type) {
        return Err(ApiError::Validation(
            "Only image and video files are allowed".to_owned(),
        ));
    }
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read upload: {e}")))?;
    Ok(MediaRecord::new(
        user_id,
        original_name,
        mime_type,
        bytes.len() as u64,
    ))
}

/// POST /api/media/upload
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaResponse>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("media") {
            continue;
        }
        let record = record_from_field(field, auth.id).await?;
        info!("Media uploaded: {} by user {}", record.id, auth.id);
        state.media.insert(record.clone());
        return Ok((
            StatusCode::CREATED,
            Json(MediaResponse {
                message: "Media uploaded successfully".to_owned(),
                media: record,
            }),
        ));
    }

    Err(ApiError::MissingFields("Please select a file to upload"))
}

/// POST /api/media/upload-multiple
///
/// Wholesale semantics: one bad file fails the whole batch and nothing is
/// recorded.
pub async fn upload_multiple(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaListResponse>), ApiError> {
    let mut records = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("media") {
            continue;
        }
        if records.len() == MAX_FILES_PER_UPLOAD {
            return Err(ApiError::Validation(format!(
                "At most {MAX_FILES_PER_UPLOAD} files per upload"
            )));
        }
        records.push(record_from_field(field, auth.id).await?);
    }

    if records.is_empty() {
        return Err(ApiError::MissingFields("Please select files to upload"));
    }

    for record in &records {
        state.media.insert(record.clone());
    }
    let count = records.len();
    info!("{} media files uploaded by user {}", count, auth.id);

    Ok((
        StatusCode::CREATED,
        Json(MediaListResponse {
            message: "Media files uploaded successfully".to_owned(),
            media: records,
            count,
        }),
    ))
}

/// GET /api/media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaRecord>, ApiError> {
    let record = state.media.get(&id).ok_or(ApiError::NotFound("Media"))?;
    Ok(Json(record))
}

/// DELETE /api/media/{id}
pub async fn delete_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.media.delete(&id, auth.id)?;
    Ok(Json(MessageResponse {
        message: "Media deleted successfully".to_owned(),
    }))
}
