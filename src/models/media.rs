use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Upload metadata. The file bytes themselves are discarded after the mock
/// URL is generated; there is no object storage behind this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub url: String,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub created_at: DateTime<Utc>,
}

impl MediaRecord {
    pub fn new(user_id: Uuid, original_name: String, mime_type: String, size: u64) -> Self {
        let id = Uuid::new_v4();
        let extension = original_name.rsplit('.').next().unwrap_or("bin").to_owned();
        let kind = if mime_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        let thumbnail = match kind {
            MediaKind::Video => Some(format!(
                "https://media.clickereen.com/thumbnails/{id}.jpg"
            )),
            MediaKind::Image => None,
        };
        Self {
            id,
            user_id,
            original_name,
            mime_type,
            size,
            url: format!("https://media.clickereen.com/media/{id}.{extension}"),
            thumbnail,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Only images and videos are accepted for upload.
pub fn is_supported_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/") || mime_type.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_uploads_get_a_thumbnail() {
        let record = MediaRecord::new(
            Uuid::new_v4(),
            "clip.mp4".to_owned(),
            "video/mp4".to_owned(),
            1024,
        );
        assert_eq!(record.kind, MediaKind::Video);
        assert!(record.thumbnail.is_some());
        assert!(record.url.ends_with(".mp4"));
    }

    #[test]
    fn rejects_non_media_mime_types() {
        assert!(is_supported_mime("image/png"));
        assert!(is_supported_mime("video/webm"));
        assert!(!is_supported_mime("application/pdf"));
    }
}
