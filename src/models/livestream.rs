use super::user::UserSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stream lifecycle. Transitions only move forward; `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Scheduled,
    Live,
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Livestream {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub streamer: UserSnapshot,
    pub status: StreamStatus,
    pub viewers: u64,
    pub thumbnail: String,
    pub stream_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Livestream {
    /// A stream with a future start time is created `scheduled`; otherwise it
    /// goes live immediately and gets a stream URL straight away.
    pub fn new(
        title: String,
        description: String,
        streamer: UserSnapshot,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let thumbnail = format!(
            "https://ui-avatars.com/api/?name={}&background=10b981&color=fff&size=800x450",
            title.replace(' ', "+")
        );
        let (status, stream_url, started_at) = match scheduled_at {
            Some(at) => (StreamStatus::Scheduled, None, Some(at)),
            None => (StreamStatus::Live, Some(stream_url_for(&id)), Some(now)),
        };
        Self {
            id,
            title,
            description,
            streamer,
            status,
            viewers: 0,
            thumbnail,
            stream_url,
            created_at: now,
            started_at,
            ended_at: None,
        }
    }
}

pub fn stream_url_for(id: &Uuid) -> String {
    format!("rtmp://stream.clickereen.com/live/{id}")
}
