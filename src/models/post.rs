use super::user::UserSnapshot;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use uuid::Uuid;

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid regex"));
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid regex"));

/// A post record. Interaction state (`liked_by` and friends) is keyed by user
/// id so two viewers never share a toggle flag; the response layer projects
/// per-viewer booleans out of these sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: UserSnapshot,
    pub content: String,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub media: Vec<MediaAttachment>,
    pub likes: u64,
    pub comments: u64,
    pub retweets: u64,
    pub shares: u64,
    pub views: u64,
    pub liked_by: HashSet<Uuid>,
    pub retweeted_by: HashSet<Uuid>,
    pub bookmarked_by: HashSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        author: UserSnapshot,
        content: String,
        media: Vec<MediaAttachment>,
        explicit_hashtags: Vec<String>,
        explicit_mentions: Vec<String>,
    ) -> Self {
        let hashtags = merge_unique(explicit_hashtags, extract_hashtags(&content));
        let mentions = merge_unique(explicit_mentions, extract_mentions(&content));
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author,
            content,
            hashtags,
            mentions,
            media,
            likes: 0,
            comments: 0,
            retweets: 0,
            shares: 0,
            views: 0,
            liked_by: HashSet::new(),
            retweeted_by: HashSet::new(),
            bookmarked_by: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Popularity score used by the `popular` sort order.
    pub fn engagement_score(&self) -> u64 {
        self.likes + self.comments + self.retweets
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

pub fn extract_hashtags(content: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(content)
        .map(|c| c[1].to_owned())
        .collect()
}

pub fn extract_mentions(content: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(content)
        .map(|c| c[1].to_owned())
        .collect()
}

/// Set union keeping first-seen order: explicit tags first, then extracted.
fn merge_unique(explicit: Vec<String>, extracted: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(explicit.len() + extracted.len());
    for tag in explicit.into_iter().chain(extracted) {
        if !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    merged
}
