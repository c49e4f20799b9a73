use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub verified: bool,
    pub is_private: bool,
    pub followers: HashSet<Uuid>,
    pub following: HashSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, hashed_password: String, display_name: String) -> Self {
        let now = Utc::now();
        let avatar = format!(
            "https://ui-avatars.com/api/?name={}&background=10b981&color=fff",
            display_name.replace(' ', "+")
        );
        Self {
            id: Uuid::new_v4(),
            username,
            display_name,
            email,
            hashed_password,
            avatar,
            bio: String::new(),
            location: String::new(),
            website: String::new(),
            verified: false,
            is_private: false,
            followers: HashSet::new(),
            following: HashSet::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Display fields copied into posts, streams and notifications at write
    /// time. Not kept in sync with later profile edits.
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
            verified: self.verified,
        }
    }
}

/// Denormalized author/streamer/sender reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub verified: bool,
}
