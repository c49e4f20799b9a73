use crate::stores::{
    AnalyticsStore, LivestreamStore, MediaStore, NotificationStore, PostStore, UserStore,
};
use std::time::Instant;

/// Shared application state: one in-memory store per entity family plus the
/// JWT secret. Everything is constructed once in `main`, seeded, and handed
/// to the router; the stores live for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub posts: PostStore,
    pub notifications: NotificationStore,
    pub livestreams: LivestreamStore,
    pub analytics: AnalyticsStore,
    pub media: MediaStore,
    pub jwt_secret: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            users: UserStore::default(),
            posts: PostStore::default(),
            notifications: NotificationStore::default(),
            livestreams: LivestreamStore::default(),
            analytics: AnalyticsStore::default(),
            media: MediaStore::default(),
            jwt_secret,
            started_at: Instant::now(),
        }
    }
}
