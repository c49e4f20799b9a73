use crate::models::{Analytics, AnalyticsAction};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// One aggregate per user. Reads return `None` until something has been
/// seeded or reported for that user; writes create a zeroed aggregate on
/// demand.
#[derive(Clone, Default)]
pub struct AnalyticsStore {
    aggregates: Arc<DashMap<Uuid, Analytics>>,
}

impl AnalyticsStore {
    pub fn insert(&self, analytics: Analytics) {
        self.aggregates.insert(analytics.user_id, analytics);
    }

    pub fn get(&self, user_id: &Uuid) -> Option<Analytics> {
        self.aggregates.get(user_id).map(|entry| entry.clone())
    }

    pub fn apply(&self, user_id: Uuid, action: AnalyticsAction) -> Analytics {
        let mut entry = self
            .aggregates
            .entry(user_id)
            .or_insert_with(|| Analytics::empty(user_id));
        entry.apply(action);
        entry.clone()
    }
}
