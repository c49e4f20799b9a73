use crate::errors::ApiError;
use crate::models::livestream::stream_url_for;
use crate::models::{Livestream, StreamStatus};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory livestream repository with the scheduled → live → ended
/// lifecycle.
#[derive(Clone, Default)]
pub struct LivestreamStore {
    streams: Arc<DashMap<Uuid, Livestream>>,
}

impl LivestreamStore {
    pub fn insert(&self, stream: Livestream) {
        self.streams.insert(stream.id, stream);
    }

    pub fn get(&self, id: &Uuid) -> Option<Livestream> {
        self.streams.get(id).map(|entry| entry.clone())
    }

    /// Streams matching the optional status filter: live ones first, then by
    /// descending viewer count.
    pub fn listed(&self, status: Option<StreamStatus>) -> Vec<Livestream> {
        let mut streams: Vec<Livestream> = self
            .streams
            .iter()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .map(|entry| entry.clone())
            .collect();
        streams.sort_by(|a, b| {
            let a_live = a.status == StreamStatus::Live;
            let b_live = b.status == StreamStatus::Live;
            b_live
                .cmp(&a_live)
                .then(b.viewers.cmp(&a.viewers))
                .then(a.id.cmp(&b.id))
        });
        streams
    }

    pub fn live(&self) -> Vec<Livestream> {
        let mut streams: Vec<Livestream> = self
            .streams
            .iter()
            .filter(|s| s.status == StreamStatus::Live)
            .map(|entry| entry.clone())
            .collect();
        streams.sort_by(|a, b| b.viewers.cmp(&a.viewers).then(a.id.cmp(&b.id)));
        streams
    }

    /// Owner-only transition to `live`. Refreshes `started_at` and the stream
    /// URL; rejected once the stream has ended.
    pub fn start(&self, id: &Uuid, caller: Uuid) -> Result<Livestream, ApiError> {
        let mut stream = self
            .streams
            .get_mut(id)
            .ok_or(ApiError::NotFound("Livestream"))?;
        if stream.streamer.id != caller {
            return Err(ApiError::Forbidden("You can only start your own livestreams"));
        }
        if stream.status == StreamStatus::Ended {
            return Err(ApiError::InvalidAction("This livestream has already ended"));
        }
        stream.status = StreamStatus::Live;
        stream.started_at = Some(Utc::now());
        stream.stream_url = Some(stream_url_for(id));
        Ok(stream.clone())
    }

    /// Owner-only transition to `ended`; irreversible.
    pub fn end(&self, id: &Uuid, caller: Uuid) -> Result<Livestream, ApiError> {
        let mut stream = self
            .streams
            .get_mut(id)
            .ok_or(ApiError::NotFound("Livestream"))?;
        if stream.streamer.id != caller {
            return Err(ApiError::Forbidden("You can only end your own livestreams"));
        }
        stream.status = StreamStatus::Ended;
        stream.ended_at = Some(Utc::now());
        Ok(stream.clone())
    }

    /// Viewer join; only live streams accept viewers.
    pub fn join(&self, id: &Uuid) -> Result<u64, ApiError> {
        let mut stream = self
            .streams
            .get_mut(id)
            .ok_or(ApiError::NotFound("Livestream"))?;
        if stream.status != StreamStatus::Live {
            return Err(ApiError::NotLive);
        }
        stream.viewers += 1;
        Ok(stream.viewers)
    }

    /// Viewer leave; clamped at zero and allowed in any state.
    pub fn leave(&self, id: &Uuid) -> Result<u64, ApiError> {
        let mut stream = self
            .streams
            .get_mut(id)
            .ok_or(ApiError::NotFound("Livestream"))?;
        stream.viewers = stream.viewers.saturating_sub(1);
        Ok(stream.viewers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn owner() -> User {
        User::new(
            "streamer".to_owned(),
            "streamer@example.com".to_owned(),
            "hash".to_owned(),
            "Streamer".to_owned(),
        )
    }

    fn scheduled_stream(streamer: &User) -> Livestream {
        Livestream::new(
            "Test stream".to_owned(),
            "Testing".to_owned(),
            streamer.snapshot(),
            Some(Utc::now() + chrono::Duration::hours(1)),
        )
    }

    #[test]
    fn join_requires_live_status() {
        let streamer = owner();
        let store = LivestreamStore::default();
        let stream = scheduled_stream(&streamer);
        let id = stream.id;
        store.insert(stream);

        assert!(matches!(store.join(&id), Err(ApiError::NotLive)));

        store.start(&id, streamer.id).unwrap();
        assert_eq!(store.join(&id).unwrap(), 1);

        store.end(&id, streamer.id).unwrap();
        assert!(matches!(store.join(&id), Err(ApiError::NotLive)));
    }

    #[test]
    fn viewers_never_go_negative() {
        let streamer = owner();
        let store = LivestreamStore::default();
        let stream = scheduled_stream(&streamer);
        let id = stream.id;
        store.insert(stream);

        assert_eq!(store.leave(&id).unwrap(), 0);
        assert_eq!(store.leave(&id).unwrap(), 0);
    }

    #[test]
    fn start_is_owner_only_and_sets_url() {
        let streamer = owner();
        let store = LivestreamStore::default();
        let stream = scheduled_stream(&streamer);
        let id = stream.id;
        store.insert(stream);

        assert!(matches!(
            store.start(&id, Uuid::new_v4()),
            Err(ApiError::Forbidden(_))
        ));

        let started = store.start(&id, streamer.id).unwrap();
        assert_eq!(started.status, StreamStatus::Live);
        assert!(started.stream_url.is_some());
        assert!(started.started_at.is_some());
    }

    #[test]
    fn ended_is_terminal() {
        let streamer = owner();
        let store = LivestreamStore::default();
        let stream = scheduled_stream(&streamer);
        let id = stream.id;
        store.insert(stream);

        store.end(&id, streamer.id).unwrap();
        assert!(matches!(
            store.start(&id, streamer.id),
            Err(ApiError::InvalidAction(_))
        ));
        assert_eq!(store.get(&id).unwrap().status, StreamStatus::Ended);
    }

    #[test]
    fn live_streams_sort_first() {
        let streamer = owner();
        let store = LivestreamStore::default();
        let pending = scheduled_stream(&streamer);
        let live = Livestream::new(
            "Live now".to_owned(),
            "On air".to_owned(),
            streamer.snapshot(),
            None,
        );
        let live_id = live.id;
        store.insert(pending);
        store.insert(live);

        let listed = store.listed(None);
        assert_eq!(listed[0].id, live_id);

        let only_scheduled = store.listed(Some(StreamStatus::Scheduled));
        assert_eq!(only_scheduled.len(), 1);
    }
}
