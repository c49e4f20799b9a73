use crate::errors::ApiError;
use crate::models::MediaRecord;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory media metadata repository. Only metadata lives here; upload
/// bytes are dropped once the mock URL is minted.
#[derive(Clone, Default)]
pub struct MediaStore {
    records: Arc<DashMap<Uuid, MediaRecord>>,
}

impl MediaStore {
    pub fn insert(&self, record: MediaRecord) {
        self.records.insert(record.id, record);
    }

    pub fn get(&self, id: &Uuid) -> Option<MediaRecord> {
        self.records.get(id).map(|entry| entry.clone())
    }

    pub fn delete(&self, id: &Uuid, caller: Uuid) -> Result<(), ApiError> {
        let owner = self
            .records
            .get(id)
            .map(|r| r.user_id)
            .ok_or(ApiError::NotFound("Media"))?;
        if owner != caller {
            return Err(ApiError::Forbidden("You can only delete your own media"));
        }
        self.records.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_is_owner_only() {
        let store = MediaStore::default();
        let owner = Uuid::new_v4();
        let record = MediaRecord::new(owner, "a.png".to_owned(), "image/png".to_owned(), 10);
        let id = record.id;
        store.insert(record);

        assert!(matches!(
            store.delete(&id, Uuid::new_v4()),
            Err(ApiError::Forbidden(_))
        ));
        store.delete(&id, owner).unwrap();
        assert!(store.get(&id).is_none());
    }
}
