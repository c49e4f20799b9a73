use crate::errors::ApiError;
use crate::models::User;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory user repository. Created once at startup, seeded, and dropped at
/// shutdown; nothing survives a restart.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<DashMap<Uuid, User>>,
}

impl UserStore {
    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.get(id).map(|entry| entry.clone())
    }

    /// Case-sensitive exact match on email or username, mirroring the
    /// login/registration lookup contract.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.email == identifier || entry.username == identifier)
            .map(|entry| entry.clone())
    }

    pub fn all(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.clone()).collect()
    }

    /// Apply a mutation to one user and return the updated record.
    pub fn update<F>(&self, id: &Uuid, mutate: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut entry = self.users.get_mut(id)?;
        mutate(&mut entry);
        Some(entry.clone())
    }

    pub fn touch_last_active(&self, id: &Uuid) {
        if let Some(mut entry) = self.users.get_mut(id) {
            entry.last_active = Utc::now();
        }
    }

    /// Add the follow edge on both sides. Returns the follower's new
    /// `followingCount` and the target's new `followersCount`. The two map
    /// entries are locked one at a time to stay clear of shard deadlocks.
    pub fn follow(&self, follower_id: Uuid, target_id: Uuid) -> Result<(usize, usize), ApiError> {
        if follower_id == target_id {
            return Err(ApiError::InvalidAction("Cannot follow yourself"));
        }
        if !self.users.contains_key(&target_id) {
            return Err(ApiError::NotFound("User to follow"));
        }

        let following_count = {
            let mut follower = self
                .users
                .get_mut(&follower_id)
                .ok_or(ApiError::NotFound("Current user"))?;
            if !follower.following.insert(target_id) {
                return Err(ApiError::AlreadyFollowing);
            }
            follower.following.len()
        };

        let followers_count = {
            let mut target = self
                .users
                .get_mut(&target_id)
                .ok_or(ApiError::NotFound("User to follow"))?;
            target.followers.insert(follower_id);
            target.followers.len()
        };

        Ok((following_count, followers_count))
    }

    /// Remove the follow edge on both sides; a no-op when the edge is absent.
    pub fn unfollow(&self, follower_id: Uuid, target_id: Uuid) -> Result<(usize, usize), ApiError> {
        if !self.users.contains_key(&target_id) {
            return Err(ApiError::NotFound("User to unfollow"));
        }

        let following_count = {
            let mut follower = self
                .users
                .get_mut(&follower_id)
                .ok_or(ApiError::NotFound("Current user"))?;
            follower.following.remove(&target_id);
            follower.following.len()
        };

        let followers_count = {
            let mut target = self
                .users
                .get_mut(&target_id)
                .ok_or(ApiError::NotFound("User to unfollow"))?;
            target.followers.remove(&follower_id);
            target.followers.len()
        };

        Ok((following_count, followers_count))
    }
}
