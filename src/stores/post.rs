use crate::errors::ApiError;
use crate::models::Post;
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostSort {
    #[default]
    Newest,
    Oldest,
    Popular,
}

/// In-memory post repository.
#[derive(Clone, Default)]
pub struct PostStore {
    posts: Arc<DashMap<Uuid, Post>>,
}

impl PostStore {
    pub fn insert(&self, post: Post) {
        self.posts.insert(post.id, post);
    }

    pub fn get(&self, id: &Uuid) -> Option<Post> {
        self.posts.get(id).map(|entry| entry.clone())
    }

    /// All posts in the requested order. `popular` ranks by
    /// likes + comments + retweets; ties keep creation order because the
    /// ranking sort is stable over a creation-ordered base.
    pub fn sorted(&self, sort: PostSort) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.clone()).collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        match sort {
            PostSort::Oldest => {}
            PostSort::Newest => posts.reverse(),
            PostSort::Popular => {
                posts.sort_by(|a, b| b.engagement_score().cmp(&a.engagement_score()));
            }
        }
        posts
    }

    /// Case-insensitive substring match over content, hashtags and mentions,
    /// newest first.
    pub fn search(&self, query: &str) -> Vec<Post> {
        let term = query.to_lowercase();
        let mut matches: Vec<Post> = self
            .posts
            .iter()
            .filter(|post| {
                post.content.to_lowercase().contains(&term)
                    || post.hashtags.iter().any(|t| t.to_lowercase().contains(&term))
                    || post.mentions.iter().any(|m| m.to_lowercase().contains(&term))
            })
            .map(|entry| entry.clone())
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        matches
    }

    /// Flip the caller's like. Returns the new flag and like total.
    pub fn toggle_like(&self, post_id: &Uuid, user_id: Uuid) -> Result<(bool, u64), ApiError> {
        let mut post = self.posts.get_mut(post_id).ok_or(ApiError::NotFound("Post"))?;
        let liked = if post.liked_by.remove(&user_id) {
            post.likes = post.likes.saturating_sub(1);
            false
        } else {
            post.liked_by.insert(user_id);
            post.likes += 1;
            true
        };
        post.updated_at = Utc::now();
        Ok((liked, post.likes))
    }

    /// Flip the caller's retweet. Returns the new flag and retweet total.
    pub fn toggle_retweet(&self, post_id: &Uuid, user_id: Uuid) -> Result<(bool, u64), ApiError> {
        let mut post = self.posts.get_mut(post_id).ok_or(ApiError::NotFound("Post"))?;
        let retweeted = if post.retweeted_by.remove(&user_id) {
            post.retweets = post.retweets.saturating_sub(1);
            false
        } else {
            post.retweeted_by.insert(user_id);
            post.retweets += 1;
            true
        };
        post.updated_at = Utc::now();
        Ok((retweeted, post.retweets))
    }

    /// Flip the caller's bookmark; no counter is attached.
    pub fn toggle_bookmark(&self, post_id: &Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut post = self.posts.get_mut(post_id).ok_or(ApiError::NotFound("Post"))?;
        let bookmarked = if post.bookmarked_by.remove(&user_id) {
            false
        } else {
            post.bookmarked_by.insert(user_id);
            true
        };
        post.updated_at = Utc::now();
        Ok(bookmarked)
    }

    /// Remove a post; only its author may do so.
    pub fn delete(&self, post_id: &Uuid, caller: Uuid) -> Result<(), ApiError> {
        let author_id = self
            .posts
            .get(post_id)
            .map(|post| post.author.id)
            .ok_or(ApiError::NotFound("Post"))?;
        if author_id != caller {
            return Err(ApiError::Forbidden("You can only delete your own posts"));
        }
        self.posts.remove(post_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserSnapshot};

    fn snapshot() -> UserSnapshot {
        User::new(
            "alice".to_owned(),
            "alice@example.com".to_owned(),
            "hash".to_owned(),
            "Alice".to_owned(),
        )
        .snapshot()
    }

    fn post(content: &str) -> Post {
        Post::new(snapshot(), content.to_owned(), Vec::new(), Vec::new(), Vec::new())
    }

    #[test]
    fn double_like_round_trips_to_the_original_count() {
        let store = PostStore::default();
        let mut seeded = post("hello");
        seeded.likes = 42;
        let post_id = seeded.id;
        store.insert(seeded);

        let user = Uuid::new_v4();
        let (liked, likes) = store.toggle_like(&post_id, user).unwrap();
        assert!(liked);
        assert_eq!(likes, 43);

        let (liked, likes) = store.toggle_like(&post_id, user).unwrap();
        assert!(!liked);
        assert_eq!(likes, 42);
    }

    #[test]
    fn like_flags_are_tracked_per_user() {
        let store = PostStore::default();
        let seeded = post("hello");
        let post_id = seeded.id;
        store.insert(seeded);

        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.toggle_like(&post_id, alice).unwrap();

        let current = store.get(&post_id).unwrap();
        assert!(current.liked_by.contains(&alice));
        assert!(!current.liked_by.contains(&bob));
        assert_eq!(current.likes, 1);
    }

    #[test]
    fn like_count_never_goes_negative() {
        let store = PostStore::default();
        let seeded = post("hello");
        let post_id = seeded.id;
        store.insert(seeded);

        // Flag set without a matching counter: the decrement must clamp.
        {
            let user = Uuid::new_v4();
            store.toggle_like(&post_id, user).unwrap();
            let mut entry = store.posts.get_mut(&post_id).unwrap();
            entry.likes = 0;
            drop(entry);
            let (_, likes) = store.toggle_like(&post_id, user).unwrap();
            assert_eq!(likes, 0);
        }
    }

    #[test]
    fn only_the_author_may_delete() {
        let store = PostStore::default();
        let seeded = post("hello");
        let post_id = seeded.id;
        store.insert(seeded);

        assert!(matches!(
            store.delete(&post_id, Uuid::new_v4()),
            Err(ApiError::Forbidden(_))
        ));
        assert!(store.get(&post_id).is_some());

        let author = store.get(&post_id).unwrap().author.id;
        store.delete(&post_id, author).unwrap();
        assert!(store.get(&post_id).is_none());
    }

    #[test]
    fn popular_sort_ranks_by_engagement() {
        let store = PostStore::default();
        let mut quiet = post("quiet");
        let mut loud = post("loud");
        quiet.likes = 1;
        loud.likes = 10;
        loud.comments = 5;
        let loud_id = loud.id;
        store.insert(quiet);
        store.insert(loud);

        let ranked = store.sorted(PostSort::Popular);
        assert_eq!(ranked[0].id, loud_id);
    }

    #[test]
    fn search_matches_content_hashtags_and_mentions() {
        let store = PostStore::default();
        store.insert(post("shipping the new feed #Rust"));
        store.insert(post("lunch with @carol"));
        store.insert(post("nothing relevant"));

        assert_eq!(store.search("rust").len(), 1);
        assert_eq!(store.search("carol").len(), 1);
        assert_eq!(store.search("SHIPPING").len(), 1);
        assert!(store.search("golang").is_empty());
    }
}
