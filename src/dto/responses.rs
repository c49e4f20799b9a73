use crate::models::{
    Livestream, MediaAttachment, MediaRecord, Notification, Post, User, UserSnapshot,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Public user projection. Follower/following counts are derived from the
/// edge sets here, so they can never drift from the actual cardinality.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub verified: bool,
    pub is_private: bool,
    pub followers_count: usize,
    pub following_count: usize,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            website: user.website.clone(),
            verified: user.verified,
            is_private: user.is_private,
            followers_count: user.followers.len(),
            following_count: user.following.len(),
            created_at: user.created_at,
            last_active: user.last_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub message: String,
    pub following_count: usize,
    pub followers_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_retweets: u64,
    pub total_shares: u64,
    pub total_views: u64,
}

/// Post projection with the interaction flags resolved for one viewer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
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
    pub is_liked: bool,
    pub is_retweeted: bool,
    pub is_bookmarked: bool,
    pub engagement: Engagement,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn for_viewer(post: &Post, viewer: Option<Uuid>) -> Self {
        let flags = |set: &std::collections::HashSet<Uuid>| {
            viewer.map(|id| set.contains(&id)).unwrap_or(false)
        };
        Self {
            id: post.id,
            author: post.author.clone(),
            content: post.content.clone(),
            hashtags: post.hashtags.clone(),
            mentions: post.mentions.clone(),
            media: post.media.clone(),
            likes: post.likes,
            comments: post.comments,
            retweets: post.retweets,
            shares: post.shares,
            views: post.views,
            is_liked: flags(&post.liked_by),
            is_retweeted: flags(&post.retweeted_by),
            is_bookmarked: flags(&post.bookmarked_by),
            engagement: Engagement {
                total_likes: post.likes,
                total_comments: post.comments,
                total_retweets: post.retweets,
                total_shares: post.shares,
                total_views: post.views,
            },
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: PostResponse,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub posts: Vec<PostResponse>,
    pub query: String,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub message: String,
    pub is_liked: bool,
    pub total_likes: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetweetResponse {
    pub message: String,
    pub is_retweeted: bool,
    pub total_retweets: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub message: String,
    pub is_bookmarked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub message: String,
    pub updated_count: usize,
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub message: String,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct StreamListResponse {
    pub livestreams: Vec<Livestream>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct LiveStreamsResponse {
    pub livestreams: Vec<Livestream>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StreamResponse {
    pub message: String,
    pub livestream: Livestream,
}

#[derive(Debug, Serialize)]
pub struct ViewerResponse {
    pub message: String,
    pub viewers: u64,
}

#[derive(Debug, Serialize)]
pub struct MediaResponse {
    pub message: String,
    pub media: MediaRecord,
}

#[derive(Debug, Serialize)]
pub struct MediaListResponse {
    pub message: String,
    pub media: Vec<MediaRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Derived pagination block; never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice one page out of an already-ordered collection.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let limit = limit.max(1);
    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(limit);
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit).min(total);
    let slice = if start < total {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    let pagination = Pagination {
        current_page: page,
        total_pages,
        total_items: total,
        has_next: end < total,
        has_prev: page > 1,
    };
    (slice, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_derives_the_navigation_flags() {
        let items: Vec<u32> = (0..25).collect();

        let (page, meta) = paginate(&items, 1, 10);
        assert_eq!(page.len(), 10);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);

        let (page, meta) = paginate(&items, 3, 10);
        assert_eq!(page.len(), 5);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..3).collect();
        let (page, meta) = paginate(&items, 9, 10);
        assert!(page.is_empty());
        assert_eq!(meta.total_items, 3);
        assert!(!meta.has_next);
    }

    #[test]
    fn extreme_page_values_do_not_overflow() {
        let items: Vec<u32> = (0..3).collect();

        let (page, meta) = paginate(&items, usize::MAX, 10);
        assert!(page.is_empty());
        assert_eq!(meta.total_items, 3);
        assert!(!meta.has_next);

        let (page, _) = paginate(&items, usize::MAX, usize::MAX);
        assert!(page.is_empty());
    }
}
