use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One additive counter bump per action; nothing derived is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsAction {
    PostCreated,
    PostLiked,
    PostCommented,
    PostRetweeted,
    PostShared,
    PostViewed,
    UserFollowed,
}

impl AnalyticsAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "post_created" => Some(Self::PostCreated),
            "post_liked" => Some(Self::PostLiked),
            "post_commented" => Some(Self::PostCommented),
            "post_retweeted" => Some(Self::PostRetweeted),
            "post_shared" => Some(Self::PostShared),
            "post_viewed" => Some(Self::PostViewed),
            "user_followed" => Some(Self::UserFollowed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_retweets: u64,
    pub total_shares: u64,
    pub total_views: u64,
    pub followers_gained: u64,
    pub following_gained: u64,
    /// Static/mocked; never recomputed from the counters above.
    pub engagement_rate: f64,
    pub reach: u64,
    pub impressions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: String,
    pub posts: u64,
    pub likes: u64,
    pub comments: u64,
    pub retweets: u64,
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub post_id: Uuid,
    pub content: String,
    pub likes: u64,
    pub comments: u64,
    pub retweets: u64,
    pub views: u64,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeGroup {
    pub range: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderShare {
    pub gender: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationShare {
    pub location: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestShare {
    pub interest: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceInsights {
    pub age_groups: Vec<AgeGroup>,
    pub gender_distribution: Vec<GenderShare>,
    pub top_locations: Vec<LocationShare>,
    pub interests: Vec<InterestShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagStat {
    pub hashtag: String,
    pub posts: u64,
    pub reach: u64,
    pub engagement: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingTime {
    pub hour: u32,
    pub engagement: u64,
}

/// Per-user analytics aggregate. Counters only ever go up via
/// [`Analytics::apply`]; the breakdown structures are seed fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub id: Uuid,
    pub user_id: Uuid,
    pub period: String,
    pub metrics: EngagementMetrics,
    pub daily_stats: Vec<DailyStat>,
    pub top_posts: Vec<TopPost>,
    pub audience_insights: AudienceInsights,
    pub hashtag_performance: Vec<HashtagStat>,
    pub best_posting_times: Vec<PostingTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Analytics {
    /// Zeroed aggregate, created lazily the first time a user reports an
    /// action.
    pub fn empty(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            period: "30d".to_owned(),
            metrics: EngagementMetrics::default(),
            daily_stats: Vec::new(),
            top_posts: Vec::new(),
            audience_insights: AudienceInsights::default(),
            hashtag_performance: Vec::new(),
            best_posting_times: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, action: AnalyticsAction) {
        match action {
            AnalyticsAction::PostCreated => self.metrics.total_posts += 1,
            AnalyticsAction::PostLiked => self.metrics.total_likes += 1,
            AnalyticsAction::PostCommented => self.metrics.total_comments += 1,
            AnalyticsAction::PostRetweeted => self.metrics.total_retweets += 1,
            AnalyticsAction::PostShared => self.metrics.total_shares += 1,
            AnalyticsAction::PostViewed => self.metrics.total_views += 1,
            AnalyticsAction::UserFollowed => self.metrics.followers_gained += 1,
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_action_bumps_exactly_one_counter() {
        let mut analytics = Analytics::empty(Uuid::new_v4());
        analytics.apply(AnalyticsAction::PostLiked);
        analytics.apply(AnalyticsAction::PostLiked);
        analytics.apply(AnalyticsAction::UserFollowed);

        assert_eq!(analytics.metrics.total_likes, 2);
        assert_eq!(analytics.metrics.followers_gained, 1);
        assert_eq!(analytics.metrics.total_posts, 0);
    }

    #[test]
    fn unknown_action_does_not_parse() {
        assert!(AnalyticsAction::parse("post_liked").is_some());
        assert!(AnalyticsAction::parse("account_deleted").is_none());
    }
}
