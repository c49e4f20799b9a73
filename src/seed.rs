//! Boot-time fixtures. The stores are process-lifetime and reseeded on every
//! start; none of this survives a restart.

use crate::models::analytics::{
    AgeGroup, Analytics, AudienceInsights, DailyStat, EngagementMetrics, GenderShare,
    HashtagStat, InterestShare, LocationShare, PostingTime, TopPost,
};
use crate::models::{Livestream, Notification, NotificationKind, Post, StreamStatus, User};
use crate::states::AppState;
use chrono::{Duration, Utc};
use tracing::info;

pub const DEMO_USERNAME: &str = "demo_user";
const SEED_PASSWORD: &str = "password";

// Low cost keeps boot and the test suite fast; these are demo fixtures, not
// real credentials.
const SEED_BCRYPT_COST: u32 = 4;

pub fn seed(state: &AppState) {
    let hashed = bcrypt::hash(SEED_PASSWORD, SEED_BCRYPT_COST)
        .unwrap_or_else(|e| panic!("seed password hash failed: {e}"));

    let mut demo = User::new(
        DEMO_USERNAME.to_owned(),
        "demo@clickereen.com".to_owned(),
        hashed.clone(),
        "Demo User".to_owned(),
    );
    demo.bio = "Welcome to Clickereen! This is a demo account.".to_owned();
    demo.location = "Worldwide".to_owned();
    demo.website = "https://clickereen.com".to_owned();
    demo.verified = true;

    let mut sarah = User::new(
        "sarah_creative".to_owned(),
        "sarah@clickereen.com".to_owned(),
        hashed,
        "Sarah Chen".to_owned(),
    );
    sarah.bio = "Creative designer and photographer".to_owned();
    sarah.location = "San Francisco, CA".to_owned();
    sarah.website = "https://sarahchen.design".to_owned();
    sarah.verified = true;

    seed_posts(state, &demo, &sarah);
    seed_notifications(state, &demo, &sarah);
    seed_livestreams(state, &demo, &sarah);
    seed_analytics(state, &demo);

    state.users.insert(demo);
    state.users.insert(sarah);

    info!("Seeded demo users, posts, notifications, livestreams and analytics");
}

fn seed_posts(state: &AppState, demo: &User, sarah: &User) {
    let mut welcome = Post::new(
        demo.snapshot(),
        "Welcome to Clickereen! This is an amazing social media platform built with modern \
         technologies. #welcome #clickereen #socialmedia"
            .to_owned(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );
    welcome.likes = 42;
    welcome.comments = 8;
    welcome.retweets = 12;
    welcome.shares = 5;
    welcome.views = 156;
    welcome.created_at = Utc::now() - Duration::hours(2);

    let mut photoshoot = Post::new(
        sarah.snapshot(),
        "Just finished an amazing photoshoot! The lighting was perfect today. \
         #photography #art #creative"
            .to_owned(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );
    photoshoot.likes = 156;
    photoshoot.comments = 23;
    photoshoot.retweets = 34;
    photoshoot.shares = 12;
    photoshoot.views = 892;
    photoshoot.created_at = Utc::now() - Duration::hours(1);

    let mut collab = Post::new(
        demo.snapshot(),
        "Building something amazing with @sarah_creative! The future of social media is \
         here. #collaboration #innovation #tech"
            .to_owned(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );
    collab.likes = 89;
    collab.comments = 15;
    collab.retweets = 28;
    collab.shares = 7;
    collab.views = 445;
    collab.created_at = Utc::now() - Duration::minutes(30);

    state.posts.insert(welcome);
    state.posts.insert(photoshoot);
    state.posts.insert(collab);
}

fn seed_notifications(state: &AppState, demo: &User, sarah: &User) {
    let ages = [
        (NotificationKind::Like, "liked your post", 2, false),
        (NotificationKind::Comment, "commented: \"This is incredible!\"", 5, false),
        (NotificationKind::Retweet, "retweeted your post", 10, true),
        (NotificationKind::Follow, "started following you", 60, true),
        (NotificationKind::Mention, "mentioned you in a post", 120, false),
    ];
    for (kind, content, minutes_ago, read) in ages {
        let mut notification = Notification::new(
            demo.id,
            kind,
            sarah.snapshot(),
            content.to_owned(),
            None,
        );
        notification.created_at = Utc::now() - Duration::minutes(minutes_ago);
        notification.read = read;
        state.notifications.insert(notification);
    }
}

fn seed_livestreams(state: &AppState, demo: &User, sarah: &User) {
    let mut coding = Livestream::new(
        "Live Coding Session - Building Clickereen".to_owned(),
        "Join me as I build new features for Clickereen live!".to_owned(),
        demo.snapshot(),
        None,
    );
    coding.status = StreamStatus::Live;
    coding.viewers = 156;
    coding.started_at = Some(Utc::now() - Duration::minutes(30));

    let photography = Livestream::new(
        "Photography Tips & Tricks".to_owned(),
        "Learn professional photography techniques".to_owned(),
        sarah.snapshot(),
        Some(Utc::now() + Duration::hours(1)),
    );

    state.livestreams.insert(coding);
    state.livestreams.insert(photography);
}

fn seed_analytics(state: &AppState, demo: &User) {
    let mut analytics = Analytics::empty(demo.id);
    analytics.metrics = EngagementMetrics {
        total_posts: 45,
        total_likes: 1250,
        total_comments: 340,
        total_retweets: 180,
        total_shares: 95,
        total_views: 15600,
        followers_gained: 120,
        following_gained: 45,
        engagement_rate: 8.5,
        reach: 12500,
        impressions: 18900,
    };
    analytics.daily_stats = vec![
        daily("2024-01-01", 2, 45, 12, 8, 520),
        daily("2024-01-02", 1, 38, 9, 5, 480),
        daily("2024-01-03", 3, 67, 18, 12, 720),
        daily("2024-01-04", 1, 42, 11, 6, 580),
        daily("2024-01-05", 2, 55, 15, 9, 650),
        daily("2024-01-06", 1, 33, 8, 4, 420),
        daily("2024-01-07", 2, 48, 13, 7, 560),
    ];
    analytics.top_posts = state
        .posts
        .sorted(crate::stores::PostSort::Popular)
        .into_iter()
        .take(2)
        .map(|post| TopPost {
            post_id: post.id,
            content: post.content.clone(),
            likes: post.likes,
            comments: post.comments,
            retweets: post.retweets,
            views: post.views,
            engagement_rate: 12.5,
        })
        .collect();
    analytics.audience_insights = AudienceInsights {
        age_groups: vec![
            age("18-24", 35),
            age("25-34", 40),
            age("35-44", 20),
            age("45+", 5),
        ],
        gender_distribution: vec![
            gender("Male", 45),
            gender("Female", 50),
            gender("Other", 5),
        ],
        top_locations: vec![
            location("United States", 35),
            location("United Kingdom", 15),
            location("Canada", 12),
            location("Australia", 10),
            location("Germany", 8),
        ],
        interests: vec![
            interest("Technology", 45),
            interest("Photography", 30),
            interest("Design", 25),
            interest("Travel", 20),
            interest("Food", 15),
        ],
    };
    analytics.hashtag_performance = vec![
        hashtag("#clickereen", 12, 2500, 180),
        hashtag("#photography", 8, 1800, 150),
        hashtag("#tech", 6, 1200, 95),
        hashtag("#design", 5, 900, 70),
        hashtag("#innovation", 4, 800, 60),
    ];
    analytics.best_posting_times = [9u32, 12, 15, 18, 21]
        .into_iter()
        .zip([85u64, 95, 78, 92, 88])
        .map(|(hour, engagement)| PostingTime { hour, engagement })
        .collect();

    state.analytics.insert(analytics);
}

fn daily(date: &str, posts: u64, likes: u64, comments: u64, retweets: u64, views: u64) -> DailyStat {
    DailyStat {
        date: date.to_owned(),
        posts,
        likes,
        comments,
        retweets,
        views,
    }
}

fn age(range: &str, percentage: u32) -> AgeGroup {
    AgeGroup {
        range: range.to_owned(),
        percentage,
    }
}

fn gender(gender: &str, percentage: u32) -> GenderShare {
    GenderShare {
        gender: gender.to_owned(),
        percentage,
    }
}

fn location(location: &str, percentage: u32) -> LocationShare {
    LocationShare {
        location: location.to_owned(),
        percentage,
    }
}

fn interest(interest: &str, percentage: u32) -> InterestShare {
    InterestShare {
        interest: interest.to_owned(),
        percentage,
    }
}

fn hashtag(hashtag: &str, posts: u64, reach: u64, engagement: u64) -> HashtagStat {
    HashtagStat {
        hashtag: hashtag.to_owned(),
        posts,
        reach,
        engagement,
    }
}
