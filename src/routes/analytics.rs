use crate::{
    auth::AuthUser,
    dto::AnalyticsUpdateRequest,
    errors::ApiError,
    models::{Analytics, AnalyticsAction},
    states::AppState,
};
use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::json;

fn caller_analytics(state: &AppState, auth: &AuthUser) -> Result<Analytics, ApiError> {
    state
        .analytics
        .get(&auth.id)
        .ok_or(ApiError::NotFound("Analytics data"))
}

/// GET /api/analytics/overview
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analytics = caller_analytics(&state, &auth)?;
    Ok(Json(json!({
        "overview": analytics.metrics,
        "period": analytics.period,
        "lastUpdated": analytics.updated_at,
    })))
}

/// GET /api/analytics/detailed
pub async fn detailed(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analytics = caller_analytics(&state, &auth)?;
    Ok(Json(json!({
        "metrics": analytics.metrics,
        "dailyStats": analytics.daily_stats,
        "topPosts": analytics.top_posts,
        "audienceInsights": analytics.audience_insights,
        "hashtagPerformance": analytics.hashtag_performance,
        "bestPostingTimes": analytics.best_posting_times,
        "period": analytics.period,
        "lastUpdated": analytics.updated_at,
    })))
}

/// GET /api/analytics/engagement
pub async fn engagement(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analytics = caller_analytics(&state, &auth)?;
    Ok(Json(json!({
        "totalLikes": analytics.metrics.total_likes,
        "totalComments": analytics.metrics.total_comments,
        "totalRetweets": analytics.metrics.total_retweets,
        "totalShares": analytics.metrics.total_shares,
        "engagementRate": analytics.metrics.engagement_rate,
        "dailyStats": analytics.daily_stats,
        "bestPostingTimes": analytics.best_posting_times,
    })))
}

/// GET /api/analytics/audience
pub async fn audience(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analytics = caller_analytics(&state, &auth)?;
    Ok(Json(json!({
        "audienceInsights": analytics.audience_insights,
        "reach": analytics.metrics.reach,
        "impressions": analytics.metrics.impressions,
    })))
}

/// GET /api/analytics/content
pub async fn content(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analytics = caller_analytics(&state, &auth)?;
    Ok(Json(json!({
        "topPosts": analytics.top_posts,
        "hashtagPerformance": analytics.hashtag_performance,
        "bestPostingTimes": analytics.best_posting_times,
        "totalPosts": analytics.metrics.total_posts,
    })))
}

/// GET /api/analytics/growth
pub async fn growth(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analytics = caller_analytics(&state, &auth)?;
    // Growth percentages stay static/mocked; only the raw counters move.
    Ok(Json(json!({
        "followersGained": analytics.metrics.followers_gained,
        "followingGained": analytics.metrics.following_gained,
        "reachGrowth": 15.2,
        "engagementGrowth": 8.5,
        "postsGrowth": 12.3,
        "dailyGrowth": analytics.daily_stats.iter().map(|day| json!({
            "date": day.date,
            "engagement": day.likes + day.comments + day.retweets,
        })).collect::<Vec<_>>(),
    })))
}

/// POST /api/analytics/update
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<AnalyticsUpdateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let action = AnalyticsAction::parse(&payload.action)
        .ok_or_else(|| ApiError::Validation(format!("Unknown action: {}", payload.action)))?;

    state.analytics.apply(auth.id, action);

    Ok(Json(json!({
        "message": "Analytics updated successfully",
        "action": payload.action,
        "timestamp": Utc::now(),
    })))
}
