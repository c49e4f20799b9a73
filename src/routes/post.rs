use crate::{
    auth::{AuthUser, OptionalAuthUser},
    dto::{
        BookmarkResponse, CreatePostRequest, CreatePostResponse, LikeResponse, MessageResponse,
        PaginationParams, PostListParams, PostListResponse, PostResponse, RetweetResponse,
        SearchResponse, paginate,
    },
    errors::ApiError,
    models::Post,
    states::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

/// GET /api/posts?page&limit&sort
pub async fn list_posts(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Query(params): Query<PostListParams>,
) -> Json<PostListResponse> {
    let posts = state.posts.sorted(params.sort);
    let (page, pagination) = paginate(&posts, params.page, params.limit);
    Json(PostListResponse {
        posts: page
            .iter()
            .map(|post| PostResponse::for_viewer(post, viewer))
            .collect(),
        pagination,
    })
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.posts.get(&id).ok_or(ApiError::NotFound("Post"))?;
    Ok(Json(PostResponse::for_viewer(&post, viewer)))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let content = payload.content.trim().to_owned();
    if content.is_empty() {
        return Err(ApiError::InvalidContent);
    }

    let author = state.users.get(&auth.id).ok_or(ApiError::InvalidToken)?;
    let post = Post::new(
        author.snapshot(),
        content,
        payload.media,
        payload.hashtags,
        payload.mentions,
    );
    let response = PostResponse::for_viewer(&post, Some(auth.id));

    info!("Post created: {} by user {}", post.id, auth.id);
    state.posts.insert(post);

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully".to_owned(),
            post: response,
        }),
    ))
}

/// POST /api/posts/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    let (is_liked, total_likes) = state.posts.toggle_like(&id, auth.id)?;
    Ok(Json(LikeResponse {
        message: if is_liked { "Post liked" } else { "Post unliked" }.to_owned(),
        is_liked,
        total_likes,
    }))
}

/// POST /api/posts/{id}/retweet
pub async fn toggle_retweet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RetweetResponse>, ApiError> {
    let (is_retweeted, total_retweets) = state.posts.toggle_retweet(&id, auth.id)?;
    Ok(Json(RetweetResponse {
        message: if is_retweeted {
            "Post retweeted"
        } else {
            "Post unretweeted"
        }
        .to_owned(),
        is_retweeted,
        total_retweets,
    }))
}

/// POST /api/posts/{id}/bookmark
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let is_bookmarked = state.posts.toggle_bookmark(&id, auth.id)?;
    Ok(Json(BookmarkResponse {
        message: if is_bookmarked {
            "Post bookmarked"
        } else {
            "Post unbookmarked"
        }
        .to_owned(),
        is_bookmarked,
    }))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.posts.delete(&id, auth.id)?;
    info!("Post deleted: {} by user {}", id, auth.id);
    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_owned(),
    }))
}

/// GET /api/posts/search/{query}?page&limit
pub async fn search_posts(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(query): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = query.trim();
    if term.is_empty() {
        return Err(ApiError::InvalidQuery);
    }

    let matches = state.posts.search(term);
    let (page, pagination) = paginate(&matches, params.page, params.limit);
    Ok(Json(SearchResponse {
        posts: page
            .iter()
            .map(|post| PostResponse::for_viewer(post, viewer))
            .collect(),
        query: term.to_lowercase(),
        pagination,
    }))
}
