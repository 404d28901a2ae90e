use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::{
    models::comments::{CommentDto, UpdateCommentDto},
    AppState, Result,
};

// Parameter names must line up with the post routes they are merged with.
pub fn comments_handler() -> Router {
    Router::new()
        .route("/{id}/comments", get(list_comments).post(add_comment))
        .route(
            "/{id}/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
        .route("/{id}/comments/{comment_id}/like", post(like_comment))
}

async fn list_comments(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let comments = app_state.comments_service.list_comments(post_id).await?;

    Ok((StatusCode::OK, Json(comments)))
}

async fn add_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Json(new_comment): Json<CommentDto>,
) -> Result<impl IntoResponse> {
    let post = app_state
        .comments_service
        .add_comment(post_id, new_comment)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn update_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(update_comment): Json<UpdateCommentDto>,
) -> Result<impl IntoResponse> {
    let post = app_state
        .comments_service
        .update_comment(post_id, comment_id, update_comment)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn delete_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let post = app_state
        .comments_service
        .delete_comment(post_id, comment_id)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn like_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let post = app_state
        .comments_service
        .like_comment(post_id, comment_id)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}
