use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    models::posts::{PostDto, UpdatePostDto},
    AppState, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/bulk", post(create_posts_bulk))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/{id}/like", post(like_post))
        .route("/{id}/share", post(share_post))
}

async fn list_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.list_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(new_post): Json<PostDto>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.create_post(new_post).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn create_posts_bulk(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(new_posts): Json<Vec<PostDto>>,
) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.create_posts_bulk(new_posts).await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Json(update_post): Json<UpdatePostDto>,
) -> Result<impl IntoResponse> {
    let updated_post = app_state
        .posts_service
        .update_post(post_id, update_post)
        .await?;

    Ok((StatusCode::OK, Json(updated_post)))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse> {
    app_state.posts_service.delete_post(post_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn like_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.like_post(post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn share_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.share_post(post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}
