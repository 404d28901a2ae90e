use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{comments::comments_handler, posts::posts_handler},
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/posts", posts_handler().merge(comments_handler()))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_route)
        .layer(configure_cors())
}

pub fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::repositories::memory_repo::MemoryRepo;

    use super::*;

    fn app() -> Router {
        create_routes(Arc::new(AppState::new(Arc::new(MemoryRepo::new()))))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, username: &str, content: &str) -> Value {
        let response = send(
            app,
            Method::POST,
            "/api/posts",
            Some(json!({ "username": username, "content": content })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_then_get_post() {
        let app = app();
        let created = create(&app, "ana", "hello").await;
        let id = created["id"].as_i64().unwrap();

        let response = send(&app, Method::GET, &format!("/api/posts/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let post = json_body(response).await;
        assert_eq!(post["username"], "ana");
        assert_eq!(post["content"], "hello");
        assert_eq!(post["likeCount"], 0);
        assert_eq!(post["shareCount"], 0);
        assert_eq!(post["createdAt"], post["updatedAt"]);
        assert_eq!(post["comments"], json!([]));
    }

    #[tokio::test]
    async fn list_posts_includes_comments() {
        let app = app();
        let first = create(&app, "ana", "one").await;
        create(&app, "bo", "two").await;
        let id = first["id"].as_i64().unwrap();
        send(
            &app,
            Method::POST,
            &format!("/api/posts/{id}/comments"),
            Some(json!({ "username": "cy", "content": "nice" })),
        )
        .await;

        let response = send(&app, Method::GET, "/api/posts", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let posts = json_body(response).await;
        let posts = posts.as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["comments"].as_array().unwrap().len(), 1);
        assert_eq!(posts[1]["comments"], json!([]));
    }

    #[tokio::test]
    async fn bulk_create_returns_distinct_ids_with_one_timestamp() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/posts/bulk",
            Some(json!([{ "username": "a" }, { "username": "b" }])),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let posts = json_body(response).await;
        assert_eq!(posts.as_array().unwrap().len(), 2);
        assert_ne!(posts[0]["id"], posts[1]["id"]);
        assert_eq!(posts[0]["createdAt"], posts[1]["createdAt"]);
    }

    #[tokio::test]
    async fn like_and_share_post() {
        let app = app();
        let id = create(&app, "ana", "x").await["id"].as_i64().unwrap();

        send(&app, Method::POST, &format!("/api/posts/{id}/like"), None).await;
        let uri = format!("/api/posts/{id}/like");
        let liked = json_body(send(&app, Method::POST, &uri, None).await).await;
        assert_eq!(liked["likeCount"], 2);

        let uri = format!("/api/posts/{id}/share");
        let shared = json_body(send(&app, Method::POST, &uri, None).await).await;
        assert_eq!(shared["shareCount"], 1);
        assert_eq!(shared["likeCount"], 2);
    }

    #[tokio::test]
    async fn update_post_keeps_counters() {
        let app = app();
        let created = create(&app, "ana", "draft").await;
        let id = created["id"].as_i64().unwrap();
        send(&app, Method::POST, &format!("/api/posts/{id}/like"), None).await;

        let response = send(
            &app,
            Method::PUT,
            &format!("/api/posts/{id}"),
            Some(json!({ "username": "ana", "content": "final", "likeCount": 99 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let updated = json_body(response).await;
        assert_eq!(updated["content"], "final");
        assert_eq!(updated["likeCount"], 1);
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert_ne!(updated["updatedAt"], created["updatedAt"]);
    }

    #[tokio::test]
    async fn update_post_accepts_body_without_username() {
        let app = app();
        let id = create(&app, "ana", "draft").await["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::PUT,
            &format!("/api/posts/{id}"),
            Some(json!({ "content": "edited" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let updated = json_body(response).await;
        assert_eq!(updated["content"], "edited");
        assert_eq!(updated["username"], "ana");

        let response = send(
            &app,
            Method::PUT,
            "/api/posts/999",
            Some(json!({ "content": "edited" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn add_comment_refreshes_post_updated_at() {
        let app = app();
        let created = create(&app, "ana", "x").await;
        let id = created["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::POST,
            &format!("/api/posts/{id}/comments"),
            Some(json!({ "username": "bo", "content": "nice" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let post = json_body(response).await;
        assert_ne!(post["updatedAt"], created["updatedAt"]);
        assert_eq!(post["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn delete_post_returns_no_content_then_not_found() {
        let app = app();
        let id = create(&app, "ana", "x").await["id"].as_i64().unwrap();

        let response = send(&app, Method::DELETE, &format!("/api/posts/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, &format!("/api/posts/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, &format!("/api/posts/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_post_is_empty_404() {
        let app = app();
        for (method, uri) in [
            (Method::GET, "/api/posts/41"),
            (Method::POST, "/api/posts/41/like"),
            (Method::POST, "/api/posts/41/share"),
        ] {
            let response = send(&app, method, uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn comment_lifecycle_returns_parent_post() {
        let app = app();
        let id = create(&app, "ana", "x").await["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::POST,
            &format!("/api/posts/{id}/comments"),
            Some(json!({
                "username": "bo",
                "userImageUrl": "https://img/bo.png",
                "content": "nice",
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let post = json_body(response).await;
        assert_eq!(post["id"], id);
        assert_eq!(post["comments"][0]["likeCount"], 0);
        assert_eq!(post["comments"][0]["postId"], id);
        let comment_id = post["comments"][0]["id"].as_i64().unwrap();

        let post = json_body(
            send(
                &app,
                Method::PUT,
                &format!("/api/posts/{id}/comments/{comment_id}"),
                Some(json!({ "content": "edited" })),
            )
            .await,
        )
        .await;
        assert_eq!(post["comments"][0]["content"], "edited");
        assert_eq!(post["comments"][0]["username"], "bo");

        let post = json_body(
            send(
                &app,
                Method::POST,
                &format!("/api/posts/{id}/comments/{comment_id}/like"),
                None,
            )
            .await,
        )
        .await;
        assert_eq!(post["comments"][0]["likeCount"], 1);

        let uri = format!("/api/posts/{id}/comments");
        let comments = json_body(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(comments.as_array().unwrap().len(), 1);

        let response = send(
            &app,
            Method::DELETE,
            &format!("/api/posts/{id}/comments/{comment_id}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["comments"], json!([]));
    }

    #[tokio::test]
    async fn comment_routes_report_missing_entities() {
        let app = app();
        let id = create(&app, "ana", "x").await["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::POST,
            "/api/posts/77/comments",
            Some(json!({ "username": "bo", "content": "nice" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let uri = format!("/api/posts/{id}/comments/5/like");
        let response = send(&app, Method::POST, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, "/api/posts/77/comments/5", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::GET, "/api/posts/77/comments", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/posts")
            .header(header::ORIGIN, "https://feed.example")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
