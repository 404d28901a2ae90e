use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "postId")]
    pub post_id: i64,
    pub username: String,
    #[serde(rename = "userImageUrl")]
    pub user_image_url: Option<String>,
    pub content: String,
    #[serde(rename = "likeCount")]
    pub like_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub username: String,
    pub user_image_url: Option<String>,
    pub content: String,
}

impl NewComment {
    pub fn from_dto(post_id: i64, dto: CommentDto) -> Self {
        Self {
            post_id,
            username: dto.username,
            user_image_url: dto.user_image_url,
            content: dto.content,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommentDto {
    pub username: String,
    #[serde(rename = "userImageUrl", default)]
    pub user_image_url: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Only the content of a comment can be edited.
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateCommentDto {
    #[serde(default)]
    pub content: String,
}
