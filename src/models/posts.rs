use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comments::Comment;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub username: String,
    #[serde(rename = "userImageUrl")]
    pub user_image_url: Option<String>,
    pub content: String,
    #[serde(rename = "likeCount")]
    pub like_count: i64,
    #[serde(rename = "shareCount")]
    pub share_count: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Filled from the comments index, never stored on the row.
    #[sqlx(skip)]
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A post that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub username: String,
    pub user_image_url: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn from_dto(dto: PostDto, created_at: DateTime<Utc>) -> Self {
        Self {
            username: dto.username,
            user_image_url: dto.user_image_url,
            content: dto.content,
            created_at,
        }
    }
}

/// Client-editable fields of a post, used for create and bulk create.
#[derive(Debug, Deserialize, Clone)]
pub struct PostDto {
    pub username: String,
    #[serde(rename = "userImageUrl", default)]
    pub user_image_url: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Fields left out of an update keep their stored value.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpdatePostDto {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "userImageUrl", default)]
    pub user_image_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
