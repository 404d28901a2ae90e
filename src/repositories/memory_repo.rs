use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::error;

use crate::{
    models::{
        comments::{Comment, NewComment},
        posts::{NewPost, Post},
    },
    Error, Result,
};

use super::{comments_repo::CommentsRepository, posts_repo::PostsRepository};

/// In-process store with the same observable semantics as the Postgres schema:
/// ids count up from 1, comments need an existing post, and deleting a
/// post removes its comments.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Tables {
    fn insert_post(&mut self, post: &NewPost) -> Post {
        self.last_post_id += 1;
        let post = Post {
            id: self.last_post_id,
            username: post.username.clone(),
            user_image_url: post.user_image_url.clone(),
            content: post.content.clone(),
            like_count: 0,
            share_count: 0,
            created_at: post.created_at,
            updated_at: post.created_at,
            comments: Vec::new(),
        };
        self.posts.insert(post.id, post.clone());
        post
    }
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostsRepository for MemoryRepo {
    async fn find_all_posts(&self) -> Result<Vec<Post>> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }

    async fn find_post_by_id(&self, post_id: i64) -> Result<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&post_id).cloned())
    }

    async fn post_exists(&self, post_id: i64) -> Result<bool> {
        Ok(self.tables.read().await.posts.contains_key(&post_id))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        Ok(self.tables.write().await.insert_post(post))
    }

    async fn create_posts(&self, posts: &[NewPost]) -> Result<Vec<Post>> {
        let mut tables = self.tables.write().await;
        Ok(posts.iter().map(|post| tables.insert_post(post)).collect())
    }

    async fn save_post(&self, post: &Post) -> Result<Post> {
        let mut tables = self.tables.write().await;
        let stored = tables.posts.get_mut(&post.id).ok_or(Error::NotFound)?;

        stored.username = post.username.clone();
        stored.user_image_url = post.user_image_url.clone();
        stored.content = post.content.clone();
        stored.like_count = post.like_count;
        stored.share_count = post.share_count;
        stored.updated_at = post.updated_at;

        Ok(stored.clone())
    }

    async fn delete_post_by_id(&self, post_id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&post_id);
        tables.comments.retain(|_, comment| comment.post_id != post_id);
        Ok(())
    }
}

#[async_trait]
impl CommentsRepository for MemoryRepo {
    async fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.find_comments_by_post_ids(&[post_id]).await
    }

    async fn find_comments_by_post_ids(&self, post_ids: &[i64]) -> Result<Vec<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|comment| post_ids.contains(&comment.post_id))
            .cloned()
            .collect())
    }

    async fn find_comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>> {
        Ok(self.tables.read().await.comments.get(&comment_id).cloned())
    }

    /// A missing parent post fails with `InternalServerError` where Postgres
    /// raises a foreign-key `DatabaseError`; both render as a 500.
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            error!(post_id = comment.post_id, "comment references a missing post");
            return Err(Error::InternalServerError);
        }

        tables.last_comment_id += 1;
        let comment = Comment {
            id: tables.last_comment_id,
            post_id: comment.post_id,
            username: comment.username.clone(),
            user_image_url: comment.user_image_url.clone(),
            content: comment.content.clone(),
            like_count: 0,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn save_comment(&self, comment: &Comment) -> Result<Comment> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(Error::NotFound)?;

        stored.username = comment.username.clone();
        stored.user_image_url = comment.user_image_url.clone();
        stored.content = comment.content.clone();
        stored.like_count = comment.like_count;

        Ok(stored.clone())
    }

    async fn delete_comment(&self, comment: &Comment) -> Result<()> {
        self.tables.write().await.comments.remove(&comment.id);
        Ok(())
    }
}
