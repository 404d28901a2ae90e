use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    models::posts::{NewPost, Post, PostDto, UpdatePostDto},
    repositories::{comments_repo::CommentsRepository, posts_repo::PostsRepository},
    Error, Result,
};

use super::{now, refreshed};

#[derive(Clone)]
pub struct PostsService {
    posts: Arc<dyn PostsRepository>,
    comments: Arc<dyn CommentsRepository>,
}

impl PostsService {
    pub fn new(posts: Arc<dyn PostsRepository>, comments: Arc<dyn CommentsRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.find_all_posts().await?;
        let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();

        let mut by_post: HashMap<i64, Vec<_>> = HashMap::new();
        for comment in self.comments.find_comments_by_post_ids(&ids).await? {
            by_post.entry(comment.post_id).or_default().push(comment);
        }
        for post in &mut posts {
            post.comments = by_post.remove(&post.id).unwrap_or_default();
        }

        Ok(posts)
    }

    pub async fn create_post(&self, dto: PostDto) -> Result<Post> {
        let post = self.posts.create_post(&NewPost::from_dto(dto, now())).await?;
        debug!(post_id = post.id, "created post");
        Ok(post)
    }

    /// Every post in the batch shares one timestamp.
    pub async fn create_posts_bulk(&self, dtos: Vec<PostDto>) -> Result<Vec<Post>> {
        let created_at = now();
        let batch: Vec<NewPost> = dtos
            .into_iter()
            .map(|dto| NewPost::from_dto(dto, created_at))
            .collect();

        let posts = self.posts.create_posts(&batch).await?;
        debug!(count = posts.len(), "created posts in bulk");
        Ok(posts)
    }

    /// Reads a post together with its comments.
    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        let post = self.find(post_id).await?;
        self.with_comments(post).await
    }

    pub async fn update_post(&self, post_id: i64, dto: UpdatePostDto) -> Result<Post> {
        let mut post = self.find(post_id).await?;
        if let Some(content) = dto.content {
            post.content = content;
        }
        if let Some(username) = dto.username {
            post.username = username;
        }
        if dto.user_image_url.is_some() {
            post.user_image_url = dto.user_image_url;
        }
        post.updated_at = refreshed(post.updated_at);

        let post = self.posts.save_post(&post).await?;
        debug!(post_id, "updated post");
        self.with_comments(post).await
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        if !self.posts.post_exists(post_id).await? {
            return Err(Error::NotFound);
        }

        self.posts.delete_post_by_id(post_id).await?;
        debug!(post_id, "deleted post");
        Ok(())
    }

    pub async fn like_post(&self, post_id: i64) -> Result<Post> {
        let mut post = self.find(post_id).await?;
        post.like_count += 1;
        post.updated_at = refreshed(post.updated_at);

        let post = self.posts.save_post(&post).await?;
        debug!(post_id, like_count = post.like_count, "liked post");
        self.with_comments(post).await
    }

    pub async fn share_post(&self, post_id: i64) -> Result<Post> {
        let mut post = self.find(post_id).await?;
        post.share_count += 1;
        post.updated_at = refreshed(post.updated_at);

        let post = self.posts.save_post(&post).await?;
        debug!(post_id, share_count = post.share_count, "shared post");
        self.with_comments(post).await
    }

    /// Refreshes `updated_at` after a change to one of the post's comments
    /// and returns the post re-read with its comments.
    pub async fn touch_post(&self, post_id: i64) -> Result<Post> {
        let mut post = self.find(post_id).await?;
        post.updated_at = refreshed(post.updated_at);

        let post = self.posts.save_post(&post).await?;
        self.with_comments(post).await
    }

    pub async fn post_exists(&self, post_id: i64) -> Result<bool> {
        self.posts.post_exists(post_id).await
    }

    async fn find(&self, post_id: i64) -> Result<Post> {
        self.posts
            .find_post_by_id(post_id)
            .await?
            .ok_or(Error::NotFound)
    }

    async fn with_comments(&self, mut post: Post) -> Result<Post> {
        post.comments = self.comments.find_comments_by_post_id(post.id).await?;
        Ok(post)
    }
}
