use std::sync::Arc;

use tracing::debug;

use crate::{
    models::{
        comments::{Comment, CommentDto, NewComment, UpdateCommentDto},
        posts::Post,
    },
    repositories::comments_repo::CommentsRepository,
    Error, Result,
};

use super::posts::PostsService;

/// Comment operations. Every mutation refreshes the parent post's
/// `updated_at` and answers with the post re-read from the store,
/// comments included.
#[derive(Clone)]
pub struct CommentsService {
    posts: PostsService,
    comments: Arc<dyn CommentsRepository>,
}

impl CommentsService {
    pub fn new(posts: PostsService, comments: Arc<dyn CommentsRepository>) -> Self {
        Self { posts, comments }
    }

    /// Does not check that the post exists; an unknown post has no comments.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.comments.find_comments_by_post_id(post_id).await
    }

    pub async fn add_comment(&self, post_id: i64, dto: CommentDto) -> Result<Post> {
        if !self.posts.post_exists(post_id).await? {
            return Err(Error::NotFound);
        }

        let comment = self
            .comments
            .create_comment(&NewComment::from_dto(post_id, dto))
            .await?;
        debug!(post_id, comment_id = comment.id, "added comment");

        self.posts.touch_post(post_id).await
    }

    pub async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        dto: UpdateCommentDto,
    ) -> Result<Post> {
        let mut comment = self.find(post_id, comment_id).await?;
        comment.content = dto.content;
        self.comments.save_comment(&comment).await?;
        debug!(post_id, comment_id, "updated comment");

        self.posts.touch_post(post_id).await
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<Post> {
        let comment = self.find(post_id, comment_id).await?;
        self.comments.delete_comment(&comment).await?;
        debug!(post_id, comment_id, "deleted comment");

        self.posts.touch_post(post_id).await
    }

    pub async fn like_comment(&self, post_id: i64, comment_id: i64) -> Result<Post> {
        let mut comment = self.find(post_id, comment_id).await?;
        comment.like_count += 1;
        let comment = self.comments.save_comment(&comment).await?;
        debug!(post_id, comment_id, like_count = comment.like_count, "liked comment");

        self.posts.touch_post(post_id).await
    }

    /// A comment filed under another post is treated as missing.
    async fn find(&self, post_id: i64, comment_id: i64) -> Result<Comment> {
        if !self.posts.post_exists(post_id).await? {
            return Err(Error::NotFound);
        }

        self.comments
            .find_comment_by_id(comment_id)
            .await?
            .filter(|comment| comment.post_id == post_id)
            .ok_or(Error::NotFound)
    }
}
