use async_trait::async_trait;

use crate::{
    models::comments::{Comment, NewComment},
    Error, Result,
};

use super::PostgresRepo;

#[async_trait]
pub trait CommentsRepository: Sync + Send {
    async fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>>;
    async fn find_comments_by_post_ids(&self, post_ids: &[i64]) -> Result<Vec<Comment>>;
    async fn find_comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>>;
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;
    async fn save_comment(&self, comment: &Comment) -> Result<Comment>;
    async fn delete_comment(&self, comment: &Comment) -> Result<()>;
}

#[async_trait]
impl CommentsRepository for PostgresRepo {
    async fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, username, user_image_url, content, like_count
            FROM comments
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn find_comments_by_post_ids(&self, post_ids: &[i64]) -> Result<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, username, user_image_url, content, like_count
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY post_id, id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn find_comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, username, user_image_url, content, like_count
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, username, user_image_url, content, like_count)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING id, post_id, username, user_image_url, content, like_count
            "#,
        )
        .bind(comment.post_id)
        .bind(&comment.username)
        .bind(&comment.user_image_url)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn save_comment(&self, comment: &Comment) -> Result<Comment> {
        let saved = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET username = $2,
                user_image_url = $3,
                content = $4,
                like_count = $5
            WHERE id = $1
            RETURNING id, post_id, username, user_image_url, content, like_count
            "#,
        )
        .bind(comment.id)
        .bind(&comment.username)
        .bind(&comment.user_image_url)
        .bind(&comment.content)
        .bind(comment.like_count)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or(Error::NotFound)
    }

    async fn delete_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
