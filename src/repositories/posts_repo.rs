use async_trait::async_trait;

use crate::{
    models::posts::{NewPost, Post},
    Error, Result,
};

use super::PostgresRepo;

#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn find_all_posts(&self) -> Result<Vec<Post>>;
    async fn find_post_by_id(&self, post_id: i64) -> Result<Option<Post>>;
    async fn post_exists(&self, post_id: i64) -> Result<bool>;
    async fn create_post(&self, post: &NewPost) -> Result<Post>;
    /// Inserts the whole batch or nothing.
    async fn create_posts(&self, posts: &[NewPost]) -> Result<Vec<Post>>;
    /// Writes every mutable column of an existing post. `created_at` is never touched.
    async fn save_post(&self, post: &Post) -> Result<Post>;
    async fn delete_post_by_id(&self, post_id: i64) -> Result<()>;
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    async fn find_all_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, username, user_image_url, content, like_count, share_count, created_at, updated_at
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn find_post_by_id(&self, post_id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, username, user_image_url, content, like_count, share_count, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn post_exists(&self, post_id: i64) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (username, user_image_url, content, like_count, share_count, created_at, updated_at)
            VALUES ($1, $2, $3, 0, 0, $4, $4)
            RETURNING id, username, user_image_url, content, like_count, share_count, created_at, updated_at
            "#,
        )
        .bind(&post.username)
        .bind(&post.user_image_url)
        .bind(&post.content)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn create_posts(&self, posts: &[NewPost]) -> Result<Vec<Post>> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(posts.len());

        for post in posts {
            let post = sqlx::query_as::<_, Post>(
                r#"
                INSERT INTO posts (username, user_image_url, content, like_count, share_count, created_at, updated_at)
                VALUES ($1, $2, $3, 0, 0, $4, $4)
                RETURNING id, username, user_image_url, content, like_count, share_count, created_at, updated_at
                "#,
            )
            .bind(&post.username)
            .bind(&post.user_image_url)
            .bind(&post.content)
            .bind(post.created_at)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(post);
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn save_post(&self, post: &Post) -> Result<Post> {
        let saved = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET username = $2,
                user_image_url = $3,
                content = $4,
                like_count = $5,
                share_count = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING id, username, user_image_url, content, like_count, share_count, created_at, updated_at
            "#,
        )
        .bind(post.id)
        .bind(&post.username)
        .bind(&post.user_image_url)
        .bind(&post.content)
        .bind(post.like_count)
        .bind(post.share_count)
        .bind(post.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        // The row can vanish between the caller's read and this write.
        saved.ok_or(Error::NotFound)
    }

    async fn delete_post_by_id(&self, post_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
