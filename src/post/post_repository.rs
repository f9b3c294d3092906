use async_trait::async_trait;
use sqlx::PgPool;

use crate::post::post_model::{NewPost, Post, PostRow, UpdatePostRequest};
use crate::utils::error::CustomError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, user_id: i64, post: &NewPost) -> Result<Post, CustomError>;

    /// Inserts every post or none of them.
    async fn insert_many(&self, user_id: i64, posts: &[NewPost]) -> Result<Vec<Post>, CustomError>;

    async fn find_all(&self) -> Result<Vec<Post>, CustomError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, CustomError>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Post>, CustomError>;

    async fn find_by_username(&self, username: &str) -> Result<Vec<Post>, CustomError>;

    /// Applies the supplied title/text; `None` when the post does not exist.
    async fn update(
        &self,
        id: i64,
        changes: &UpdatePostRequest,
    ) -> Result<Option<Post>, CustomError>;

    async fn delete(&self, id: i64) -> Result<bool, CustomError>;
}

const SELECT_POSTS: &str = r#"
    SELECT p.id, p.title, p.text, p.publishing_date,
           u.id AS user_id, u.username, u.email
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

const INSERT_POST: &str = r#"
    WITH inserted AS (
        INSERT INTO posts (title, text, publishing_date, user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, text, publishing_date, user_id
    )
    SELECT i.id, i.title, i.text, i.publishing_date,
           u.id AS user_id, u.username, u.email
    FROM inserted i
    JOIN users u ON u.id = i.user_id
"#;

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn insert(&self, user_id: i64, post: &NewPost) -> Result<Post, CustomError> {
        let row = sqlx::query_as::<_, PostRow>(INSERT_POST)
            .bind(&post.title)
            .bind(&post.text)
            .bind(post.publishing_date)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn insert_many(&self, user_id: i64, posts: &[NewPost]) -> Result<Vec<Post>, CustomError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(posts.len());

        for post in posts {
            let row = sqlx::query_as::<_, PostRow>(INSERT_POST)
                .bind(&post.title)
                .bind(&post.text)
                .bind(post.publishing_date)
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row.into());
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Post>, CustomError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} ORDER BY p.id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, CustomError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Post::from))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Post>, CustomError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{SELECT_POSTS} WHERE p.user_id = $1 ORDER BY p.id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Post>, CustomError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{SELECT_POSTS} WHERE u.username = $1 ORDER BY p.id"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        changes: &UpdatePostRequest,
    ) -> Result<Option<Post>, CustomError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET title = COALESCE($2, title), text = COALESCE($3, text)
                WHERE id = $1
                RETURNING id, title, text, publishing_date, user_id
            )
            SELECT up.id, up.title, up.text, up.publishing_date,
                   u.id AS user_id, u.username, u.email
            FROM updated up
            JOIN users u ON u.id = up.user_id
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.text.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, CustomError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
