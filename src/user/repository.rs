use async_trait::async_trait;
use sqlx::PgPool;

use crate::user::model::User;
use crate::utils::error::CustomError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, username: &str, email: &str) -> Result<User, CustomError>;

    async fn find_all(&self) -> Result<Vec<User>, CustomError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, CustomError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CustomError>;

    /// Persists `username` and `email` for `user.id`. Returns `None` when the
    /// row no longer exists.
    async fn update(&self, user: &User) -> Result<Option<User>, CustomError>;

    /// Deletes the user and, through the foreign key, their posts.
    async fn delete(&self, id: i64) -> Result<bool, CustomError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, username: &str, email: &str) -> Result<User, CustomError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            RETURNING id, username, email, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, CustomError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, CustomError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CustomError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, CustomError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3
            WHERE id = $1
            RETURNING id, username, email, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, CustomError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
