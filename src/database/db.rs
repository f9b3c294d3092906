use log::info;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::utils::config::AppConfig;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn init(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        // Ping the server before handing the pool out
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("Connected successfully to PostgreSQL");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        info!("Database migrations applied");

        Ok(Self { pool })
    }
}

pub async fn connect_to_postgres(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let database = Database::init(config).await?;
    Ok(database.pool)
}
