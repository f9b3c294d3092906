use std::sync::Arc;

use actix_web::HttpServer;
use env_logger::Env;
use log::{info, warn};

mod database;
mod frontend;
mod middleware;
mod post;
mod router;
mod status;
mod user;
mod utils;

use database::cache::CacheStore;
use database::{Cache, MemoryCache, RedisCache, connect_to_postgres};
use post::post_repository::PgPostRepository;
use router::index::{AppState, build_app};
use user::repository::PgUserRepository;
use utils::config::AppConfig;

async fn init_cache(config: &AppConfig) -> Cache {
    let store: Arc<dyn CacheStore> = match &config.redis_url {
        Some(url) => match RedisCache::init(url, config.cache_ttl_seconds).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                warn!("{}; falling back to in-process cache", e);
                Arc::new(MemoryCache::new(config.cache_ttl_seconds))
            }
        },
        None => {
            info!("REDIS_URL not set, using in-process cache");
            Arc::new(MemoryCache::new(config.cache_ttl_seconds))
        }
    };

    Cache::new(store)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = connect_to_postgres(&config)
        .await
        .map_err(std::io::Error::other)?;
    let cache = init_cache(&config).await;

    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPostRepository::new(pool)),
        cache,
    );

    info!(
        "Starting {} on http://{}:{}",
        config.service_name, config.host, config.port
    );

    HttpServer::new(move || build_app(state.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    info!("Server has stopped");

    Ok(())
}
