use async_trait::async_trait;
use log::info;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::database::cache::CacheStore;

/// Redis-backed cache store. Keys are namespaced under `cache:` and expire
/// after the configured TTL.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    pub async fn init(redis_url: &str, ttl_seconds: u64) -> Result<Self, String> {
        let client = Client::open(redis_url)
            .map_err(|e| format!("Failed to create Redis client: {}", e))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| format!("Failed to connect to Redis: {}", e))?;

        info!("Connected successfully to Redis");

        Ok(Self {
            connection,
            ttl_seconds,
        })
    }

    fn cache_key(key: &str) -> String {
        format!("cache:{}", key)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let mut conn = self.connection.clone();

        conn.get(Self::cache_key(key))
            .await
            .map_err(|e| format!("Failed to get cache: {}", e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut conn = self.connection.clone();

        conn.set_ex::<_, _, ()>(Self::cache_key(key), value, self.ttl_seconds)
            .await
            .map_err(|e| format!("Failed to set cache: {}", e))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut conn = self.connection.clone();

        conn.del::<_, ()>(Self::cache_key(key))
            .await
            .map_err(|e| format!("Failed to delete cache: {}", e))
    }
}
