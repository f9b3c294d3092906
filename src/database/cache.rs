//! Read-through cache used by the services.
//!
//! Stores implement [`CacheStore`] over plain strings; [`Cache`] layers JSON
//! (de)serialisation on top and downgrades every store failure to a warning so
//! a broken cache never fails a request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

pub const ALL_USERS_KEY: &str = "all_users";

pub fn post_key(id: i64) -> String {
    format!("post_{}", id)
}

pub fn user_posts_key(username: &str) -> String {
    format!("user_posts_{}", username)
}

pub fn user_key(id: i64) -> String {
    format!("user_{}", id)
}

pub fn username_key(username: &str) -> String {
    format!("user_username_{}", username)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    async fn set(&self, key: &str, value: &str) -> Result<(), String>;

    async fn delete(&self, key: &str) -> Result<(), String>;
}

#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    debug!("Cache hit: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Dropping undecodable cache entry {}: {}", key, e);
                    self.evict(key).await;
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, &json).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }

    pub async fn evict(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            warn!("Cache eviction failed for {}: {}", key, e);
        }
    }
}

/// In-process store used when no Redis URL is configured.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value.to_string(), now + self.ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
