pub mod cache;
pub mod db;
#[cfg(test)]
pub mod memory;
pub mod redis;

pub use cache::{Cache, MemoryCache};
pub use db::connect_to_postgres;
pub use self::redis::RedisCache;
