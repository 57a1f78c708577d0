use crate::core::{JobStore, StoreError};
use crate::models::JobListing;
use crate::services::firestore::FirestoreClient;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache manager
///
/// L1 (in-memory) and L2 (Redis) caching, used to avoid re-scanning the job
/// listing collection on every recommendation request. L1 is fastest but
/// per-instance, L2 is shared across instances.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", key);

            let bytes = json.as_bytes().to_vec();
            self.l1_cache.insert(key.to_string(), bytes).await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache (both L1 and L2)
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        let bytes = json.as_bytes().to_vec();
        self.l1_cache.insert(key.to_string(), bytes).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Cache key for the full job listing scan
    pub fn jobs() -> String {
        "jobs:all".to_string()
    }
}

/// Job store wrapper that serves the listing scan from cache when possible
///
/// The cache is optional: with no Redis available the store degrades to
/// hitting Firestore directly, and cache write failures are logged, not
/// surfaced. Recommendation requests must never fail because of the cache.
#[derive(Clone)]
pub struct CachedJobStore {
    firestore: Arc<FirestoreClient>,
    cache: Option<Arc<CacheManager>>,
}

impl CachedJobStore {
    pub fn new(firestore: Arc<FirestoreClient>, cache: Option<Arc<CacheManager>>) -> Self {
        Self { firestore, cache }
    }

    /// Drop the cached job list, e.g. after a listing is created.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete(&CacheKey::jobs()).await {
                tracing::warn!("Failed to invalidate job cache: {}", e);
            }
        }
    }
}

#[async_trait]
impl JobStore for CachedJobStore {
    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError> {
        if let Some(cache) = &self.cache {
            if let Ok(jobs) = cache.get::<Vec<JobListing>>(&CacheKey::jobs()).await {
                return Ok(jobs);
            }
        }

        let jobs = self.firestore.list_job_listings().await.map_err(StoreError::from)?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&CacheKey::jobs(), &jobs).await {
                tracing::warn!("Failed to cache job listings: {}", e);
            }
        }

        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = "test_key";
        let value = "test_value";

        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await.unwrap();
        assert!(cache.get::<String>(key).await.is_err());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::jobs(), "jobs:all");
    }
}
