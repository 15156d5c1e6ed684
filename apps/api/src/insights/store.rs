//! Insight cache backends.
//!
//! The Redis store keeps one JSON document per industry under `insight:{industry}`
//! and the set of known industries under `insight:industries`, which the weekly
//! refresher walks.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::Client as RedisClient;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::insights::models::IndustryInsight;

const KEY_PREFIX: &str = "insight:";
const INDUSTRIES_KEY: &str = "insight:industries";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt cached insight: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait InsightStore: Send + Sync {
    async fn get(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError>;

    /// Inserts or replaces the insight for `insight.industry`.
    async fn put(&self, insight: &IndustryInsight) -> Result<(), StoreError>;

    /// Every industry with a cached insight, sorted.
    async fn industries(&self) -> Result<Vec<String>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store used when no Redis URL is configured.
#[derive(Default)]
pub struct MemoryInsightStore {
    inner: RwLock<HashMap<String, IndustryInsight>>,
}

impl MemoryInsightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InsightStore for MemoryInsightStore {
    async fn get(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError> {
        Ok(self.inner.read().await.get(industry).cloned())
    }

    async fn put(&self, insight: &IndustryInsight) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .insert(insight.industry.clone(), insight.clone());
        Ok(())
    }

    async fn industries(&self) -> Result<Vec<String>, StoreError> {
        let mut industries: Vec<String> = self.inner.read().await.keys().cloned().collect();
        industries.sort();
        Ok(industries)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisInsightStore {
    client: RedisClient,
}

impl RedisInsightStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

fn insight_key(industry: &str) -> String {
    format!("{KEY_PREFIX}{industry}")
}

#[async_trait]
impl InsightStore for RedisInsightStore {
    async fn get(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(insight_key(industry))
            .query_async(&mut conn)
            .await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, insight: &IndustryInsight) -> Result<(), StoreError> {
        let json = serde_json::to_string(insight)?;
        let mut conn = self.connection().await?;
        redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(insight_key(&insight.industry))
            .arg(json)
            .ignore()
            .cmd("SADD")
            .arg(INDUSTRIES_KEY)
            .arg(&insight.industry)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!(industry = %insight.industry, "Cached industry insight in Redis");
        Ok(())
    }

    async fn industries(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connection().await?;
        let mut industries: Vec<String> = redis::cmd("SMEMBERS")
            .arg(INDUSTRIES_KEY)
            .query_async(&mut conn)
            .await?;
        industries.sort();
        Ok(industries)
    }
}
