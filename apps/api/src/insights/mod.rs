// Industry insights: LLM-generated market analysis per industry, cached and
// refreshed weekly. All LLM calls go through llm_client.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod refresh;
pub mod service;
pub mod store;

pub use store::{InsightStore, MemoryInsightStore, RedisInsightStore};
