mod config;
mod cover_letter;
mod errors;
mod insights;
mod interview;
mod layout;
mod llm_client;
mod profile;
mod render;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::insights::refresh::run_weekly_refresh;
use crate::insights::{InsightStore, MemoryInsightStore, RedisInsightStore};
use crate::layout::PageConfig;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    let llm: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(config.gemini_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let insights: Arc<dyn InsightStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Insight cache: redis");
            Arc::new(RedisInsightStore::new(client))
        }
        None => {
            info!("Insight cache: in-memory (REDIS_URL not set)");
            Arc::new(MemoryInsightStore::new())
        }
    };

    if config.insight_refresh {
        tokio::spawn(run_weekly_refresh(insights.clone(), llm.clone()));
        info!("Weekly insight refresh scheduled");
    }

    let page_config = PageConfig::default();
    info!(
        "PDF page config: {}x{}mm, {}pt body",
        page_config.page_width_mm, page_config.page_height_mm, page_config.body_size_pt
    );

    let state = AppState {
        llm,
        insights,
        config: Arc::new(config.clone()),
        page_config: Arc::new(page_config),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
