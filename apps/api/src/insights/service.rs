//! Industry insight generation and cache lookup.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::insights::models::{IndustryInsight, InsightAnalysis};
use crate::insights::prompts::build_insight_prompt;
use crate::insights::store::InsightStore;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{generate_json, TextGenerator};

/// Asks the LLM for a fresh analysis of `industry`.
pub async fn generate_insight(
    generator: &dyn TextGenerator,
    industry: &str,
    now: DateTime<Utc>,
) -> Result<IndustryInsight, AppError> {
    let prompt = build_insight_prompt(industry);
    let analysis: InsightAnalysis = generate_json(generator, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Industry insight generation failed: {e}")))?;

    analysis
        .check()
        .map_err(|e| AppError::Llm(format!("Industry insight for '{industry}' rejected: {e}")))?;

    Ok(IndustryInsight::new(industry, analysis, now))
}

/// Returns the cached insight for `industry`, regenerating it when missing or past its
/// `next_update`.
pub async fn get_or_generate(
    store: &dyn InsightStore,
    generator: &dyn TextGenerator,
    industry: &str,
    now: DateTime<Utc>,
) -> Result<IndustryInsight, AppError> {
    let industry = industry.trim();
    if industry.is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }

    let cached = store
        .get(industry)
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;

    let stale = match cached {
        Some(insight) if !insight.is_stale(now) => return Ok(insight),
        Some(insight) => {
            info!(industry, "Cached insight is stale, regenerating");
            Some(insight)
        }
        None => {
            info!(industry, "No cached insight, generating");
            None
        }
    };

    let insight = match generate_insight(generator, industry, now).await {
        Ok(insight) => insight,
        Err(e) => match stale {
            // The stale copy stays cached; the next lookup retries.
            Some(previous) => {
                warn!(industry, error = %e, "Insight regeneration failed, serving stale copy");
                return Ok(previous);
            }
            None => return Err(e),
        },
    };
    store
        .put(&insight)
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    Ok(insight)
}
