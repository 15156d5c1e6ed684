//! Axum route handler for onboarding.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::insights::handlers::InsightResponse;
use crate::insights::service::get_or_generate;
use crate::profile::{build_profile, CareerProfile, OnboardingRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub profile: CareerProfile,
    pub industry_insight: InsightResponse,
}

/// POST /api/v1/onboarding
///
/// Validates the onboarding form and makes sure an insight exists for the chosen industry.
pub async fn handle_onboarding(
    State(state): State<AppState>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, AppError> {
    let profile = build_profile(&request).map_err(AppError::InvalidFields)?;
    let industry = profile.industry.clone().unwrap_or_default();

    let insight = get_or_generate(
        state.insights.as_ref(),
        state.llm.as_ref(),
        &industry,
        Utc::now(),
    )
    .await?;
    info!(industry = %industry, "Onboarding complete");

    Ok(Json(OnboardingResponse {
        profile,
        industry_insight: InsightResponse::from_insight(insight),
    }))
}
