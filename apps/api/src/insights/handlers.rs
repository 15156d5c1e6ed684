//! Axum route handlers for the Insights API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::insights::models::{humanize_distance, IndustryInsight, SalaryPoint};
use crate::insights::service::get_or_generate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    pub industry: String,
}

/// Insight plus the derived values the dashboard displays.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    #[serde(flatten)]
    pub insight: IndustryInsight,
    pub salary_chart: Vec<SalaryPoint>,
    /// `dd/MM/yyyy`
    pub last_updated_display: String,
    pub next_update_distance: String,
}

impl InsightResponse {
    pub fn from_insight(insight: IndustryInsight) -> Self {
        let now = Utc::now();
        Self {
            salary_chart: insight.salary_chart(),
            last_updated_display: insight.last_updated.format("%d/%m/%Y").to_string(),
            next_update_distance: humanize_distance(now, insight.next_update),
            insight,
        }
    }
}

/// GET /api/v1/insights?industry=...
pub async fn handle_get_insight(
    State(state): State<AppState>,
    Query(query): Query<InsightQuery>,
) -> Result<Json<InsightResponse>, AppError> {
    let insight = get_or_generate(
        state.insights.as_ref(),
        state.llm.as_ref(),
        &query.industry,
        Utc::now(),
    )
    .await?;

    Ok(Json(InsightResponse::from_insight(insight)))
}
