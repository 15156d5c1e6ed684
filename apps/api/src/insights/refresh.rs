//! Weekly insight refresher.
//!
//! Wakes every Sunday at 00:00 UTC and regenerates every cached industry. One
//! failing industry is logged and skipped; the rest still refresh.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::insights::service::generate_insight;
use crate::insights::store::InsightStore;
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshSummary {
    pub refreshed: Vec<String>,
    pub failed: Vec<String>,
}

/// The first Sunday 00:00 UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_ahead = 7 - i64::from(now.weekday().num_days_from_sunday());
    let date = now.date_naive() + Duration::days(days_ahead);
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Regenerates every cached industry once.
pub async fn refresh_all(
    store: &dyn InsightStore,
    generator: &dyn TextGenerator,
    now: DateTime<Utc>,
) -> RefreshSummary {
    let industries = match store.industries().await {
        Ok(industries) => industries,
        Err(e) => {
            warn!(error = %e, "Insight refresh: could not list industries");
            return RefreshSummary::default();
        }
    };

    let mut summary = RefreshSummary::default();
    for industry in industries {
        let result = match generate_insight(generator, &industry, now).await {
            Ok(insight) => store.put(&insight).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match result {
            Ok(()) => summary.refreshed.push(industry),
            Err(error) => {
                warn!(industry = %industry, error = %error, "Insight refresh failed");
                summary.failed.push(industry);
            }
        }
    }
    summary
}

/// Runs forever, refreshing all cached insights once a week.
pub async fn run_weekly_refresh(
    store: Arc<dyn InsightStore>,
    generator: Arc<dyn TextGenerator>,
) {
    loop {
        let now = Utc::now();
        let next = next_run_after(now);
        let wait = (next - now).to_std().unwrap_or_default();
        info!("Next industry insight refresh at {next}");
        tokio::time::sleep(wait).await;

        let summary = refresh_all(store.as_ref(), generator.as_ref(), Utc::now()).await;
        info!(
            refreshed = summary.refreshed.len(),
            failed = summary.failed.len(),
            "Industry insight refresh complete"
        );
    }
}
