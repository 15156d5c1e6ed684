use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an insight stays fresh before it is regenerated.
pub const REFRESH_INTERVAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandLevel {
    #[serde(alias = "High", alias = "high")]
    High,
    #[serde(alias = "Medium", alias = "medium")]
    Medium,
    #[serde(alias = "Low", alias = "low")]
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketOutlook {
    #[serde(alias = "Positive", alias = "positive")]
    Positive,
    #[serde(alias = "Neutral", alias = "neutral")]
    Neutral,
    #[serde(alias = "Negative", alias = "negative")]
    Negative,
}

/// Annual salary band for one role, in whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    #[serde(alias = "medium")]
    pub median: f64,
    pub location: String,
}

/// The market analysis the LLM produces for one industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightAnalysis {
    pub salary_ranges: Vec<SalaryRange>,
    /// Yearly growth, in percent.
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    #[serde(alias = "recommendSkills")]
    pub recommended_skills: Vec<String>,
}

impl InsightAnalysis {
    /// Rejects analyses the dashboard cannot display.
    pub fn check(&self) -> Result<(), String> {
        if self.salary_ranges.is_empty() {
            return Err("analysis has no salary ranges".to_string());
        }
        if !self.growth_rate.is_finite() {
            return Err("growth rate is not a number".to_string());
        }
        if let Some(range) = self
            .salary_ranges
            .iter()
            .find(|r| r.min > r.max || r.min < 0.0)
        {
            return Err(format!("salary range for '{}' is inverted", range.role));
        }
        Ok(())
    }
}

/// Cached market analysis for one industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsight {
    pub industry: String,
    #[serde(flatten)]
    pub analysis: InsightAnalysis,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl IndustryInsight {
    pub fn new(industry: &str, analysis: InsightAnalysis, now: DateTime<Utc>) -> Self {
        Self {
            industry: industry.to_string(),
            analysis,
            last_updated: now,
            next_update: next_update_after(now),
        }
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_update
    }

    /// Salary bands scaled to thousands for charting.
    pub fn salary_chart(&self) -> Vec<SalaryPoint> {
        self.analysis
            .salary_ranges
            .iter()
            .map(|r| SalaryPoint {
                name: r.role.clone(),
                min: r.min / 1000.0,
                max: r.max / 1000.0,
                median: r.median / 1000.0,
            })
            .collect()
    }
}

pub fn next_update_after(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(REFRESH_INTERVAL_DAYS)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryPoint {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// "in 6 days", "in about 3 hours", "2 days ago".
pub fn humanize_distance(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    let delta = target - now;
    let future = delta >= Duration::zero();
    let delta = if future { delta } else { -delta };

    let phrase = if delta.num_days() >= 1 {
        plural(delta.num_days(), "day")
    } else if delta.num_hours() >= 1 {
        format!("about {}", plural(delta.num_hours(), "hour"))
    } else if delta.num_minutes() >= 1 {
        plural(delta.num_minutes(), "minute")
    } else {
        return "less than a minute".to_string();
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
