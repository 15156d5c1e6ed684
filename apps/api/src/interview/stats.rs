//! Dashboard statistics over a caller's past assessments.

use serde::Serialize;

use crate::interview::models::Assessment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformancePoint {
    /// `MMM dd`, e.g. `Mar 01`.
    pub date: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub total_assessments: usize,
    /// Mean quiz score, one decimal.
    pub average_score: f64,
    /// Mean question count per assessment, one decimal.
    pub average_questions: f64,
    /// Score of the most recent assessment.
    pub latest_score: Option<f64>,
    /// Chronological score series for the performance chart.
    pub performance: Vec<PerformancePoint>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn compute_stats(assessments: &[Assessment]) -> AssessmentStats {
    let mut ordered: Vec<&Assessment> = assessments.iter().collect();
    ordered.sort_by_key(|a| a.created_at);

    let count = ordered.len();
    let (average_score, average_questions) = if count == 0 {
        (0.0, 0.0)
    } else {
        let total_score: f64 = ordered.iter().map(|a| a.quiz_score).sum();
        let total_questions: usize = ordered.iter().map(|a| a.questions.len()).sum();
        (
            round1(total_score / count as f64),
            round1(total_questions as f64 / count as f64),
        )
    };

    AssessmentStats {
        total_assessments: count,
        average_score,
        average_questions,
        latest_score: ordered.last().map(|a| round1(a.quiz_score)),
        performance: ordered
            .iter()
            .map(|a| PerformancePoint {
                date: a.created_at.format("%b %d").to_string(),
                score: a.quiz_score,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::QuestionResult;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn assessment(day: u32, score: f64, questions: usize) -> Assessment {
        Assessment {
            id: Uuid::new_v4(),
            quiz_score: score,
            questions: vec![
                QuestionResult {
                    question: "q".to_string(),
                    answer: "a".to_string(),
                    user_answer: "a".to_string(),
                    is_correct: true,
                    explanation: String::new(),
                };
                questions
            ],
            category: "Technical".to_string(),
            improvement_tip: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_assessments, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.latest_score, None);
        assert!(stats.performance.is_empty());
    }

    #[test]
    fn test_averages_rounded_to_one_decimal() {
        let stats = compute_stats(&[
            assessment(1, 70.0, 10),
            assessment(2, 80.0, 10),
            assessment(3, 85.0, 5),
        ]);
        assert_eq!(stats.average_score, 78.3);
        assert_eq!(stats.average_questions, 8.3);
    }

    #[test]
    fn test_latest_and_series_ordered_by_date() {
        let stats = compute_stats(&[
            assessment(9, 90.0, 10),
            assessment(1, 60.0, 10),
            assessment(5, 70.0, 10),
        ]);
        assert_eq!(stats.latest_score, Some(90.0));
        let dates: Vec<&str> = stats.performance.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["Mar 01", "Mar 05", "Mar 09"]);
        assert_eq!(stats.performance[0].score, 60.0);
    }
}
