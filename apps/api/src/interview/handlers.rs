//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::{Assessment, Question};
use crate::interview::quiz::{assess, generate_quiz};
use crate::interview::stats::{compute_stats, AssessmentStats};
use crate::profile::CareerProfile;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub profile: CareerProfile,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct QuizResultRequest {
    pub questions: Vec<Question>,
    pub answers: Vec<String>,
    #[serde(default)]
    pub profile: CareerProfile,
}

#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    pub assessments: Vec<Assessment>,
}

/// POST /api/v1/interview/quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    let questions = generate_quiz(
        state.llm.as_ref(),
        request.profile.industry.as_deref(),
        &request.profile.skills,
    )
    .await?;
    Ok(Json(QuizResponse { questions }))
}

/// POST /api/v1/interview/results
///
/// Grades submitted answers and returns the assessment, including an improvement tip
/// when any answer was wrong.
pub async fn handle_submit_results(
    State(state): State<AppState>,
    Json(request): Json<QuizResultRequest>,
) -> Result<Json<Assessment>, AppError> {
    let assessment = assess(
        state.llm.as_ref(),
        request.profile.industry.as_deref(),
        &request.questions,
        &request.answers,
        Utc::now(),
    )
    .await?;
    Ok(Json(assessment))
}

/// POST /api/v1/interview/stats
pub async fn handle_stats(
    Json(request): Json<StatsRequest>,
) -> Result<Json<AssessmentStats>, AppError> {
    Ok(Json(compute_stats(&request.assessments)))
}
