//! Axum route handler for cover letters.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::cover_letter::generator::{generate_cover_letter, CoverLetter, CoverLetterRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/cover-letters
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetter>, AppError> {
    let letter = generate_cover_letter(state.llm.as_ref(), request, Utc::now()).await?;
    Ok(Json(letter))
}
