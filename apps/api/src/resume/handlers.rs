//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, FieldError};
use crate::profile::CareerProfile;
use crate::resume::extract::{extract_info, parse_resume};
use crate::resume::import::import_pdf;
use crate::resume::improve::improve_with_ai;
use crate::resume::markdown::compose_markdown;
use crate::resume::models::{EntryKind, ExtractedInfo, ResumeForm};
use crate::resume::validation::validate_form;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub markdown: String,
    /// Validation failures of the submitted form; empty when it is complete.
    pub issues: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub info: ExtractedInfo,
    pub resume: ResumeForm,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub markdown: String,
    pub info: ExtractedInfo,
    pub resume: ResumeForm,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub current_content: String,
    #[serde(default)]
    pub profile: CareerProfile,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/markdown
///
/// Composes resume markdown from form state. Incomplete forms still produce a preview.
pub async fn handle_compose_markdown(
    Json(form): Json<ResumeForm>,
) -> Result<Json<MarkdownResponse>, AppError> {
    let issues = validate_form(&form).err().unwrap_or_default();
    Ok(Json(MarkdownResponse {
        markdown: compose_markdown(&form),
        issues,
    }))
}

/// POST /api/v1/resume/extract
///
/// Syncs edited markdown back into form fields.
pub async fn handle_extract(
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.markdown.trim().is_empty() {
        return Err(AppError::Validation("markdown cannot be empty".to_string()));
    }
    Ok(Json(ExtractResponse {
        info: extract_info(&request.markdown),
        resume: parse_resume(&request.markdown),
    }))
}

/// POST /api/v1/resume/import (multipart, field `file`)
pub async fn handle_import(mut multipart: Multipart) -> Result<Json<ImportResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            upload = Some(bytes.to_vec());
            break;
        }
    }
    let bytes = upload.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;

    let imported = import_pdf(bytes).await?;
    Ok(Json(ImportResponse {
        markdown: imported.markdown,
        info: imported.info,
        resume: imported.resume,
    }))
}

/// POST /api/v1/resume/improve
///
/// Rewrites one entry description with the LLM, tailored to the caller's industry.
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let content = improve_with_ai(
        state.llm.as_ref(),
        request.kind,
        request.profile.industry.as_deref(),
        &request.current_content,
    )
    .await?;
    Ok(Json(ImproveResponse { content }))
}
