//! Axum route handler for PDF export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::FontStyle;
use crate::render::{render_markdown_pdf, RenderError, PDF_FILENAME};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    pub markdown: String,
    /// Overrides the configured font style.
    #[serde(default)]
    pub font: Option<FontStyle>,
}

/// POST /api/v1/resume/pdf
///
/// Renders the resume markdown and returns it as a `resume.pdf` download.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(request): Json<PdfRequest>,
) -> Result<Response, AppError> {
    if request.markdown.trim().is_empty() {
        return Err(AppError::Validation("markdown cannot be empty".to_string()));
    }
    let config = match request.font {
        Some(style) => state.page_config.with_style(style),
        None => state.page_config.as_ref().clone(),
    };

    let markdown = request.markdown;
    let bytes = tokio::task::spawn_blocking(move || render_markdown_pdf(&markdown, &config))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF render: {e}"))
        })?
        .map_err(|e| match e {
            RenderError::Empty => AppError::Validation(e.to_string()),
            RenderError::Pdf(msg) => AppError::Render(msg),
        })?;
    info!(bytes = bytes.len(), "Rendered resume PDF");

    let disposition = format!("attachment; filename=\"{PDF_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
