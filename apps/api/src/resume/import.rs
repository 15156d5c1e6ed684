//! Resume import from an uploaded PDF.
//!
//! Text extraction loses markdown structure, so known section titles and `title @ organization`
//! lines are re-marked as headings before running the markdown extractors.

use tracing::info;

use crate::errors::AppError;
use crate::resume::extract::{extract_info, parse_resume};
use crate::resume::markdown::{CONTACT_HEADING, SKILLS_HEADING, SUMMARY_HEADING};
use crate::resume::models::{EntryKind, ExtractedInfo, ResumeForm};

/// Upload size cap for resume PDFs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ImportedResume {
    pub markdown: String,
    pub info: ExtractedInfo,
    pub resume: ResumeForm,
}

fn section_heading(line: &str) -> Option<&'static str> {
    let line = line.trim().trim_end_matches(':');
    [CONTACT_HEADING, SUMMARY_HEADING, SKILLS_HEADING]
        .into_iter()
        .chain(EntryKind::ALL.into_iter().map(EntryKind::heading))
        .find(|heading| line.eq_ignore_ascii_case(heading))
}

/// Rebuilds heading markers in plain text extracted from a resume PDF.
pub fn text_to_markdown(text: &str) -> String {
    let mut in_entries = false;
    let mut lines = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(heading) = section_heading(trimmed) {
            in_entries = EntryKind::ALL.iter().any(|kind| kind.heading() == heading);
            lines.push(String::new());
            lines.push(format!("## {heading}"));
            lines.push(String::new());
        } else if in_entries && trimmed.contains(" @ ") {
            lines.push(String::new());
            lines.push(format!("### {trimmed}"));
        } else {
            lines.push(trimmed.to_string());
        }
    }
    let markdown = lines.join("\n");
    markdown.trim().to_string()
}

/// Extracts text from PDF bytes. Runs pdf-extract on the blocking pool.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(AppError::Validation("uploaded file is not a PDF".to_string()));
    }
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF import: {e}"))
        })?
        .map_err(|e| AppError::UnprocessableEntity(format!("could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Full import: PDF bytes → markdown → extracted fields and form.
pub async fn import_pdf(bytes: Vec<u8>) -> Result<ImportedResume, AppError> {
    let text = extract_pdf_text(bytes).await?;
    let markdown = text_to_markdown(&text);
    let info = extract_info(&markdown);
    let resume = parse_resume(&markdown);
    info!(
        chars = text.len(),
        experience = resume.experience.len(),
        "Imported resume PDF"
    );
    Ok(ImportedResume {
        markdown,
        info,
        resume,
    })
}
