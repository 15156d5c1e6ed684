use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::errors::{AppError, FieldError};
use crate::llm_client::prompts::{or_not_specified, skills_list, CAREER_COACH_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::profile::CareerProfile;

pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub profile: CareerProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub id: Uuid,
    /// Markdown.
    pub content: String,
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl CoverLetterRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let required = [
            ("companyName", &self.company_name, "Company name is required"),
            ("jobTitle", &self.job_title, "Job title is required"),
            ("jobDescription", &self.job_description, "Job description is required"),
        ];
        let errors: Vec<FieldError> = required
            .into_iter()
            .filter(|(_, value, _)| value.trim().is_empty())
            .map(|(path, _, message)| FieldError::new(path, message))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn build_cover_letter_prompt(request: &CoverLetterRequest) -> String {
    let profile = &request.profile;
    let experience = profile
        .experience
        .map(|years| format!("{years}"))
        .unwrap_or_else(|| "not specified".to_string());

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", request.job_title.trim())
        .replace("{company_name}", request.company_name.trim())
        .replace("{industry}", or_not_specified(profile.industry.as_deref()))
        .replace("{experience}", &experience)
        .replace("{skills}", &skills_list(&profile.skills))
        .replace("{bio}", or_not_specified(profile.bio.as_deref()))
        .replace("{job_description}", request.job_description.trim())
}

/// Generates a cover letter for one job application.
pub async fn generate_cover_letter(
    generator: &dyn TextGenerator,
    request: CoverLetterRequest,
    now: DateTime<Utc>,
) -> Result<CoverLetter, AppError> {
    request.validate().map_err(AppError::InvalidFields)?;

    let prompt = build_cover_letter_prompt(&request);
    let content = generator
        .generate(&prompt, CAREER_COACH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate cover letter: {e}")))?;
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Llm("Model returned an empty cover letter".to_string()));
    }

    info!(
        company = %request.company_name,
        job_title = %request.job_title,
        "Generated cover letter"
    );
    Ok(CoverLetter {
        id: Uuid::new_v4(),
        content,
        company_name: request.company_name.trim().to_string(),
        job_title: request.job_title.trim().to_string(),
        job_description: request.job_description,
        status: STATUS_COMPLETED.to_string(),
        created_at: now,
    })
}
