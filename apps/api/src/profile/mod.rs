//! Career profile: the caller-supplied context every generation prompt is built from,
//! plus onboarding validation that turns raw form input into a profile.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

const MAX_BIO_CHARS: usize = 500;
const MAX_EXPERIENCE_YEARS: f32 = 50.0;

/// Profile data the prompts are personalized with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    /// `{industry}-{subIndustry}`, e.g. `tech-software-development`.
    pub industry: Option<String>,
    /// Years of professional experience.
    pub experience: Option<f32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub bio: Option<String>,
}

/// Raw onboarding form input. `experience` and `skills` arrive as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub industry: String,
    pub sub_industry: String,
    pub bio: Option<String>,
    pub experience: String,
    pub skills: String,
}

/// Validates onboarding input and builds the profile.
pub fn build_profile(request: &OnboardingRequest) -> Result<CareerProfile, Vec<FieldError>> {
    let mut errors = Vec::new();

    let industry = request.industry.trim();
    let sub_industry = request.sub_industry.trim();
    if industry.is_empty() {
        errors.push(FieldError::new("industry", "Please select an industry"));
    }
    if sub_industry.is_empty() {
        errors.push(FieldError::new("subIndustry", "Please select a specialization"));
    }

    let bio = request
        .bio
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string);
    if bio.as_ref().is_some_and(|b| b.chars().count() > MAX_BIO_CHARS) {
        errors.push(FieldError::new(
            "bio",
            format!("Bio cannot exceed {MAX_BIO_CHARS} characters"),
        ));
    }

    let experience = match request.experience.trim().parse::<f32>() {
        Ok(years) if years.is_finite() && years < 0.0 => {
            errors.push(FieldError::new("experience", "Experience must be at least 0 years"));
            None
        }
        Ok(years) if years.is_finite() && years > MAX_EXPERIENCE_YEARS => {
            errors.push(FieldError::new("experience", "Experience cannot exceed 50 years"));
            None
        }
        Ok(years) if years.is_finite() => Some(years),
        _ => {
            errors.push(FieldError::new(
                "experience",
                "Experience must be between 0 and 50 years",
            ));
            None
        }
    };

    let skills = split_skills(&request.skills);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CareerProfile {
        industry: Some(format!("{industry}-{sub_industry}")),
        experience,
        skills,
        bio,
    })
}

/// Splits a comma-separated skill list, trimming and dropping empty items.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OnboardingRequest {
        OnboardingRequest {
            industry: "tech".to_string(),
            sub_industry: "software-development".to_string(),
            bio: Some("Backend engineer".to_string()),
            experience: "4.5".to_string(),
            skills: "Rust, PostgreSQL ,, Kubernetes".to_string(),
        }
    }

    #[test]
    fn test_build_profile_combines_industry() {
        let profile = build_profile(&request()).unwrap();
        assert_eq!(profile.industry.as_deref(), Some("tech-software-development"));
        assert_eq!(profile.experience, Some(4.5));
        assert_eq!(profile.skills, vec!["Rust", "PostgreSQL", "Kubernetes"]);
    }

    #[test]
    fn test_build_profile_rejects_out_of_range_experience() {
        let mut req = request();
        req.experience = "51".to_string();
        let errors = build_profile(&req).unwrap_err();
        assert_eq!(errors[0].path, "experience");

        req.experience = "-1".to_string();
        let errors = build_profile(&req).unwrap_err();
        assert_eq!(errors[0].message, "Experience must be at least 0 years");
    }

    #[test]
    fn test_build_profile_rejects_non_numeric_experience() {
        let mut req = request();
        req.experience = "a few".to_string();
        assert!(build_profile(&req).is_err());
    }

    #[test]
    fn test_build_profile_rejects_long_bio() {
        let mut req = request();
        req.bio = Some("x".repeat(501));
        let errors = build_profile(&req).unwrap_err();
        assert_eq!(errors[0].path, "bio");
    }

    #[test]
    fn test_build_profile_reports_every_missing_field() {
        let mut req = request();
        req.industry = " ".to_string();
        req.sub_industry = String::new();
        let errors = build_profile(&req).unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["industry", "subIndustry"]);
    }

    #[test]
    fn test_blank_bio_becomes_none() {
        let mut req = request();
        req.bio = Some("   ".to_string());
        assert!(build_profile(&req).unwrap().bio.is_none());
    }
}
