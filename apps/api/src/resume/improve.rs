use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{or_not_specified, CAREER_COACH_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::resume::models::EntryKind;
use crate::resume::prompts::IMPROVE_PROMPT_TEMPLATE;

pub fn build_improve_prompt(kind: EntryKind, industry: Option<&str>, content: &str) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{kind}", kind.noun())
        .replace("{industry}", or_not_specified(industry))
        .replace("{content}", content.trim())
}

/// Rewrites an entry description into a stronger, quantified paragraph.
pub async fn improve_with_ai(
    generator: &dyn TextGenerator,
    kind: EntryKind,
    industry: Option<&str>,
    current_content: &str,
) -> Result<String, AppError> {
    if current_content.trim().is_empty() {
        return Err(AppError::Validation(
            "content to improve cannot be empty".to_string(),
        ));
    }

    let prompt = build_improve_prompt(kind, industry, current_content);
    let improved = generator
        .generate(&prompt, CAREER_COACH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to improve content: {e}")))?;

    let improved = improved.trim();
    if improved.is_empty() {
        return Err(AppError::Llm("Model returned empty improved content".to_string()));
    }
    info!(kind = ?kind, chars = improved.len(), "Improved resume content");
    Ok(improved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;

    #[test]
    fn test_prompt_fills_placeholders() {
        let prompt = build_improve_prompt(EntryKind::Project, Some("tech-ai"), "  built a bot ");
        assert!(prompt.contains("improve the following project description"));
        assert!(prompt.contains("tech-ai professional"));
        assert!(prompt.contains(r#""built a bot""#));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_prompt_without_industry() {
        let prompt = build_improve_prompt(EntryKind::Experience, None, "x");
        assert!(prompt.contains("for a not specified professional"));
    }

    #[tokio::test]
    async fn test_improve_trims_reply() {
        let stub = StubGenerator::replying("\n  Led a team of 5 to ship X, cutting costs 20%.  \n");
        let improved = improve_with_ai(&stub, EntryKind::Experience, Some("tech"), "led team")
            .await
            .unwrap();
        assert_eq!(improved, "Led a team of 5 to ship X, cutting costs 20%.");
        assert!(stub.last_prompt().contains("led team"));
    }

    #[tokio::test]
    async fn test_improve_rejects_empty_content() {
        let stub = StubGenerator::replying("unused");
        let err = improve_with_ai(&stub, EntryKind::Education, None, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_improve_maps_llm_failure() {
        let stub = StubGenerator::failing("quota");
        let err = improve_with_ai(&stub, EntryKind::Experience, None, "did stuff")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
