// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text career coaching replies.
pub const CAREER_COACH_SYSTEM: &str = "You are an experienced career coach and professional \
    resume writer. You write concise, specific, honest content. \
    Never invent employers, titles, dates, or credentials that were not provided.";

/// Renders an optional profile field for a prompt, so absent values read naturally.
pub fn or_not_specified(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => "not specified",
    }
}

/// Joins a skill list for a prompt.
pub fn skills_list(skills: &[String]) -> String {
    let skills: Vec<&str> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        "not specified".to_string()
    } else {
        skills.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_specified() {
        assert_eq!(or_not_specified(None), "not specified");
        assert_eq!(or_not_specified(Some("   ")), "not specified");
        assert_eq!(or_not_specified(Some(" fintech ")), "fintech");
    }

    #[test]
    fn test_skills_list_skips_blank_items() {
        let skills = vec!["Rust".to_string(), " ".to_string(), "SQL".to_string()];
        assert_eq!(skills_list(&skills), "Rust, SQL");
        assert_eq!(skills_list(&[]), "not specified");
    }
}
