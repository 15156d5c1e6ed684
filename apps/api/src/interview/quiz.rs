//! Quiz generation, grading, and assessment assembly.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{Assessment, Question, QuestionResult, Quiz, ASSESSMENT_CATEGORY};
use crate::interview::prompts::{IMPROVEMENT_TIP_PROMPT_TEMPLATE, QUIZ_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{or_not_specified, CAREER_COACH_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, TextGenerator};

pub fn build_quiz_prompt(industry: Option<&str>, skills: &[String]) -> String {
    let skills: Vec<&str> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    let skills_clause = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };
    QUIZ_PROMPT_TEMPLATE
        .replace("{industry}", or_not_specified(industry))
        .replace("{skills_clause}", &skills_clause)
}

/// Asks the LLM for a multiple-choice quiz and checks every question.
pub async fn generate_quiz(
    generator: &dyn TextGenerator,
    industry: Option<&str>,
    skills: &[String],
) -> Result<Vec<Question>, AppError> {
    let prompt = build_quiz_prompt(industry, skills);
    let quiz: Quiz = generate_json(generator, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate quiz questions: {e}")))?;

    if quiz.questions.is_empty() {
        return Err(AppError::Llm("Quiz came back without questions".to_string()));
    }
    for (i, question) in quiz.questions.iter().enumerate() {
        question
            .check()
            .map_err(|e| AppError::Llm(format!("Quiz question {} rejected: {e}", i + 1)))?;
    }
    info!(questions = quiz.questions.len(), "Generated interview quiz");
    Ok(quiz.questions)
}

fn is_correct(question: &Question, answer: Option<&String>) -> bool {
    answer.is_some_and(|a| *a == question.correct_answer)
}

/// `correct / questions * 100`. Missing answers count as wrong.
pub fn calculate_score(questions: &[Question], answers: &[String]) -> Result<f64, AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation(
            "cannot score a quiz without questions".to_string(),
        ));
    }
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| is_correct(q, answers.get(*i)))
        .count();
    Ok(correct as f64 / questions.len() as f64 * 100.0)
}

/// Pairs every question with the caller's answer.
pub fn grade(questions: &[Question], answers: &[String]) -> Vec<QuestionResult> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionResult {
            question: q.question.clone(),
            answer: q.correct_answer.clone(),
            user_answer: answers.get(i).cloned().unwrap_or_default(),
            is_correct: is_correct(q, answers.get(i)),
            explanation: q.explanation.clone(),
        })
        .collect()
}

pub fn build_improvement_prompt(industry: Option<&str>, wrong: &[&QuestionResult]) -> String {
    let wrong_answers = wrong
        .iter()
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect answer: \"{}\"\nUser answer: \"{}\"",
                r.question, r.answer, r.user_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    IMPROVEMENT_TIP_PROMPT_TEMPLATE
        .replace("{industry}", or_not_specified(industry))
        .replace("{wrong_answers}", &wrong_answers)
}

/// Short study tip derived from the wrong answers; `None` when everything was correct.
pub async fn improvement_tip(
    generator: &dyn TextGenerator,
    industry: Option<&str>,
    results: &[QuestionResult],
) -> Result<Option<String>, AppError> {
    let wrong: Vec<&QuestionResult> = results.iter().filter(|r| !r.is_correct).collect();
    if wrong.is_empty() {
        return Ok(None);
    }
    let prompt = build_improvement_prompt(industry, &wrong);
    let tip = generator
        .generate(&prompt, CAREER_COACH_SYSTEM)
        .await
        .map_err(|e| {
            warn!(error = %e, "Improvement tip generation failed");
            AppError::Llm(format!("Failed to generate improvement tip: {e}"))
        })?;
    Ok(Some(tip.trim().to_string()))
}

/// Grades a finished quiz and produces the assessment record.
pub async fn assess(
    generator: &dyn TextGenerator,
    industry: Option<&str>,
    questions: &[Question],
    answers: &[String],
    now: DateTime<Utc>,
) -> Result<Assessment, AppError> {
    let quiz_score = calculate_score(questions, answers)?;
    let results = grade(questions, answers);
    let improvement_tip = improvement_tip(generator, industry, &results).await?;

    Ok(Assessment {
        id: Uuid::new_v4(),
        quiz_score,
        questions: results,
        category: ASSESSMENT_CATEGORY.to_string(),
        improvement_tip,
        created_at: now,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
