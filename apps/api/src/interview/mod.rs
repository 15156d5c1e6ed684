// Interview preparation: LLM-generated multiple-choice quizzes, grading with improvement
// tips, and performance statistics over past assessments.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod quiz;
pub mod stats;
