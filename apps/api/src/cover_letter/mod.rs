// Cover letter generation from a job posting and the caller's profile.

pub mod generator;
pub mod handlers;
pub mod prompts;
