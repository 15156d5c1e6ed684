// Resume builder: form state ⇄ markdown, validation, PDF import, and AI rewrites of entry
// descriptions. PDF export lives in render.

pub mod dates;
pub mod extract;
pub mod handlers;
pub mod import;
pub mod improve;
pub mod markdown;
pub mod models;
pub mod prompts;
pub mod validation;
