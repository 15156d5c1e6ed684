// Text layout for PDF export: static metrics for the standard fonts, greedy word wrap,
// and top-down pagination onto fixed-size pages.
// CPU-bound; callers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod page;
pub mod wrap;

pub use font_metrics::{get_metrics, StandardFont};
pub use page::{Align, FontStyle, Page, PageConfig, PageItem, Paginator};
pub use wrap::wrap_text;
