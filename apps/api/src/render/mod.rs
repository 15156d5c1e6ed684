// Markdown → PDF export.
// parse_blocks (pulldown-cmark) → layout_blocks (layout module) → encode_pdf (printpdf).
// CPU-bound: handlers call render_markdown_pdf inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod handlers;
pub mod pages;
pub mod pdf;

use thiserror::Error;

use crate::layout::{PageConfig, PageItem};

pub const PDF_FILENAME: &str = "resume.pdf";
const PDF_TITLE: &str = "Resume";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown has no printable content")]
    Empty,

    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// Renders resume markdown to a PDF document.
pub fn render_markdown_pdf(markdown: &str, config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    if markdown.trim().is_empty() {
        return Err(RenderError::Empty);
    }
    let blocks = blocks::parse_blocks(markdown);
    let pages = pages::layout_blocks(&blocks, config);
    let has_text = pages
        .iter()
        .flat_map(|page| page.items.iter())
        .any(|item| matches!(item, PageItem::Text { text, .. } if !text.trim().is_empty()));
    if !has_text {
        return Err(RenderError::Empty);
    }
    pdf::encode_pdf(&pages, config, PDF_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontStyle;
    use crate::resume::markdown::compose_markdown;
    use crate::resume::markdown::fixtures::sample_form;

    #[test]
    fn test_empty_markdown_rejected() {
        let err = render_markdown_pdf("  \n ", &PageConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Empty));
    }

    #[test]
    fn test_markdown_without_printable_text_rejected() {
        for markdown in ["<!-- x -->", "\u{1F4E7}", "---"] {
            let err = render_markdown_pdf(markdown, &PageConfig::default()).unwrap_err();
            assert!(matches!(err, RenderError::Empty), "{markdown:?} rendered");
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let bytes = render_markdown_pdf("# Hello\n\nWorld", &PageConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_rendered_resume_text_is_extractable() {
        let markdown = compose_markdown(&sample_form());
        let bytes = render_markdown_pdf(&markdown, &PageConfig::default()).unwrap();
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("Acme"), "extracted: {text}");
        assert!(text.contains("Experience"), "extracted: {text}");
    }

    #[test]
    fn test_serif_and_multi_page_render() {
        let body = "Shipped features used by millions of people every single day. ".repeat(10);
        let markdown = (0..30)
            .map(|i| format!("## Section {i}\n\n{body}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let config = PageConfig::a4(FontStyle::Serif);
        let bytes = render_markdown_pdf(&markdown, &config).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(pages::layout_blocks(&blocks::parse_blocks(&markdown), &config).len() > 1);
    }
}
