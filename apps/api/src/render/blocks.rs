//! Markdown → flat list of printable blocks.
//!
//! Inline formatting is flattened to plain text. HTML (inline or block) contributes only its
//! text content, except that `align="center"` anywhere in a block centers it.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::layout::Align;
use crate::resume::extract::strip_tags;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    /// `marker` is `-` or `N.`; `depth` starts at 0.
    ListItem { depth: usize, marker: String },
    Code,
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Plain text; `\n` marks a hard line break.
    pub text: String,
    pub align: Align,
}

impl Block {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            text: String::new(),
            align: Align::Left,
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn is_centered(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    lower.contains(r#"align="center""#)
        || lower.contains("align='center'")
        || lower.contains("text-align: center")
        || lower.contains("text-align:center")
}

struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    /// Next number for each open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: None,
            lists: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let Some(mut block) = self.current.take() {
            block.text = match block.kind {
                BlockKind::Code => block.text.trim_matches('\n').to_string(),
                _ => block.text.trim().to_string(),
            };
            if !block.text.trim().is_empty() {
                self.blocks.push(block);
            }
        }
    }

    fn open(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block::new(kind));
    }

    fn push_text(&mut self, text: &str) {
        let block = self
            .current
            .get_or_insert_with(|| Block::new(BlockKind::Paragraph));
        block.text.push_str(text);
    }

    fn mark_centered(&mut self) {
        if let Some(block) = self.current.as_mut() {
            block.align = Align::Center;
        }
    }

    fn start_item(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(next)) => {
                let marker = format!("{next}.");
                *next += 1;
                marker
            }
            _ => "-".to_string(),
        };
        self.open(BlockKind::ListItem { depth, marker });
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.open(BlockKind::Heading(heading_level(level)))
            }
            Event::Start(Tag::Paragraph) => {
                let in_item = matches!(
                    self.current.as_ref().map(|b| &b.kind),
                    Some(BlockKind::ListItem { .. })
                );
                if in_item {
                    if let Some(block) = self.current.as_mut() {
                        if !block.text.is_empty() {
                            block.text.push(' ');
                        }
                    }
                } else {
                    self.open(BlockKind::Paragraph);
                }
            }
            Event::Start(Tag::CodeBlock(_)) => self.open(BlockKind::Code),
            Event::Start(Tag::HtmlBlock) => self.open(BlockKind::Paragraph),
            Event::Start(Tag::List(start)) => {
                // Text of an enclosing item comes before its nested list.
                self.flush();
                self.lists.push(start);
            }
            Event::Start(Tag::Item) => self.start_item(),
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
            }
            Event::End(TagEnd::Paragraph) => {
                let in_item = matches!(
                    self.current.as_ref().map(|b| &b.kind),
                    Some(BlockKind::ListItem { .. })
                );
                if !in_item {
                    self.flush();
                }
            }
            Event::End(
                TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::HtmlBlock | TagEnd::Item,
            ) => self.flush(),
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::Html(html) => {
                if is_centered(&html) {
                    self.mark_centered();
                }
                let text = strip_tags(&html);
                self.push_text(&text);
            }
            Event::InlineHtml(html) => {
                if is_centered(&html) {
                    self.mark_centered();
                }
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block::new(BlockKind::Rule));
            }
            Event::TaskListMarker(done) => self.push_text(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Parses CommonMark into printable blocks. Rules are kept even though they carry no text.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::new();
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    for event in Parser::new_ext(markdown, options) {
        builder.handle(event);
    }
    builder.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
