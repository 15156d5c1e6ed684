//! Blocks → positioned page items.

use crate::layout::{get_metrics, wrap_text, Align, Page, PageConfig, Paginator, StandardFont};
use crate::render::blocks::{Block, BlockKind};

const LIST_INDENT_PT: f32 = 14.0;
const LIST_ITEM_GAP_PT: f32 = 2.0;
const RULE_HEIGHT_PT: f32 = 8.0;
/// Height reserved for the underline below level 1 and 2 headings.
const HEADING_RULE_PT: f32 = 5.0;

/// Unicode characters WinAnsi places in 0x80..=0x9F.
const WINANSI_HIGH: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '\u{2018}', '\u{2019}',
    '\u{201C}', '\u{201D}', '•', '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

fn is_winansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WINANSI_HIGH.contains(&c)
}

/// Keeps characters the standard fonts can encode (WinAnsi), whitespace untouched.
///
/// A few near-equivalents outside the table (primes, minus, other dashes and bullets) are
/// mapped onto it; everything else outside WinAnsi (emoji, CJK) is dropped.
pub fn winansi_chars(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2032}' => Some('\''),
            '\u{2033}' => Some('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => Some('-'),
            '\u{2015}' => Some('—'),
            '\u{25CF}' | '\u{25AA}' => Some('•'),
            '\t' => Some(' '),
            '\n' => Some('\n'),
            c if is_winansi(c) => Some(c),
            _ => None,
        })
        .collect()
}

/// [`winansi_chars`], then whitespace runs on each line collapse to one space.
pub fn to_winansi(text: &str) -> String {
    winansi_chars(text)
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

struct PageWriter<'a> {
    config: &'a PageConfig,
    paginator: Paginator<'a>,
    previous: Option<&'a BlockKind>,
}

impl<'a> PageWriter<'a> {
    fn gap_before(&mut self, kind: &BlockKind) {
        let gap = match (self.previous, kind) {
            (None, _) => 0.0,
            (Some(BlockKind::ListItem { .. }), BlockKind::ListItem { .. }) => LIST_ITEM_GAP_PT,
            (Some(BlockKind::Heading(_)), _) => self.config.block_gap_pt / 2.0,
            (_, BlockKind::Heading(level)) if *level <= 2 => self.config.block_gap_pt * 2.0,
            _ => self.config.block_gap_pt,
        };
        self.paginator.gap(gap);
    }

    /// Wraps every `\n`-separated segment and places the lines.
    fn text_lines(
        &mut self,
        text: &str,
        font: StandardFont,
        size_pt: f32,
        indent_pt: f32,
        align: Align,
    ) {
        let width = self.config.content_width_pt() - indent_pt;
        let metrics = get_metrics(font);
        for segment in text.split('\n') {
            for line in wrap_text(segment, metrics, size_pt, width) {
                self.paginator.line(&line, font, size_pt, indent_pt, align);
            }
        }
    }

    fn heading(&mut self, level: u8, text: &str, align: Align) {
        let size = self.config.heading_size_pt(level);
        // Keep the heading together with at least one body line.
        let needed = self.config.line_height_pt(size)
            + self.config.line_height_pt(self.config.body_size_pt)
            + HEADING_RULE_PT;
        self.paginator.ensure_space(needed);
        self.text_lines(text, self.config.bold_font(), size, 0.0, align);
        if level <= 2 {
            self.paginator.rule(HEADING_RULE_PT);
        }
    }

    fn list_item(&mut self, depth: usize, marker: &str, text: &str, align: Align) {
        let font = self.config.regular_font();
        let size = self.config.body_size_pt;
        let metrics = get_metrics(font);
        let indent = LIST_INDENT_PT * depth as f32;
        let prefix = format!("{marker} ");
        let hang = metrics.measure_pt(&prefix, size);
        let width = self.config.content_width_pt() - indent - hang;

        let mut first = true;
        for segment in text.split('\n') {
            for line in wrap_text(segment, metrics, size, width) {
                if first {
                    let line = format!("{prefix}{line}");
                    self.paginator.line(&line, font, size, indent, align);
                    first = false;
                } else {
                    self.paginator.line(&line, font, size, indent + hang, align);
                }
            }
        }
    }

    /// Source lines keep their leading indentation; only the remainder is wrapped.
    fn code(&mut self, text: &str) {
        let font = self.config.mono_font();
        let size = self.config.body_size_pt - 1.0;
        let metrics = get_metrics(font);
        let width = self.config.content_width_pt() - LIST_INDENT_PT;
        for source_line in text.split('\n') {
            let body = source_line.trim_start();
            let lead = &source_line[..source_line.len() - body.len()];
            let lead_pt = metrics.measure_pt(lead, size).min(width / 2.0);
            let indent = LIST_INDENT_PT + lead_pt;

            let lines = wrap_text(body, metrics, size, width - lead_pt);
            if lines.is_empty() {
                self.paginator.line("", font, size, LIST_INDENT_PT, Align::Left);
            }
            for line in lines {
                self.paginator.line(&line, font, size, indent, Align::Left);
            }
        }
    }

    fn block(&mut self, block: &'a Block) {
        let text = match block.kind {
            BlockKind::Code => winansi_chars(&block.text),
            _ => to_winansi(&block.text),
        };
        if text.trim().is_empty() && block.kind != BlockKind::Rule {
            return;
        }
        self.gap_before(&block.kind);
        match &block.kind {
            BlockKind::Heading(level) => self.heading(*level, &text, block.align),
            BlockKind::Paragraph => {
                let font = self.config.regular_font();
                self.text_lines(&text, font, self.config.body_size_pt, 0.0, block.align);
            }
            BlockKind::ListItem { depth, marker } => {
                self.list_item(*depth, marker, &text, block.align)
            }
            BlockKind::Code => self.code(&text),
            BlockKind::Rule => self.paginator.rule(RULE_HEIGHT_PT),
        }
        self.previous = Some(&block.kind);
    }
}

/// Lays blocks out top-down onto as many pages as they need.
pub fn layout_blocks(blocks: &[Block], config: &PageConfig) -> Vec<Page> {
    let mut writer = PageWriter {
        config,
        paginator: Paginator::new(config),
        previous: None,
    };
    for block in blocks {
        writer.block(block);
    }
    writer.paginator.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageItem;
    use crate::render::blocks::parse_blocks;

    fn texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.items.iter())
            .filter_map(|item| match item {
                PageItem::Text { text, .. } => Some(text.clone()),
                PageItem::Rule { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_to_winansi_drops_emoji_and_maps_punctuation() {
        assert_eq!(to_winansi("📧 jane@example.com | 📱 555"), "jane@example.com | 555");
        assert_eq!(to_winansi("“Quoted” – it’s café…"), "“Quoted” – it’s café…");
        assert_eq!(to_winansi("x \u{2212} y \u{25CF} z"), "x - y • z");
        assert_eq!(to_winansi("a\n\u{1F600}\nb"), "a\n\nb");
    }

    #[test]
    fn test_to_winansi_keeps_high_range_characters() {
        let out = to_winansi("Grew revenue to €5M • led 12 engineers — shipped™ Škoda œuvre");
        assert_eq!(out, "Grew revenue to €5M • led 12 engineers — shipped™ Škoda œuvre");
        assert!(out.contains('€'));
    }

    #[test]
    fn test_code_block_keeps_indentation() {
        let config = PageConfig::default();
        let markdown = "```\nfn main() {\n    run();\n}\n```";
        let pages = layout_blocks(&parse_blocks(markdown), &config);
        let xs: Vec<(String, f32)> = pages[0]
            .items
            .iter()
            .filter_map(|item| match item {
                PageItem::Text { text, x_mm, .. } => Some((text.clone(), *x_mm)),
                PageItem::Rule { .. } => None,
            })
            .collect();
        assert_eq!(xs[1].0, "run();");
        assert_eq!(xs[0].0, "fn main() {");
        assert!(xs[1].1 > xs[0].1, "indented line not shifted: {xs:?}");
        assert!((xs[2].1 - xs[0].1).abs() < 1e-4);
    }

    #[test]
    fn test_layout_places_every_line() {
        let config = PageConfig::default();
        let blocks = parse_blocks("# Jane Doe\n\nBackend engineer.\n\n- Rust\n- SQL");
        let pages = layout_blocks(&blocks, &config);
        assert_eq!(pages.len(), 1);
        assert_eq!(texts(&pages), vec!["Jane Doe", "Backend engineer.", "- Rust", "- SQL"]);
        // Level-1 heading is underlined.
        assert!(pages[0].items.iter().any(|i| matches!(i, PageItem::Rule { .. })));
    }

    #[test]
    fn test_heading_fonts_follow_style() {
        let config = PageConfig::a4(crate::layout::FontStyle::Serif);
        let pages = layout_blocks(&parse_blocks("## Skills\n\nRust"), &config);
        let fonts: Vec<StandardFont> = pages[0]
            .items
            .iter()
            .filter_map(|item| match item {
                PageItem::Text { font, .. } => Some(*font),
                PageItem::Rule { .. } => None,
            })
            .collect();
        assert_eq!(fonts, vec![StandardFont::TimesBold, StandardFont::TimesRoman]);
    }

    #[test]
    fn test_long_document_paginates() {
        let config = PageConfig::default();
        let paragraph = "Delivered measurable improvements across the platform. ".repeat(8);
        let markdown = (0..40)
            .map(|i| format!("### Role {i}\n\n{paragraph}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let pages = layout_blocks(&parse_blocks(&markdown), &config);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.items.is_empty());
        }
    }

    #[test]
    fn test_blank_blocks_skipped() {
        let config = PageConfig::default();
        let pages = layout_blocks(&parse_blocks("<div>\u{1F4E7}</div>\n\nText"), &config);
        assert_eq!(texts(&pages), vec!["Text"]);
    }
}
