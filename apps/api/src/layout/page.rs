//! Page geometry and top-down pagination.
//!
//! All vertical bookkeeping is in points measured down from the top of the content area;
//! positions are converted to millimetres from the bottom-left corner (PDF user space)
//! when an item is placed.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, StandardFont};

pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Baseline offset from the top of a line box, as a fraction of the font size.
const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Sans,
    Serif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Layout parameters for the exported resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Same margin on all four sides.
    pub margin_mm: f32,
    pub body_size_pt: f32,
    /// Sizes for heading levels 1, 2 and 3+.
    pub heading_sizes_pt: [f32; 3],
    /// Line box height as a multiple of the font size.
    pub line_spacing: f32,
    /// Vertical space inserted between blocks.
    pub block_gap_pt: f32,
    pub style: FontStyle,
}

impl PageConfig {
    /// A4 portrait with 8 mm margins.
    pub fn a4(style: FontStyle) -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 8.0,
            body_size_pt: 10.5,
            heading_sizes_pt: [20.0, 15.0, 12.0],
            line_spacing: 1.35,
            block_gap_pt: 6.0,
            style,
        }
    }

    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    pub fn content_width_pt(&self) -> f32 {
        (self.page_width_mm - 2.0 * self.margin_mm) / MM_PER_PT
    }

    pub fn content_height_pt(&self) -> f32 {
        (self.page_height_mm - 2.0 * self.margin_mm) / MM_PER_PT
    }

    pub fn regular_font(&self) -> StandardFont {
        match self.style {
            FontStyle::Sans => StandardFont::Helvetica,
            FontStyle::Serif => StandardFont::TimesRoman,
        }
    }

    pub fn bold_font(&self) -> StandardFont {
        match self.style {
            FontStyle::Sans => StandardFont::HelveticaBold,
            FontStyle::Serif => StandardFont::TimesBold,
        }
    }

    pub fn mono_font(&self) -> StandardFont {
        StandardFont::Courier
    }

    pub fn heading_size_pt(&self, level: u8) -> f32 {
        let index = usize::from(level.clamp(1, 3)) - 1;
        self.heading_sizes_pt[index]
    }

    pub fn line_height_pt(&self, size_pt: f32) -> f32 {
        size_pt * self.line_spacing
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4(FontStyle::Sans)
    }
}

/// Something drawn on a page. Coordinates are PDF user space in mm (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text {
        text: String,
        font: StandardFont,
        size_pt: f32,
        x_mm: f32,
        baseline_mm: f32,
    },
    Rule {
        x1_mm: f32,
        x2_mm: f32,
        y_mm: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PageItem>,
}

/// Places lines top-down and starts a new page when the next line does not fit.
pub struct Paginator<'a> {
    config: &'a PageConfig,
    pages: Vec<Page>,
    /// Distance in points from the top of the content area on the current page.
    cursor_pt: f32,
}

impl<'a> Paginator<'a> {
    pub fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![Page::default()],
            cursor_pt: 0.0,
        }
    }

    fn remaining_pt(&self) -> f32 {
        self.config.content_height_pt() - self.cursor_pt
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor_pt = 0.0;
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn y_mm(&self, from_top_pt: f32) -> f32 {
        self.config.page_height_mm - self.config.margin_mm - from_top_pt * MM_PER_PT
    }

    /// Vertical space; dropped at the top of a page.
    pub fn gap(&mut self, pt: f32) {
        if self.cursor_pt > 0.0 {
            self.cursor_pt = (self.cursor_pt + pt).min(self.config.content_height_pt());
        }
    }

    /// Starts a new page unless `pt` points remain on the current one.
    pub fn ensure_space(&mut self, pt: f32) {
        if self.cursor_pt > 0.0 && self.remaining_pt() < pt {
            self.new_page();
        }
    }

    /// Places one already-wrapped line.
    pub fn line(
        &mut self,
        text: &str,
        font: StandardFont,
        size_pt: f32,
        indent_pt: f32,
        align: Align,
    ) {
        let height = self.config.line_height_pt(size_pt);
        self.ensure_space(height);

        let content_width = self.config.content_width_pt();
        let offset_pt = match align {
            Align::Left => indent_pt,
            Align::Center => {
                let width = get_metrics(font).measure_pt(text, size_pt);
                ((content_width - width) / 2.0).max(0.0)
            }
        };
        let baseline_pt = self.cursor_pt + (height - size_pt) / 2.0 + size_pt * ASCENT;
        let item = PageItem::Text {
            text: text.to_string(),
            font,
            size_pt,
            x_mm: self.config.margin_mm + offset_pt * MM_PER_PT,
            baseline_mm: self.y_mm(baseline_pt),
        };
        self.current_page().items.push(item);
        self.cursor_pt += height;
    }

    /// Horizontal rule across the content width.
    pub fn rule(&mut self, height_pt: f32) {
        self.ensure_space(height_pt);
        let y_mm = self.y_mm(self.cursor_pt + height_pt / 2.0);
        let margin = self.config.margin_mm;
        let x2_mm = self.config.page_width_mm - margin;
        self.current_page().items.push(PageItem::Rule {
            x1_mm: margin,
            x2_mm,
            y_mm,
        });
        self.cursor_pt += height_pt;
    }

    /// Finished pages; a trailing empty page is dropped, but at least one page is returned.
    pub fn finish(mut self) -> Vec<Page> {
        if self.pages.len() > 1 && self.pages.last().is_some_and(|p| p.items.is_empty()) {
            self.pages.pop();
        }
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
