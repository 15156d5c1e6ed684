//! Greedy word wrap against the static metric tables.

use crate::layout::font_metrics::FontMetricTable;

/// Splits `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// Whitespace runs collapse to a single space. A word wider than a full line is broken by
/// character. An empty or blank string returns no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let max_width = max_width_pt / size_pt;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);
        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if current_width + space_w + word_w <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
            continue;
        }

        // Word does not fit on the current line.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        if word_w <= max_width {
            current.push_str(word);
            current_width = word_w;
        } else {
            for c in word.chars() {
                let c_w = metrics.char_width(c);
                if !current.is_empty() && current_width + c_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += c_w;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
