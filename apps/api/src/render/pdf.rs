//! Positioned page items → PDF bytes, using the standard 14 fonts (no embedding).

use std::collections::HashMap;

use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    Point,
};

use crate::layout::{Page, PageConfig, PageItem, StandardFont};
use crate::render::RenderError;

const RULE_THICKNESS_PT: f32 = 0.6;

fn builtin(font: StandardFont) -> BuiltinFont {
    match font {
        StandardFont::Helvetica => BuiltinFont::Helvetica,
        StandardFont::HelveticaBold => BuiltinFont::HelveticaBold,
        StandardFont::TimesRoman => BuiltinFont::TimesRoman,
        StandardFont::TimesBold => BuiltinFont::TimesBold,
        StandardFont::Courier => BuiltinFont::Courier,
    }
}

fn load_fonts(
    doc: &PdfDocumentReference,
    pages: &[Page],
) -> Result<HashMap<StandardFont, IndirectFontRef>, RenderError> {
    let mut fonts = HashMap::new();
    for page in pages {
        for item in &page.items {
            if let PageItem::Text { font, .. } = item {
                if !fonts.contains_key(font) {
                    let reference = doc
                        .add_builtin_font(builtin(*font))
                        .map_err(|e| RenderError::Pdf(e.to_string()))?;
                    fonts.insert(*font, reference);
                }
            }
        }
    }
    Ok(fonts)
}

/// Encodes laid-out pages as a PDF document. `pages` must not be empty.
pub fn encode_pdf(
    pages: &[Page],
    config: &PageConfig,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let width = Mm(config.page_width_mm);
    let height = Mm(config.page_height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let fonts = load_fonts(&doc, pages)?;

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Layer {}", i + 1))
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for item in &page.items {
            match item {
                PageItem::Text {
                    text,
                    font,
                    size_pt,
                    x_mm,
                    baseline_mm,
                } => {
                    if text.is_empty() {
                        continue;
                    }
                    let Some(font_ref) = fonts.get(font) else {
                        return Err(RenderError::Pdf(format!("font {font:?} not loaded")));
                    };
                    layer.use_text(
                        text.as_str(),
                        *size_pt,
                        Mm(*x_mm),
                        Mm(*baseline_mm),
                        font_ref,
                    );
                }
                PageItem::Rule { x1_mm, x2_mm, y_mm } => {
                    layer.set_outline_color(Color::Greyscale(Greyscale::new(0.6, None)));
                    layer.set_outline_thickness(RULE_THICKNESS_PT);
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm(*x1_mm), Mm(*y_mm)), false),
                            (Point::new(Mm(*x2_mm), Mm(*y_mm)), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}
