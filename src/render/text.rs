use std::borrow::Cow;

use crate::{
    foundation::error::{LifecalError, LifecalResult},
    render::backend::{FontSlant, FontSpec, FontWeight, TextExtents, TextMeasure},
};

/// Measures text with Parley against the system font collection.
///
/// Unknown families fall back to whatever the collection resolves for the font stack; with no
/// fonts installed at all, extents come back as zero.
pub struct ParleyTextMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for ParleyTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyTextMeasure {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    fn layout(&mut self, text: &str, font: &FontSpec) -> LifecalResult<parley::Layout<()>> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(LifecalError::configuration(format!(
                "font size must be finite and > 0 (got {})",
                font.size
            )));
        }

        let weight = match font.weight {
            FontWeight::Normal => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        };
        let slant = match font.slant {
            FontSlant::Normal => parley::style::FontStyle::Normal,
            FontSlant::Italic => parley::style::FontStyle::Italic,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(slant));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for ParleyTextMeasure {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> LifecalResult<TextExtents> {
        let layout = self.layout(text, font)?;
        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(f64::from(m.advance));
            height += f64::from(m.ascent + m.descent);
        }
        Ok(TextExtents { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
