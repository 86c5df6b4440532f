use std::path::{Path, PathBuf};

use crate::{
    foundation::core::{Point, Rect, Rgb},
    foundation::error::{LifecalError, LifecalResult},
    render::plan::{DrawOp, PagePlan},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Face, size and style of a text run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.slant = FontSlant::Italic;
        self
    }
}

/// Measured size of a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// Outline drawn around a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

/// A line of text placed on the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    pub text: String,
    /// Start of the baseline.
    pub origin: Point,
    pub font: FontSpec,
    pub color: Rgb,
    /// Clockwise rotation about `origin`, in radians (y axis points down).
    pub rotation_rad: f64,
}

/// Source of text extents used while compiling a page.
pub trait TextMeasure {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> LifecalResult<TextExtents>;
}

/// A single-page document writer.
///
/// Calls arrive as `begin_document`, any number of draws, then `end_page`, which writes the
/// output and releases it. A backend may be reused for further documents afterwards.
pub trait PageBackend: TextMeasure {
    fn begin_document(&mut self, path: &Path, width: f64, height: f64) -> LifecalResult<()>;

    fn draw_rect(&mut self, rect: Rect, stroke: Option<Stroke>, fill: Rgb) -> LifecalResult<()>;

    fn draw_text(&mut self, run: &TextRun) -> LifecalResult<()>;

    /// Finish the page and write the document; returns the written path.
    fn end_page(&mut self) -> LifecalResult<PathBuf>;
}

/// Replay a compiled [`PagePlan`] into `backend` as one document at `path`.
pub fn execute_plan<B: PageBackend + ?Sized>(
    backend: &mut B,
    plan: &PagePlan,
    path: &Path,
) -> LifecalResult<PathBuf> {
    if !(plan.width > 0.0 && plan.height > 0.0) {
        return Err(LifecalError::render(format!(
            "page size must be > 0 (got {}x{})",
            plan.width, plan.height
        )));
    }

    backend.begin_document(path, plan.width, plan.height)?;
    for op in &plan.ops {
        match op {
            DrawOp::Rect { rect, stroke, fill } => backend.draw_rect(*rect, *stroke, *fill)?,
            DrawOp::Text(run) => backend.draw_text(run)?,
        }
    }
    backend.end_page()
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
