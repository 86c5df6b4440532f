use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    foundation::core::{Rect, Rgb},
    foundation::error::{LifecalError, LifecalResult},
    render::{
        backend::{FontSpec, PageBackend, Stroke, TextExtents, TextMeasure, TextRun},
        svg::SvgPage,
        text::ParleyTextMeasure,
    },
};

// Avoid pathological allocations from oversized pages or scales.
const MAX_DIM: u32 = 16_384;

/// Rasterizes each page to a PNG.
///
/// The page is assembled as SVG and rendered through `resvg`, so both backends share one
/// drawing model. Fonts come from the system font database, loaded once per backend.
pub struct PngBackend {
    measure: ParleyTextMeasure,
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f64,
    page: Option<SvgPage>,
}

impl PngBackend {
    /// `scale` is pixels per page unit.
    pub fn new(scale: f64) -> LifecalResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LifecalError::configuration(format!(
                "raster scale must be finite and > 0 (got {scale})"
            )));
        }

        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for rasterization");

        Ok(Self {
            measure: ParleyTextMeasure::new(),
            fontdb: Arc::new(db),
            scale,
            page: None,
        })
    }

    fn page_mut(&mut self) -> LifecalResult<&mut SvgPage> {
        self.page
            .as_mut()
            .ok_or_else(|| LifecalError::render("draw call outside begin_document/end_page"))
    }

    fn rasterize(&self, page: &SvgPage) -> LifecalResult<(u32, u32, Vec<u8>)> {
        let width = to_px(page.width() * self.scale)?;
        let height = to_px(page.height() * self.scale)?;

        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&page.to_svg_string(), &opts)
            .map_err(|e| LifecalError::render(format!("parse page svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| LifecalError::render("failed to allocate page pixmap"))?;
        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut rgba = pixmap.data().to_vec();
        unpremultiply_rgba8_in_place(&mut rgba);
        Ok((width, height, rgba))
    }
}

impl TextMeasure for PngBackend {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> LifecalResult<TextExtents> {
        self.measure.measure_text(text, font)
    }
}

impl PageBackend for PngBackend {
    fn begin_document(&mut self, path: &Path, width: f64, height: f64) -> LifecalResult<()> {
        if let Some(stale) = self.page.replace(SvgPage::new(path, width, height)) {
            tracing::warn!(path = %stale.path.display(), "discarding unfinished png document");
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, stroke: Option<Stroke>, fill: Rgb) -> LifecalResult<()> {
        self.page_mut()?.rect(rect, stroke, fill);
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun) -> LifecalResult<()> {
        self.page_mut()?.text(run);
        Ok(())
    }

    fn end_page(&mut self) -> LifecalResult<PathBuf> {
        let page = self
            .page
            .take()
            .ok_or_else(|| LifecalError::render("end_page without begin_document"))?;
        let (width, height, rgba) = self.rasterize(&page)?;

        if let Some(parent) = page.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                LifecalError::render(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        image::save_buffer_with_format(
            &page.path,
            &rgba,
            width,
            height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| LifecalError::render(format!("write png '{}': {e}", page.path.display())))?;

        tracing::info!(path = %page.path.display(), width, height, "wrote png document");
        Ok(page.path)
    }
}

fn to_px(v: f64) -> LifecalResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(LifecalError::render(format!("invalid raster size {v}")));
    }
    let px = v.ceil().max(1.0);
    if px > f64::from(MAX_DIM) {
        return Err(LifecalError::render(format!(
            "raster size {px} exceeds {MAX_DIM} pixels"
        )));
    }
    Ok(px as u32)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
