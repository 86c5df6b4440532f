use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use crate::{
    foundation::core::{Affine, Rect, Rgb},
    foundation::error::{LifecalError, LifecalResult},
    render::{
        backend::{
            FontSlant, FontSpec, FontWeight, PageBackend, Stroke, TextExtents, TextMeasure,
            TextRun,
        },
        text::ParleyTextMeasure,
    },
};

/// In-memory SVG page being assembled between `begin_document` and `end_page`.
#[derive(Clone, Debug)]
pub(crate) struct SvgPage {
    pub(crate) path: PathBuf,
    width: f64,
    height: f64,
    body: String,
}

impl SvgPage {
    pub(crate) fn new(path: &Path, width: f64, height: f64) -> Self {
        Self {
            path: path.to_path_buf(),
            width,
            height,
            body: String::new(),
        }
    }

    pub(crate) fn width(&self) -> f64 {
        self.width
    }

    pub(crate) fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn rect(&mut self, rect: Rect, stroke: Option<Stroke>, fill: Rgb) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
            num(rect.x0),
            num(rect.y0),
            num(rect.width()),
            num(rect.height()),
            fill.to_css()
        ));
        if let Some(s) = stroke {
            self.body.push_str(&format!(
                r#" stroke="{}" stroke-width="{}""#,
                s.color.to_css(),
                num(s.width)
            ));
        }
        self.body.push_str("/>\n");
    }

    pub(crate) fn text(&mut self, run: &TextRun) {
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}""#,
            num(run.origin.x),
            num(run.origin.y),
            escape(&run.font.family),
            num(run.font.size)
        ));
        if run.font.weight == FontWeight::Bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if run.font.slant == FontSlant::Italic {
            self.body.push_str(r#" font-style="italic""#);
        }
        self.body
            .push_str(&format!(r#" fill="{}""#, run.color.to_css()));
        if run.rotation_rad != 0.0 {
            let [a, b, c, d, e, f] =
                Affine::rotate_about(run.rotation_rad, run.origin).as_coeffs();
            self.body.push_str(&format!(
                r#" transform="matrix({} {} {} {} {} {})""#,
                num(a),
                num(b),
                num(c),
                num(d),
                num(e),
                num(f)
            ));
        }
        self.body
            .push_str(&format!(">{}</text>\n", escape(&run.text)));
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(self.width),
            h = num(self.height)
        ));
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// Writes each page as a standalone SVG document.
pub struct SvgBackend {
    measure: ParleyTextMeasure,
    page: Option<SvgPage>,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgBackend {
    pub fn new() -> Self {
        Self {
            measure: ParleyTextMeasure::new(),
            page: None,
        }
    }

    fn page_mut(&mut self) -> LifecalResult<&mut SvgPage> {
        self.page
            .as_mut()
            .ok_or_else(|| LifecalError::render("draw call outside begin_document/end_page"))
    }
}

impl TextMeasure for SvgBackend {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> LifecalResult<TextExtents> {
        self.measure.measure_text(text, font)
    }
}

impl PageBackend for SvgBackend {
    fn begin_document(&mut self, path: &Path, width: f64, height: f64) -> LifecalResult<()> {
        if let Some(stale) = self.page.replace(SvgPage::new(path, width, height)) {
            tracing::warn!(path = %stale.path.display(), "discarding unfinished svg document");
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
        write_output(&page.path, page.to_svg_string().as_bytes())?;
        tracing::info!(path = %page.path.display(), "wrote svg document");
        Ok(page.path)
    }
}

/// Create parent directories and write `bytes` to `path`.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> LifecalResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            LifecalError::render(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| LifecalError::render(format!("write '{}': {e}", path.display())))
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
