use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    calendar::{
        grid::{Calendar, build_calendar},
        request::CalendarRequest,
        sweep::{SweepOpts, run_sweep},
    },
    foundation::{config::LayoutConfig, core::DateRange, error::LifecalResult},
    render::{
        backend::{PageBackend, execute_plan},
        plan::{RenderStyle, compile_page},
        raster::PngBackend,
        svg::SvgBackend,
    },
};

/// Available document formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OutputFormat {
    /// Vector document written by [`SvgBackend`].
    #[default]
    Svg,
    /// Raster document written by [`PngBackend`].
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Format implied by a file extension, if recognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Backend-agnostic settings.
#[derive(Clone, Debug)]
pub struct BackendSettings {
    /// Pixels per page unit for raster output.
    pub raster_scale: f64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self { raster_scale: 1.0 }
    }
}

/// Create a document backend for `format`.
pub fn create_backend(
    format: OutputFormat,
    settings: &BackendSettings,
) -> LifecalResult<Box<dyn PageBackend + Send>> {
    match format {
        OutputFormat::Svg => Ok(Box::new(SvgBackend::new())),
        OutputFormat::Png => Ok(Box::new(PngBackend::new(settings.raster_scale)?)),
    }
}

/// Output paths for single documents and sweeps.
///
/// The extension of the requested filename is replaced by the format's extension; sweep
/// documents get the day appended to the stem as `_dd-mm-yyyy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNaming {
    dir: PathBuf,
    stem: String,
    format: OutputFormat,
}

impl OutputNaming {
    pub fn new(filename: &Path, format: OutputFormat) -> Self {
        let dir = filename.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = filename
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "life_calendar".to_string());
        Self { dir, stem, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn single(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.stem, self.format.extension()))
    }

    pub fn for_day(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "{}_{}.{}",
            self.stem,
            day.format("%d-%m-%Y"),
            self.format.extension()
        ))
    }
}

/// Compile `calendar` into a page and write it through `backend` to `out`.
#[tracing::instrument(skip(backend, calendar, request, config), fields(out = %out.display()))]
pub fn render_calendar<B: PageBackend + ?Sized>(
    backend: &mut B,
    calendar: &Calendar,
    request: &CalendarRequest,
    config: &LayoutConfig,
    style: RenderStyle,
    out: &Path,
) -> LifecalResult<PathBuf> {
    let plan = compile_page(calendar, request, config, style, backend)?;
    tracing::debug!(ops = plan.ops.len(), "compiled page plan");
    execute_plan(backend, &plan, out)
}

/// Build the calendar for `request` and render it to `out`.
pub fn render_document<B: PageBackend + ?Sized>(
    backend: &mut B,
    request: &CalendarRequest,
    config: &LayoutConfig,
    style: RenderStyle,
    out: &Path,
) -> LifecalResult<PathBuf> {
    let calendar = build_calendar(request, config)?;
    render_calendar(backend, &calendar, request, config, style, out)
}

/// Render one document per day of `range`, named by [`OutputNaming::for_day`].
///
/// Every day gets a fresh backend so parallel workers never share a document.
pub fn render_sweep(
    range: DateRange,
    template: &CalendarRequest,
    config: &LayoutConfig,
    style: RenderStyle,
    naming: &OutputNaming,
    settings: &BackendSettings,
    opts: &SweepOpts,
) -> LifecalResult<Vec<PathBuf>> {
    run_sweep(range, template, config, opts, |request, calendar| {
        let mut backend = create_backend(naming.format(), settings)?;
        let out = naming.for_day(request.birthdate());
        render_calendar(backend.as_mut(), calendar, request, config, style, &out)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
