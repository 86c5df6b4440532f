//! lifecal renders printable "life calendars": one box per week of a life, one row per year.
//!
//! The pipeline is split the same way at every call site:
//!
//! - Build a validated [`CalendarRequest`] against a [`LayoutConfig`]
//! - [`build_calendar`] plans the geometry and classifies every week into a [`Calendar`]
//! - [`compile_page`] resolves the calendar into a backend-agnostic [`PagePlan`]
//! - A [`PageBackend`] ([`SvgBackend`] or [`PngBackend`]) replays the plan into a document
//!
//! [`run_sweep`] repeats this for every day of a date range, one document per day.
#![forbid(unsafe_code)]

mod calendar;
mod foundation;
mod render;

pub use crate::foundation::config::{LayoutConfig, PaletteConfig, TypographyConfig, WEEKS_PER_ROW};
pub use crate::foundation::core::{
    DATE_INPUT_FORMATS, DateRange, Point, Rect, Rgb, back_up_to_monday, parse_date,
};
pub use crate::foundation::error::{LifecalError, LifecalResult};

pub use crate::calendar::classify::{Anchor, Classification, WeekLabel, classify, is_anchor_week};
pub use crate::calendar::geometry::GridGeometry;
pub use crate::calendar::grid::{Calendar, WeekCell, build_calendar};
pub use crate::calendar::request::{
    CalendarRequest, CalendarRequestBuilder, DEFAULT_AGE_ROWS, DEFAULT_TITLE,
};
pub use crate::calendar::sweep::{SweepController, SweepOpts, SweepState, run_sweep};

pub use crate::render::backend::{
    FontSlant, FontSpec, FontWeight, PageBackend, Stroke, TextExtents, TextMeasure, TextRun,
    execute_plan,
};
pub use crate::render::pipeline::{
    BackendSettings, OutputFormat, OutputNaming, create_backend, render_calendar, render_document,
    render_sweep,
};
pub use crate::render::plan::{DrawOp, PagePlan, RenderStyle, cell_fill, compile_page};
pub use crate::render::raster::PngBackend;
pub use crate::render::svg::SvgBackend;
pub use crate::render::text::ParleyTextMeasure;
