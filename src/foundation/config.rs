use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use chrono::format::{Item, StrftimeItems};

use crate::foundation::{
    core::Rgb,
    error::{LifecalError, LifecalResult},
};

/// Number of week columns in every calendar row.
pub const WEEKS_PER_ROW: u32 = 52;

/// Font family, sizes and the descriptive strings drawn on the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    pub font_family: String,
    pub big_font_size: f64,
    pub small_font_size: f64,
    pub tiny_font_size: f64,
    pub key_birthday_desc: String,
    pub key_newyear_desc: String,
    /// `chrono` format string for row labels.
    pub row_label_format: String,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            big_font_size: 40.0,
            small_font_size: 16.0,
            tiny_font_size: 14.0,
            key_birthday_desc: "Week of your birthday".to_string(),
            key_newyear_desc: "First week of the new year".to_string(),
            row_label_format: "%d %b, %Y".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: Rgb,
    pub stroke: Rgb,
    pub text: Rgb,
    pub normal: Rgb,
    pub birthday: Rgb,
    pub newyear: Rgb,
    /// Added to a cell's fill when the week is darkened.
    pub darkened_delta: Rgb,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            stroke: Rgb::BLACK,
            text: Rgb::BLACK,
            normal: Rgb::WHITE,
            birthday: Rgb::gray(0.5),
            newyear: Rgb::gray(0.8),
            darkened_delta: Rgb::gray(-0.4),
        }
    }
}

/// Immutable page and grid configuration.
///
/// Defaults describe an A1 sheet at 72 units per inch. Every component receives the
/// configuration by reference; nothing mutates it after startup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub doc_width: f64,
    pub doc_height: f64,
    /// Distance from the top of the page to the first grid row.
    pub y_margin: f64,
    /// Extra space reserved above the grid for column headers.
    pub header_reserve: f64,
    pub box_margin: f64,
    pub box_line_width: f64,
    pub min_rows: u32,
    pub max_rows: u32,
    pub max_title_len: usize,
    pub typography: TypographyConfig,
    pub palette: PaletteConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            doc_width: 1683.0,
            doc_height: 2383.0,
            y_margin: 144.0,
            header_reserve: 36.0,
            box_margin: 6.0,
            box_line_width: 3.0,
            min_rows: 80,
            max_rows: 100,
            max_title_len: 30,
            typography: TypographyConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Load a JSON configuration file; missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> LifecalResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open layout config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            LifecalError::configuration(format!(
                "parse layout config '{}': {e}",
                path.display()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Space above the grid taken by the title band and the column headers.
    pub fn top_band_reserve(&self) -> f64 {
        self.y_margin + self.header_reserve
    }

    pub fn validate(&self) -> LifecalResult<()> {
        fn positive(name: &str, v: f64) -> LifecalResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(LifecalError::configuration(format!(
                    "layout '{name}' must be finite and > 0 (got {v})"
                )));
            }
            Ok(())
        }

        positive("doc_width", self.doc_width)?;
        positive("doc_height", self.doc_height)?;
        positive("y_margin", self.y_margin)?;
        positive("box_line_width", self.box_line_width)?;
        positive("big_font_size", self.typography.big_font_size)?;
        positive("small_font_size", self.typography.small_font_size)?;
        positive("tiny_font_size", self.typography.tiny_font_size)?;
        if !self.header_reserve.is_finite() || self.header_reserve < 0.0 {
            return Err(LifecalError::configuration(
                "layout 'header_reserve' must be finite and >= 0",
            ));
        }
        if !self.box_margin.is_finite() || self.box_margin < 0.0 {
            return Err(LifecalError::configuration(
                "layout 'box_margin' must be finite and >= 0",
            ));
        }
        if self.min_rows == 0 || self.min_rows > self.max_rows {
            return Err(LifecalError::configuration(format!(
                "layout row bounds must satisfy 0 < min_rows <= max_rows (got {}..={})",
                self.min_rows, self.max_rows
            )));
        }
        if self.max_title_len == 0 {
            return Err(LifecalError::configuration(
                "layout 'max_title_len' must be > 0",
            ));
        }
        let label_format = &self.typography.row_label_format;
        if StrftimeItems::new(label_format).any(|item| matches!(item, Item::Error)) {
            return Err(LifecalError::configuration(format!(
                "invalid row label format '{label_format}'"
            )));
        }

        let densest = crate::calendar::geometry::GridGeometry::plan(self, self.max_rows);
        if densest.box_size <= 0.0 {
            return Err(LifecalError::configuration(format!(
                "page height {} leaves no room for {} rows",
                self.doc_height, self.max_rows
            )));
        }
        let widest = crate::calendar::geometry::GridGeometry::plan(self, self.min_rows);
        if widest.x_margin < 0.0 {
            return Err(LifecalError::configuration(format!(
                "page width {} is too narrow for {WEEKS_PER_ROW} columns",
                self.doc_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
