use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::foundation::error::{LifecalError, LifecalResult};

pub use kurbo::{Affine, Point, Rect};

/// Accepted input formats for user-supplied dates.
pub const DATE_INPUT_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d-%m-%Y"];

/// Parse a `dd/mm/yyyy` or `dd-mm-yyyy` date.
pub fn parse_date(input: &str) -> LifecalResult<NaiveDate> {
    let trimmed = input.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            LifecalError::configuration(format!(
                "incorrect date format '{trimmed}': must be dd-mm-yyyy or dd/mm/yyyy"
            ))
        })
}

/// Walk back one day at a time until the date is a Monday.
pub fn back_up_to_monday(date: NaiveDate) -> NaiveDate {
    let mut d = date;
    while d.weekday() != Weekday::Mon {
        match d.pred_opt() {
            Some(prev) => d = prev,
            None => break,
        }
    }
    d
}

/// Inclusive range of calendar days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate, // inclusive
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> LifecalResult<Self> {
        if start > end {
            return Err(LifecalError::configuration(format!(
                "end date {end} precedes start date {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn len_days(self) -> u64 {
        let span = (self.end - self.start).num_days();
        u64::try_from(span).unwrap_or(0) + 1
    }

    pub fn contains(self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.checked_add_days(Days::new(1)))
            .take_while(move |d| *d <= end)
    }
}

/// Straight (non-premultiplied) RGB colour with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Self = Self::gray(1.0);
    pub const BLACK: Self = Self::gray(0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Add a per-channel delta, clamping the result into `[0, 1]`.
    pub fn offset(self, delta: Self) -> Self {
        Self {
            r: (self.r + delta.r).clamp(0.0, 1.0),
            g: (self.g + delta.g).clamp(0.0, 1.0),
            b: (self.b + delta.b).clamp(0.0, 1.0),
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        fn channel(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// CSS/SVG colour literal, e.g. `rgb(128,128,128)`.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r},{g},{b})")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
