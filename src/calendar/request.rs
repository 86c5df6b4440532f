use chrono::NaiveDate;

use crate::foundation::{
    config::LayoutConfig,
    core::back_up_to_monday,
    error::{LifecalError, LifecalResult},
};

pub const DEFAULT_TITLE: &str = "LIFE CALENDAR";
pub const DEFAULT_AGE_ROWS: u32 = 90;

/// Validated input for one calendar document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CalendarRequest {
    birthdate: NaiveDate,
    title: String,
    age_rows: u32,
    darken_until: Option<NaiveDate>,
    sidebar_text: Option<String>,
    subtitle_text: Option<String>,
}

impl CalendarRequest {
    pub fn builder(birthdate: NaiveDate) -> CalendarRequestBuilder {
        CalendarRequestBuilder::new(birthdate)
    }

    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn age_rows(&self) -> u32 {
        self.age_rows
    }

    /// Always a Monday when present.
    pub fn darken_until(&self) -> Option<NaiveDate> {
        self.darken_until
    }

    pub fn sidebar_text(&self) -> Option<&str> {
        self.sidebar_text.as_deref()
    }

    pub fn subtitle_text(&self) -> Option<&str> {
        self.subtitle_text.as_deref()
    }

    /// Same request anchored at another birth-equivalent date.
    ///
    /// Title, rows and the darken cutoff were validated already and carry over unchanged.
    pub fn with_birthdate(&self, birthdate: NaiveDate) -> Self {
        Self {
            birthdate,
            ..self.clone()
        }
    }
}

/// Builder for [`CalendarRequest`]; all validation happens in [`CalendarRequestBuilder::build`].
#[derive(Clone, Debug)]
pub struct CalendarRequestBuilder {
    birthdate: NaiveDate,
    title: String,
    age_rows: u32,
    darken_until: Option<NaiveDate>,
    sidebar_text: Option<String>,
    subtitle_text: Option<String>,
}

impl CalendarRequestBuilder {
    pub fn new(birthdate: NaiveDate) -> Self {
        Self {
            birthdate,
            title: DEFAULT_TITLE.to_string(),
            age_rows: DEFAULT_AGE_ROWS,
            darken_until: None,
            sidebar_text: None,
            subtitle_text: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn age_rows(mut self, rows: u32) -> Self {
        self.age_rows = rows;
        self
    }

    pub fn darken_until(mut self, cutoff: Option<NaiveDate>) -> Self {
        self.darken_until = cutoff;
        self
    }

    pub fn sidebar_text(mut self, text: Option<String>) -> Self {
        self.sidebar_text = text.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn subtitle_text(mut self, text: Option<String>) -> Self {
        self.subtitle_text = text.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn build(self, config: &LayoutConfig) -> LifecalResult<CalendarRequest> {
        let title_len = self.title.chars().count();
        if title_len > config.max_title_len {
            return Err(LifecalError::configuration(format!(
                "title can't be longer than {} characters (got {title_len})",
                config.max_title_len
            )));
        }
        if self.age_rows < config.min_rows || self.age_rows > config.max_rows {
            return Err(LifecalError::configuration(format!(
                "invalid age {}, must be between {} and {}",
                self.age_rows, config.min_rows, config.max_rows
            )));
        }

        Ok(CalendarRequest {
            birthdate: self.birthdate,
            title: self.title,
            age_rows: self.age_rows,
            darken_until: self.darken_until.map(back_up_to_monday),
            sidebar_text: self.sidebar_text,
            subtitle_text: self.subtitle_text,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/request.rs"]
mod tests;
