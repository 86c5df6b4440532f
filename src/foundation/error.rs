use chrono::NaiveDate;

/// Convenience result type used across lifecal.
pub type LifecalResult<T> = Result<T, LifecalError>;

/// Top-level error taxonomy used by calendar and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum LifecalError {
    /// Invalid user-provided request, date string, range or layout configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Anchor or week arithmetic that fell outside the representable calendar.
    #[error("date arithmetic error: {0}")]
    DateArithmetic(String),

    /// Failure reported by a document backend.
    #[error("render error: {0}")]
    Render(String),

    /// A sweep stopped at `date`; documents for earlier days are left in place.
    #[error("sweep aborted at {date}: {source}")]
    SweepAborted {
        /// Birth-equivalent date whose document failed.
        date: NaiveDate,
        /// Underlying failure for that day.
        source: Box<LifecalError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LifecalError {
    /// Build a [`LifecalError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`LifecalError::DateArithmetic`] value.
    pub fn date_arithmetic(msg: impl Into<String>) -> Self {
        Self::DateArithmetic(msg.into())
    }

    /// Build a [`LifecalError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Wrap `self` as the failure of one sweep day.
    pub fn sweep_aborted(self, date: NaiveDate) -> Self {
        Self::SweepAborted {
            date,
            source: Box::new(self),
        }
    }

    /// True for errors caused by user input rather than rendering or defects.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::SweepAborted { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
