use chrono::{Datelike, Days, NaiveDate};

use crate::foundation::error::{LifecalError, LifecalResult};

/// A month/day pair that marks a significant week in every year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    month: u32,
    day: u32,
}

impl Anchor {
    pub const NEW_YEAR: Self = Self { month: 1, day: 1 };

    /// Validated against a leap year, so `(2, 29)` is accepted.
    pub fn new(month: u32, day: u32) -> LifecalResult<Self> {
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(LifecalError::configuration(format!(
                "invalid anchor month/day {month}/{day}"
            )));
        }
        Ok(Self { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    /// The anchor's date in `year`.
    ///
    /// February 29 falls back to February 28 in non-leap years. This is intentional: a leap-day
    /// birthday is celebrated on the last day of February.
    pub fn in_year(self, year: i32) -> LifecalResult<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| {
                if self.month == 2 && self.day == 29 {
                    NaiveDate::from_ymd_opt(year, 2, 28)
                } else {
                    None
                }
            })
            .ok_or_else(|| {
                LifecalError::date_arithmetic(format!(
                    "anchor {:02}-{:02} has no date in year {year}",
                    self.day, self.month
                ))
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WeekLabel {
    Normal,
    BirthdayWeek,
    NewYearWeek,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    pub label: WeekLabel,
    /// The week started before the darken-until cutoff.
    pub darkened: bool,
}

/// True when the anchor, taken in the week's start year or the year after, lies in
/// `[week_start, week_start + 7 days)`.
///
/// Both years are needed: a week starting in late December can contain the next year's anchor.
pub fn is_anchor_week(week_start: NaiveDate, anchor: Anchor) -> LifecalResult<bool> {
    let end = week_start.checked_add_days(Days::new(7)).ok_or_else(|| {
        LifecalError::date_arithmetic(format!("week starting {week_start} has no end"))
    })?;
    let year = week_start.year();
    let this_year = anchor.in_year(year)?;
    let next_year = anchor.in_year(year + 1)?;

    let inside = |d: NaiveDate| week_start <= d && d < end;
    Ok(inside(this_year) || inside(next_year))
}

/// Classify one week against the birth anchor and the new-year anchor.
pub fn classify(
    week_start: NaiveDate,
    birth: Anchor,
    darken_until: Option<NaiveDate>,
) -> LifecalResult<Classification> {
    let label = if is_anchor_week(week_start, birth)? {
        WeekLabel::BirthdayWeek
    } else if is_anchor_week(week_start, Anchor::NEW_YEAR)? {
        WeekLabel::NewYearWeek
    } else {
        WeekLabel::Normal
    };

    Ok(Classification {
        label,
        darkened: darken_until.is_some_and(|cutoff| week_start < cutoff),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/classify.rs"]
mod tests;
