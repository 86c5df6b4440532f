use std::{
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

use chrono::{Days, NaiveDate};
use rayon::prelude::*;

use crate::{
    calendar::{
        grid::{Calendar, build_calendar},
        request::CalendarRequest,
    },
    foundation::{
        config::LayoutConfig,
        core::DateRange,
        error::{LifecalError, LifecalResult},
    },
};

/// Progress of a [`SweepController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    Iterating(NaiveDate),
    Done,
}

/// Walks an inclusive date range one day at a time.
#[derive(Clone, Debug)]
pub struct SweepController {
    range: DateRange,
    state: SweepState,
}

impl SweepController {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            state: SweepState::Idle,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Move to the next day and return it, or `None` once the end date has been passed.
    pub fn advance(&mut self) -> Option<NaiveDate> {
        let next = match self.state {
            SweepState::Idle => Some(self.range.start),
            SweepState::Iterating(current) => current.checked_add_days(Days::new(1)),
            SweepState::Done => None,
        };

        self.state = match next {
            Some(d) if d <= self.range.end => SweepState::Iterating(d),
            _ => SweepState::Done,
        };
        match self.state {
            SweepState::Iterating(d) => Some(d),
            SweepState::Idle | SweepState::Done => None,
        }
    }
}

impl Iterator for SweepController {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SweepOpts {
    /// Render days on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Worker count for the pool; rayon's default when `None`.
    pub threads: Option<usize>,
}

/// Build and render one calendar per day of `range`.
///
/// Each day is used as the birth-equivalent date of `template`. `render_day` receives the day's
/// own request and calendar and returns the path it wrote; it must open and release its own
/// output. The first failure stops the sweep and is returned as [`LifecalError::SweepAborted`];
/// documents already written are left in place.
///
/// With `opts.parallel` the returned paths are in date order. Once any day fails, workers skip
/// the days they have not started; the earliest failing day among those attempted is reported.
#[tracing::instrument(skip(template, config, render_day), fields(start = %range.start, end = %range.end))]
pub fn run_sweep<F>(
    range: DateRange,
    template: &CalendarRequest,
    config: &LayoutConfig,
    opts: &SweepOpts,
    render_day: F,
) -> LifecalResult<Vec<PathBuf>>
where
    F: Fn(&CalendarRequest, &Calendar) -> LifecalResult<PathBuf> + Sync,
{
    let one_day = |date: NaiveDate| -> LifecalResult<PathBuf> {
        let request = template.with_birthdate(date);
        let calendar = build_calendar(&request, config).map_err(|e| e.sweep_aborted(date))?;
        let path = render_day(&request, &calendar).map_err(|e| e.sweep_aborted(date))?;
        tracing::debug!(%date, path = %path.display(), "sweep day rendered");
        Ok(path)
    };

    if !opts.parallel {
        let mut out = Vec::with_capacity(usize::try_from(range.len_days()).unwrap_or(0));
        for date in SweepController::new(range) {
            out.push(one_day(date)?);
        }
        return Ok(out);
    }

    let pool = build_thread_pool(opts.threads)?;
    let days: Vec<NaiveDate> = SweepController::new(range).collect();
    let stop = AtomicBool::new(false);
    let results: Vec<Option<LifecalResult<PathBuf>>> = pool.install(|| {
        days.par_iter()
            .map(|d| {
                if stop.load(Ordering::Acquire) {
                    return None;
                }
                let res = one_day(*d);
                if res.is_err() {
                    stop.store(true, Ordering::Release);
                }
                Some(res)
            })
            .collect()
    });

    // A skipped day implies a recorded failure, so the first error in date order wins.
    results.into_iter().flatten().collect()
}

fn build_thread_pool(threads: Option<usize>) -> LifecalResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LifecalError::configuration(
            "sweep 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LifecalError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/sweep.rs"]
mod tests;
