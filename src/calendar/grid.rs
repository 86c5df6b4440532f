use chrono::{Days, NaiveDate};

use crate::{
    calendar::{
        classify::{Anchor, WeekLabel, classify},
        geometry::GridGeometry,
        request::CalendarRequest,
    },
    foundation::{
        config::{LayoutConfig, WEEKS_PER_ROW},
        core::{Point, back_up_to_monday},
        error::{LifecalError, LifecalResult},
    },
};

/// One positioned, classified week of the grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WeekCell {
    pub row: u32,
    pub col: u32,
    /// Monday that begins this week.
    pub week_start: NaiveDate,
    pub label: WeekLabel,
    pub is_past: bool,
    /// Top-left corner of the cell's box.
    pub position: Point,
}

/// The whole grid for one document: `rows * 52` cells in row-major order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Calendar {
    anchor_monday: NaiveDate,
    rows: u32,
    geometry: GridGeometry,
    cells: Vec<WeekCell>,
}

impl Calendar {
    /// Monday on or before the birth date; start of row 0.
    pub fn anchor_monday(&self) -> NaiveDate {
        self.anchor_monday
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn cells(&self) -> &[WeekCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row(&self, row: u32) -> Option<&[WeekCell]> {
        let width = WEEKS_PER_ROW as usize;
        let start = (row as usize).checked_mul(width)?;
        self.cells.get(start..start.checked_add(width)?)
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&WeekCell> {
        if col >= WEEKS_PER_ROW {
            return None;
        }
        self.row(row)?.get(col as usize)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[WeekCell]> {
        self.cells.chunks_exact(WEEKS_PER_ROW as usize)
    }
}

/// Build the positioned, classified grid for `request`.
///
/// The result is a pure function of its inputs. Either every cell is produced or an error is
/// returned.
#[tracing::instrument(skip(request, config), fields(birthdate = %request.birthdate(), rows = request.age_rows()))]
pub fn build_calendar(request: &CalendarRequest, config: &LayoutConfig) -> LifecalResult<Calendar> {
    let rows = request.age_rows();
    let geometry = GridGeometry::plan(config, rows);
    tracing::debug!(
        box_size = geometry.box_size,
        x_margin = geometry.x_margin,
        "planned grid geometry"
    );

    let anchor_monday = back_up_to_monday(request.birthdate());
    let birth = Anchor::of(request.birthdate());
    let darken_until = request.darken_until();

    let mut cells = Vec::with_capacity((rows as usize) * (WEEKS_PER_ROW as usize));
    for row in 0..rows {
        for col in 0..WEEKS_PER_ROW {
            let week_start = week_start_for(anchor_monday, row, col)?;
            let class = classify(week_start, birth, darken_until)?;
            cells.push(WeekCell {
                row,
                col,
                week_start,
                label: class.label,
                is_past: class.darkened,
                position: geometry.cell_origin(row, col),
            });
        }
    }

    Ok(Calendar {
        anchor_monday,
        rows,
        geometry,
        cells,
    })
}

fn week_start_for(anchor_monday: NaiveDate, row: u32, col: u32) -> LifecalResult<NaiveDate> {
    let weeks = u64::from(row) * u64::from(WEEKS_PER_ROW) + u64::from(col);
    anchor_monday
        .checked_add_days(Days::new(weeks * 7))
        .ok_or_else(|| {
            LifecalError::date_arithmetic(format!(
                "week {weeks} after {anchor_monday} is outside the supported calendar"
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/grid.rs"]
mod tests;
