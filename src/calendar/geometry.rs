use crate::foundation::{
    config::{LayoutConfig, WEEKS_PER_ROW},
    core::{Point, Rect},
};

/// Box size and margins for one calendar grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridGeometry {
    /// Side length of every week box.
    pub box_size: f64,
    /// Gap between neighbouring boxes.
    pub box_margin: f64,
    /// Left edge of the first column; the grid is horizontally centred.
    pub x_margin: f64,
    /// Top edge of the first row.
    pub y_margin: f64,
    /// Total page width the grid was centred in.
    pub doc_width: f64,
}

impl GridGeometry {
    /// Plan geometry for `rows` grid rows of [`WEEKS_PER_ROW`] columns.
    ///
    /// `rows` must already be within the configured bounds.
    pub fn plan(config: &LayoutConfig, rows: u32) -> Self {
        let rows = f64::from(rows.max(1));
        let columns = f64::from(WEEKS_PER_ROW);
        let box_margin = config.box_margin;
        let box_size = (config.doc_height - config.top_band_reserve()) / rows - box_margin;
        let x_margin = (config.doc_width - (box_size + box_margin) * columns) / 2.0;

        Self {
            box_size,
            box_margin,
            x_margin,
            y_margin: config.y_margin,
            doc_width: config.doc_width,
        }
    }

    /// Distance between the origins of adjacent boxes.
    pub fn pitch(&self) -> f64 {
        self.box_size + self.box_margin
    }

    /// Width covered by all columns including their trailing gaps.
    pub fn grid_width(&self) -> f64 {
        self.pitch() * f64::from(WEEKS_PER_ROW)
    }

    pub fn cell_origin(&self, row: u32, col: u32) -> Point {
        Point::new(
            self.x_margin + f64::from(col) * self.pitch(),
            self.y_margin + f64::from(row) * self.pitch(),
        )
    }

    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        let p = self.cell_origin(row, col);
        Rect::new(p.x, p.y, p.x + self.box_size, p.y + self.box_size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/geometry.rs"]
mod tests;
