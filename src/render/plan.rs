use std::fmt::Write as _;

use crate::{
    calendar::{
        classify::WeekLabel,
        grid::{Calendar, WeekCell},
        request::CalendarRequest,
    },
    foundation::{
        config::{LayoutConfig, PaletteConfig, WEEKS_PER_ROW},
        core::{Point, Rect, Rgb},
        error::{LifecalError, LifecalResult},
    },
    render::backend::{FontSpec, Stroke, TextMeasure, TextRun},
};

/// Presentation variant of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RenderStyle {
    /// Coloured birthday/new-year weeks, a colour key and dated rows.
    #[default]
    Modern,
    /// Plain boxes and rows numbered by age; no key.
    Classic,
}

/// A single draw operation in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        stroke: Option<Stroke>,
        fill: Rgb,
    },
    Text(TextRun),
}

/// Fully resolved page: size plus draw operations in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// Resolve `calendar` into a [`PagePlan`].
///
/// Paint order: background, title and subtitle, colour key, column headers, then each row's
/// label followed by its cells, then the sidebar.
pub fn compile_page<M: TextMeasure + ?Sized>(
    calendar: &Calendar,
    request: &CalendarRequest,
    config: &LayoutConfig,
    style: RenderStyle,
    measure: &mut M,
) -> LifecalResult<PagePlan> {
    let typo = &config.typography;
    let palette = &config.palette;
    let geom = calendar.geometry();
    let box_size = geom.box_size;
    let text_color = palette.text;
    let cell_stroke = Some(Stroke {
        color: palette.stroke,
        width: config.box_line_width,
    });

    let mut ops = Vec::with_capacity(calendar.len() + calendar.rows() as usize + 64);
    ops.push(DrawOp::Rect {
        rect: Rect::new(0.0, 0.0, config.doc_width, config.doc_height),
        stroke: None,
        fill: palette.background,
    });

    // Title, centred in the band above the grid.
    let title_font = FontSpec::new(&typo.font_family, typo.big_font_size).bold();
    let title = measure.measure_text(request.title(), &title_font)?;
    let title_baseline = config.y_margin / 2.0 - title.height / 2.0;
    ops.push(text(
        request.title(),
        Point::new(config.doc_width / 2.0 - title.width / 2.0, title_baseline),
        title_font,
        text_color,
    ));

    if let Some(subtitle) = request.subtitle_text() {
        let font = FontSpec::new(&typo.font_family, typo.small_font_size);
        let ext = measure.measure_text(subtitle, &font)?;
        ops.push(text(
            subtitle,
            Point::new(
                config.doc_width / 2.0 - ext.width / 2.0,
                title_baseline + ext.height * 2.0,
            ),
            font,
            text_color,
        ));
    }

    let tiny = FontSpec::new(&typo.font_family, typo.tiny_font_size);

    if style == RenderStyle::Modern {
        let mut pos = Point::new(geom.x_margin / 4.0, geom.x_margin / 4.0);
        for (desc, colour) in [
            (&typo.key_birthday_desc, palette.birthday),
            (&typo.key_newyear_desc, palette.newyear),
        ] {
            ops.push(DrawOp::Rect {
                rect: Rect::from_origin_size(pos, (box_size, box_size)),
                stroke: cell_stroke,
                fill: colour,
            });
            let ext = measure.measure_text(desc, &tiny)?;
            let text_x = pos.x + box_size * 1.5;
            ops.push(text(
                desc,
                Point::new(text_x, pos.y + box_size / 2.0 + ext.height / 2.0),
                tiny.clone(),
                text_color,
            ));
            pos.x = text_x + ext.width + box_size * 2.0;
        }
    }

    // Week numbers above the first row.
    for col in 0..WEEKS_PER_ROW {
        let label = (col + 1).to_string();
        let ext = measure.measure_text(&label, &tiny)?;
        let origin = geom.cell_origin(0, col);
        ops.push(text(
            &label,
            Point::new(
                origin.x + box_size / 2.0 - ext.width / 2.0,
                geom.y_margin - box_size,
            ),
            tiny.clone(),
            text_color,
        ));
    }

    let row_font = tiny.clone().italic();
    for (row_idx, row) in calendar.iter_rows().enumerate() {
        let Some(first) = row.first() else {
            continue;
        };
        let label = row_label(first, row_idx, style, &typo.row_label_format)?;
        let ext = measure.measure_text(&label, &row_font)?;
        ops.push(text(
            &label,
            Point::new(
                geom.x_margin - ext.width - box_size,
                first.position.y + box_size / 2.0 + ext.height / 2.0,
            ),
            row_font.clone(),
            text_color,
        ));

        for cell in row {
            ops.push(DrawOp::Rect {
                rect: Rect::from_origin_size(cell.position, (box_size, box_size)),
                stroke: cell_stroke,
                fill: cell_fill(cell, palette, style),
            });
        }
    }

    if let Some(sidebar) = request.sidebar_text() {
        let font = FontSpec::new(&typo.font_family, typo.small_font_size);
        let ext = measure.measure_text(sidebar, &font)?;
        let grid_top = geom.y_margin;
        let grid_bottom = geom.y_margin + f64::from(calendar.rows()) * geom.pitch();
        let centre_y = (grid_top + grid_bottom) / 2.0;
        ops.push(DrawOp::Text(TextRun {
            text: sidebar.to_string(),
            origin: Point::new(geom.x_margin / 4.0 + ext.height, centre_y + ext.width / 2.0),
            font,
            color: text_color,
            rotation_rad: -std::f64::consts::FRAC_PI_2,
        }));
    }

    Ok(PagePlan {
        width: config.doc_width,
        height: config.doc_height,
        ops,
    })
}

/// Fill colour for a cell in the given style.
pub fn cell_fill(cell: &WeekCell, palette: &PaletteConfig, style: RenderStyle) -> Rgb {
    let base = match (style, cell.label) {
        (RenderStyle::Classic, _) | (RenderStyle::Modern, WeekLabel::Normal) => palette.normal,
        (RenderStyle::Modern, WeekLabel::BirthdayWeek) => palette.birthday,
        (RenderStyle::Modern, WeekLabel::NewYearWeek) => palette.newyear,
    };
    if cell.is_past {
        base.offset(palette.darkened_delta)
    } else {
        base
    }
}

fn row_label(
    first: &WeekCell,
    row_idx: usize,
    style: RenderStyle,
    date_format: &str,
) -> LifecalResult<String> {
    match style {
        RenderStyle::Classic => Ok(row_idx.to_string()),
        RenderStyle::Modern => {
            let mut s = String::new();
            write!(s, "{}", first.week_start.format(date_format)).map_err(|_| {
                LifecalError::configuration(format!("invalid row label format '{date_format}'"))
            })?;
            Ok(s)
        }
    }
}

fn text(s: &str, origin: Point, font: FontSpec, color: Rgb) -> DrawOp {
    DrawOp::Text(TextRun {
        text: s.to_string(),
        origin,
        font,
        color,
        rotation_rad: 0.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
