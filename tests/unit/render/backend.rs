use super::*;

#[derive(Default)]
struct MockBackend {
    calls: Vec<&'static str>,
}

impl TextMeasure for MockBackend {
    fn measure_text(&mut self, _text: &str, _font: &FontSpec) -> LifecalResult<TextExtents> {
        self.calls.push("measure_text");
        Ok(TextExtents::default())
    }
}

impl PageBackend for MockBackend {
    fn begin_document(&mut self, _path: &Path, _width: f64, _height: f64) -> LifecalResult<()> {
        self.calls.push("begin_document");
        Ok(())
    }

    fn draw_rect(&mut self, _rect: Rect, _stroke: Option<Stroke>, _fill: Rgb) -> LifecalResult<()> {
        self.calls.push("draw_rect");
        Ok(())
    }

    fn draw_text(&mut self, _run: &TextRun) -> LifecalResult<()> {
        self.calls.push("draw_text");
        Ok(())
    }

    fn end_page(&mut self) -> LifecalResult<PathBuf> {
        self.calls.push("end_page");
        Ok(PathBuf::from("out.svg"))
    }
}

fn text_op(text: &str) -> DrawOp {
    DrawOp::Text(TextRun {
        text: text.to_string(),
        origin: Point::new(1.0, 2.0),
        font: FontSpec::new("sans-serif", 12.0),
        color: Rgb::BLACK,
        rotation_rad: 0.0,
    })
}

#[test]
fn execute_plan_calls_in_expected_order() {
    let plan = PagePlan {
        width: 10.0,
        height: 20.0,
        ops: vec![
            DrawOp::Rect {
                rect: Rect::new(0.0, 0.0, 10.0, 20.0),
                stroke: None,
                fill: Rgb::WHITE,
            },
            text_op("title"),
            DrawOp::Rect {
                rect: Rect::new(1.0, 1.0, 2.0, 2.0),
                stroke: Some(Stroke {
                    color: Rgb::BLACK,
                    width: 1.0,
                }),
                fill: Rgb::gray(0.5),
            },
        ],
    };

    let mut backend = MockBackend::default();
    let out = execute_plan(&mut backend, &plan, Path::new("out.svg")).unwrap();
    assert_eq!(out, PathBuf::from("out.svg"));
    assert_eq!(
        backend.calls,
        vec![
            "begin_document",
            "draw_rect",
            "draw_text",
            "draw_rect",
            "end_page"
        ]
    );
}

#[test]
fn execute_plan_rejects_empty_page() {
    let plan = PagePlan {
        width: 0.0,
        height: 20.0,
        ops: vec![],
    };
    let mut backend = MockBackend::default();
    let err = execute_plan(&mut backend, &plan, Path::new("out.svg")).unwrap_err();
    assert!(matches!(err, LifecalError::Render(_)));
    assert!(backend.calls.is_empty());
}

#[test]
fn font_spec_builders() {
    let f = FontSpec::new("Brocha", 40.0).bold();
    assert_eq!(f.weight, FontWeight::Bold);
    assert_eq!(f.slant, FontSlant::Normal);
    let f = FontSpec::new("Brocha", 14.0).italic();
    assert_eq!(f.slant, FontSlant::Italic);
}
