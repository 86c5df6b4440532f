use super::*;
use crate::{
    foundation::core::{Rect, Rgb},
    render::backend::{FontSpec, Stroke, TextExtents, TextMeasure, TextRun},
};

#[derive(Default)]
struct CountingBackend {
    begun: Option<PathBuf>,
    rects: usize,
    texts: usize,
    pages: usize,
}

impl TextMeasure for CountingBackend {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> LifecalResult<TextExtents> {
        Ok(TextExtents {
            width: text.len() as f64 * font.size * 0.5,
            height: font.size * 0.7,
        })
    }
}

impl PageBackend for CountingBackend {
    fn begin_document(&mut self, path: &Path, _width: f64, _height: f64) -> LifecalResult<()> {
        self.begun = Some(path.to_path_buf());
        Ok(())
    }

    fn draw_rect(&mut self, _rect: Rect, _stroke: Option<Stroke>, _fill: Rgb) -> LifecalResult<()> {
        self.rects += 1;
        Ok(())
    }

    fn draw_text(&mut self, _run: &TextRun) -> LifecalResult<()> {
        self.texts += 1;
        Ok(())
    }

    fn end_page(&mut self) -> LifecalResult<PathBuf> {
        self.pages += 1;
        Ok(self.begun.take().unwrap_or_default())
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn format_from_extension() {
    assert_eq!(OutputFormat::from_path(Path::new("a/b.SVG")), Some(OutputFormat::Svg));
    assert_eq!(OutputFormat::from_path(Path::new("b.png")), Some(OutputFormat::Png));
    assert_eq!(OutputFormat::from_path(Path::new("b.pdf")), None);
    assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    assert_eq!(OutputFormat::Png.extension(), "png");
}

#[test]
fn naming_swaps_extension_and_appends_day() {
    let naming = OutputNaming::new(Path::new("out/cal.pdf"), OutputFormat::Svg);
    assert_eq!(naming.single(), PathBuf::from("out/cal.svg"));
    assert_eq!(
        naming.for_day(ymd(2020, 1, 3)),
        PathBuf::from("out/cal_03-01-2020.svg")
    );

    let bare = OutputNaming::new(Path::new(""), OutputFormat::Png);
    assert_eq!(bare.single(), PathBuf::from("life_calendar.png"));
    assert_eq!(
        bare.for_day(ymd(1999, 12, 31)),
        PathBuf::from("life_calendar_31-12-1999.png")
    );
}

#[test]
fn render_document_replays_the_whole_page() {
    let cfg = LayoutConfig::default();
    let req = CalendarRequest::builder(ymd(1990, 3, 15)).build(&cfg).unwrap();
    let mut backend = CountingBackend::default();

    let out = render_document(
        &mut backend,
        &req,
        &cfg,
        RenderStyle::Modern,
        Path::new("cal.svg"),
    )
    .unwrap();

    assert_eq!(out, PathBuf::from("cal.svg"));
    assert_eq!(backend.pages, 1);
    // Background, two key swatches, 90 rows of 52 cells.
    assert_eq!(backend.rects, 1 + 2 + 90 * 52);
    // Title, two key descriptions, 52 column headers, 90 row labels.
    assert_eq!(backend.texts, 1 + 2 + 52 + 90);
}

#[test]
fn classic_render_skips_the_key() {
    let cfg = LayoutConfig::default();
    let req = CalendarRequest::builder(ymd(1990, 3, 15))
        .age_rows(80)
        .build(&cfg)
        .unwrap();
    let mut backend = CountingBackend::default();

    render_document(
        &mut backend,
        &req,
        &cfg,
        RenderStyle::Classic,
        Path::new("cal.svg"),
    )
    .unwrap();

    assert_eq!(backend.rects, 1 + 80 * 52);
    assert_eq!(backend.texts, 1 + 52 + 80);
}

#[test]
fn boxed_backend_renders_through_trait_object() {
    let cfg = LayoutConfig::default();
    let req = CalendarRequest::builder(ymd(2000, 1, 1)).build(&cfg).unwrap();
    let calendar = build_calendar(&req, &cfg).unwrap();
    let mut backend: Box<dyn PageBackend + Send> = Box::new(CountingBackend::default());

    let out = render_calendar(
        backend.as_mut(),
        &calendar,
        &req,
        &cfg,
        RenderStyle::Modern,
        Path::new("x.svg"),
    )
    .unwrap();
    assert_eq!(out, PathBuf::from("x.svg"));
}

#[test]
fn create_backend_rejects_bad_raster_scale() {
    let settings = BackendSettings { raster_scale: -1.0 };
    assert!(matches!(
        create_backend(OutputFormat::Png, &settings),
        Err(e) if e.is_configuration()
    ));
    assert!(create_backend(OutputFormat::Svg, &settings).is_ok());
}
