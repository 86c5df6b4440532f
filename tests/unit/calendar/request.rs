use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn defaults_are_applied() {
    let req = CalendarRequest::builder(ymd(1990, 3, 15))
        .build(&LayoutConfig::default())
        .unwrap();
    assert_eq!(req.title(), DEFAULT_TITLE);
    assert_eq!(req.age_rows(), 90);
    assert_eq!(req.darken_until(), None);
    assert_eq!(req.sidebar_text(), None);
    assert_eq!(req.subtitle_text(), None);
}

#[test]
fn row_bounds_are_inclusive() {
    let cfg = LayoutConfig::default();
    for rows in [cfg.min_rows, cfg.max_rows] {
        CalendarRequest::builder(ymd(1990, 3, 15))
            .age_rows(rows)
            .build(&cfg)
            .unwrap();
    }
    for rows in [cfg.min_rows - 1, cfg.max_rows + 1] {
        let err = CalendarRequest::builder(ymd(1990, 3, 15))
            .age_rows(rows)
            .build(&cfg)
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("between 80 and 100"), "{err}");
    }
}

#[test]
fn title_length_is_counted_in_characters() {
    let cfg = LayoutConfig::default();
    let ok = "é".repeat(cfg.max_title_len);
    CalendarRequest::builder(ymd(1990, 3, 15))
        .title(ok)
        .build(&cfg)
        .unwrap();

    let too_long = "x".repeat(cfg.max_title_len + 1);
    let err = CalendarRequest::builder(ymd(1990, 3, 15))
        .title(too_long)
        .build(&cfg)
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn darken_until_is_normalized_to_monday() {
    // Saturday 19 October 2024 -> Monday 14 October 2024.
    let req = CalendarRequest::builder(ymd(1990, 3, 15))
        .darken_until(Some(ymd(2024, 10, 19)))
        .build(&LayoutConfig::default())
        .unwrap();
    assert_eq!(req.darken_until(), Some(ymd(2024, 10, 14)));
}

#[test]
fn blank_optional_texts_are_dropped() {
    let req = CalendarRequest::builder(ymd(1990, 3, 15))
        .sidebar_text(Some("   ".to_string()))
        .subtitle_text(Some("Memento mori".to_string()))
        .build(&LayoutConfig::default())
        .unwrap();
    assert_eq!(req.sidebar_text(), None);
    assert_eq!(req.subtitle_text(), Some("Memento mori"));
}

#[test]
fn with_birthdate_keeps_everything_else() {
    let req = CalendarRequest::builder(ymd(1990, 3, 15))
        .title("MINE")
        .age_rows(85)
        .build(&LayoutConfig::default())
        .unwrap();
    let moved = req.with_birthdate(ymd(2020, 1, 2));
    assert_eq!(moved.birthdate(), ymd(2020, 1, 2));
    assert_eq!(moved.title(), "MINE");
    assert_eq!(moved.age_rows(), 85);
}
