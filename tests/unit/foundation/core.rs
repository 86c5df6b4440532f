use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parse_date_accepts_slashes_and_dashes() {
    assert_eq!(parse_date("15/03/1990").unwrap(), ymd(1990, 3, 15));
    assert_eq!(parse_date(" 15-03-1990 ").unwrap(), ymd(1990, 3, 15));
}

#[test]
fn parse_date_rejects_other_formats() {
    for bad in ["1990-03-15", "15.03.1990", "31/02/2001", ""] {
        let err = parse_date(bad).unwrap_err();
        assert!(err.is_configuration(), "{bad}: {err}");
    }
}

#[test]
fn back_up_to_monday_is_identity_on_mondays() {
    let monday = ymd(1990, 3, 12);
    assert_eq!(monday.weekday(), Weekday::Mon);
    assert_eq!(back_up_to_monday(monday), monday);
}

#[test]
fn back_up_to_monday_walks_into_previous_week() {
    // Thursday 15 March 1990.
    assert_eq!(back_up_to_monday(ymd(1990, 3, 15)), ymd(1990, 3, 12));
    // Sunday 1 January 2023 belongs to the week starting Monday 26 December 2022.
    assert_eq!(back_up_to_monday(ymd(2023, 1, 1)), ymd(2022, 12, 26));
}

#[test]
fn date_range_is_inclusive() {
    let r = DateRange::new(ymd(2020, 1, 1), ymd(2020, 1, 3)).unwrap();
    assert_eq!(r.len_days(), 3);
    assert!(r.contains(ymd(2020, 1, 1)));
    assert!(r.contains(ymd(2020, 1, 3)));
    assert!(!r.contains(ymd(2020, 1, 4)));
    let days: Vec<_> = r.days().collect();
    assert_eq!(days, vec![ymd(2020, 1, 1), ymd(2020, 1, 2), ymd(2020, 1, 3)]);
}

#[test]
fn date_range_single_day_and_reversed() {
    let r = DateRange::new(ymd(2020, 2, 29), ymd(2020, 2, 29)).unwrap();
    assert_eq!(r.days().count(), 1);

    let err = DateRange::new(ymd(2020, 1, 2), ymd(2020, 1, 1)).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn rgb_offset_clamps_channels() {
    let darkened = Rgb::gray(0.5).offset(Rgb::gray(-0.4));
    assert!((darkened.r - 0.1).abs() < 1e-9);
    assert_eq!(Rgb::gray(0.2).offset(Rgb::gray(-0.4)), Rgb::BLACK);
    assert_eq!(Rgb::gray(0.9).offset(Rgb::gray(0.4)), Rgb::WHITE);
}

#[test]
fn rgb_css_literal() {
    assert_eq!(Rgb::WHITE.to_css(), "rgb(255,255,255)");
    assert_eq!(Rgb::new(0.5, 0.0, 1.0).to_rgb8(), [128, 0, 255]);
}
