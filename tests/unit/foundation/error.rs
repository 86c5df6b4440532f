use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LifecalError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        LifecalError::date_arithmetic("x")
            .to_string()
            .contains("date arithmetic error:")
    );
    assert!(LifecalError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LifecalError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn sweep_aborted_names_the_day_and_cause() {
    let day = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let err = LifecalError::render("disk full").sweep_aborted(day);
    let msg = err.to_string();
    assert!(msg.contains("2020-01-02"));
    assert!(msg.contains("disk full"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn configuration_classification_sees_through_sweep_wrapper() {
    let day = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    assert!(LifecalError::configuration("bad").is_configuration());
    assert!(
        LifecalError::configuration("bad")
            .sweep_aborted(day)
            .is_configuration()
    );
    assert!(!LifecalError::render("io").is_configuration());
}
