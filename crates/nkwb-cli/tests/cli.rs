//! Integration tests for the CLI library components.

use chrono::NaiveDate;
use tracing::level_filters::LevelFilter;

use nkwb_cli::logging::{REDACTED_VALUE, default_filter_directives, redact_value};
use nkwb_cli::window::parse_timestamp;

#[test]
fn test_parse_date_is_midnight() {
    let parsed = parse_timestamp("2024-03-01").unwrap();
    assert_eq!(
        parsed,
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_parse_datetime_forms() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    for value in [
        "2024-03-01T14:30",
        "2024-03-01T14:30:00",
        "2024-03-01 14:30",
        " 2024-03-01 14:30:00 ",
    ] {
        assert_eq!(parse_timestamp(value).unwrap(), expected, "{value}");
    }
}

#[test]
fn test_parse_rejects_other_forms() {
    for value in ["01/03/2024", "2024-13-01", "yesterday", ""] {
        let err = parse_timestamp(value).unwrap_err();
        assert!(err.contains("YYYY-MM-DD"), "{value}: {err}");
    }
}

#[test]
fn test_names_are_redacted_by_default() {
    assert_eq!(redact_value("DOE, JANE"), REDACTED_VALUE);
}

#[test]
fn test_default_filter_covers_workspace_crates() {
    insta::assert_snapshot!(
        default_filter_directives(LevelFilter::DEBUG),
        @"warn,nkwb_cli=debug,nkwb_ingest=debug,nkwb_model=debug"
    );
}
