// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, ForecastMonth};

fn month(year: i32, number: u8) -> ForecastMonth {
    ForecastMonth::new(year, number).unwrap()
}

#[test]
fn test_month_rejects_out_of_range_numbers() {
    assert!(matches!(
        ForecastMonth::new(2025, 0),
        Err(DomainError::InvalidMonth(_))
    ));
    assert!(matches!(
        ForecastMonth::new(2025, 13),
        Err(DomainError::InvalidMonth(_))
    ));
    assert!(matches!(
        ForecastMonth::new(10_000, 1),
        Err(DomainError::InvalidMonth(_))
    ));
}

#[test]
fn test_month_parses_and_formats_wire_format() {
    let parsed: ForecastMonth = "2025-03".parse().unwrap();
    assert_eq!(parsed, month(2025, 3));
    assert_eq!(parsed.to_string(), "2025-03");
    assert_eq!(month(987, 7).to_string(), "0987-07");
}

#[test]
fn test_month_parse_rejects_other_formats() {
    for input in ["2025-3", "25-03", "03/2025", "2025-13", "2025-00", "2025", "abcd-ef", ""] {
        assert!(
            input.parse::<ForecastMonth>().is_err(),
            "expected '{input}' to be rejected"
        );
    }
}

#[test]
fn test_month_ordering_is_chronological() {
    assert!(month(2024, 12) < month(2025, 1));
    assert!(month(2025, 1) < month(2025, 2));
    assert_eq!(month(2025, 6), month(2025, 6));
}

#[test]
fn test_add_months_rolls_over_year() {
    assert_eq!(month(2024, 11).add_months(1).unwrap(), month(2024, 12));
    assert_eq!(month(2024, 12).add_months(1).unwrap(), month(2025, 1));
    assert_eq!(month(2024, 9).add_months(5).unwrap(), month(2025, 2));
    assert_eq!(month(2024, 1).add_months(24).unwrap(), month(2026, 1));
    assert_eq!(month(2024, 1).add_months(0).unwrap(), month(2024, 1));
}

#[test]
fn test_add_months_reports_overflow() {
    let result: Result<ForecastMonth, DomainError> = month(9999, 12).add_months(1);
    assert!(matches!(
        result,
        Err(DomainError::DateArithmeticOverflow { .. })
    ));
}

#[test]
fn test_months_until_is_signed() {
    assert_eq!(month(2025, 1).months_until(month(2025, 6)), 5);
    assert_eq!(month(2025, 6).months_until(month(2025, 1)), -5);
    assert_eq!(month(2024, 11).months_until(month(2025, 2)), 3);
}

#[test]
fn test_from_date_key_accepts_iso_dates() {
    assert_eq!(
        ForecastMonth::from_date_key("2025-01-01").unwrap(),
        month(2025, 1)
    );
    assert_eq!(
        ForecastMonth::from_date_key("2025-02-28T00:00:00").unwrap(),
        month(2025, 2)
    );
    assert_eq!(
        ForecastMonth::from_date_key("2025-03-15 12:30:00").unwrap(),
        month(2025, 3)
    );
    assert_eq!(ForecastMonth::from_date_key("2025-04").unwrap(), month(2025, 4));
}

#[test]
fn test_from_date_key_rejects_invalid_dates() {
    for key in ["not-a-date", "2025-02-30", "2025-13-01", "", "01/02/2025"] {
        assert!(
            matches!(
                ForecastMonth::from_date_key(key),
                Err(DomainError::DateParseError { .. })
            ),
            "expected '{key}' to be rejected"
        );
    }
}

#[test]
fn test_month_labels() {
    assert_eq!(month(2025, 1).short_label(), "Jan 2025");
    assert_eq!(month(2025, 9).short_label(), "Sep 2025");
    assert_eq!(month(2025, 1).long_label(), "January 2025");
    assert_eq!(month(2025, 12).long_label(), "December 2025");
}

#[test]
fn test_from_date_uses_calendar_month() {
    let date: time::Date = time::Date::from_calendar_date(2026, time::Month::October, 19).unwrap();
    let current: ForecastMonth = ForecastMonth::from_date(date);

    assert_eq!(current, month(2026, 10));
    assert_eq!(current.month(), time::Month::October);
    assert_eq!(current.number(), 10);
    assert_eq!(current.year(), 2026);
}

#[test]
fn test_month_serde_uses_wire_format() {
    let json: String = serde_json::to_string(&month(2025, 2)).unwrap();
    assert_eq!(json, "\"2025-02\"");

    let parsed: ForecastMonth = serde_json::from_str("\"2025-11\"").unwrap();
    assert_eq!(parsed, month(2025, 11));

    assert!(serde_json::from_str::<ForecastMonth>("\"2025-11-01\"").is_err());
}
