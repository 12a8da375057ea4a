// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

/// Earliest year a month may carry while still formatting as `YYYY`.
const MIN_YEAR: i32 = 1;
/// Latest year a month may carry while still formatting as `YYYY`.
const MAX_YEAR: i32 = 9999;

/// A calendar month: a year and a month, with no day component.
///
/// Months order chronologically and format as `YYYY-MM`, which is also the
/// wire format used for forecast period boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForecastMonth {
    /// The calendar year.
    year: i32,
    /// The month number, 1 through 12.
    month: u8,
}

impl ForecastMonth {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMonth` if the month number is not within
    /// 1..=12 or the year cannot be written as four digits.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DomainError::InvalidMonth(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing the given date.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// Returns the current calendar month in UTC.
    #[must_use]
    pub fn current_utc() -> Self {
        Self::from_date(OffsetDateTime::now_utc().date())
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.month
    }

    /// Returns the month as a `time::Month`.
    #[must_use]
    pub const fn month(&self) -> Month {
        Month::January.nth_next(self.month - 1)
    }

    /// Returns the number of months since year zero, used for arithmetic.
    fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Returns the month `count` months after this one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the result falls
    /// outside the supported year range.
    pub fn add_months(self, count: u32) -> Result<Self, DomainError> {
        let target: i64 = self.ordinal() + i64::from(count);
        let overflow = || DomainError::DateArithmeticOverflow {
            operation: format!("{self} + {count} months"),
        };

        let year: i32 = i32::try_from(target.div_euclid(12)).map_err(|_| overflow())?;
        let month: u8 = u8::try_from(target.rem_euclid(12) + 1).map_err(|_| overflow())?;
        Self::new(year, month).map_err(|_| overflow())
    }

    /// Returns the signed number of months from `self` to `other`.
    ///
    /// The result is positive when `other` is later than `self`.
    #[must_use]
    pub fn months_until(self, other: Self) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// Parses a backend date key into the month it falls in.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS...`, and `YYYY-MM`.
    /// The day of month is validated but otherwise discarded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if the key is not a valid date.
    pub fn from_date_key(key: &str) -> Result<Self, DomainError> {
        let trimmed: &str = key.trim();
        let date_part: &str = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

        if date_part.len() == 7 {
            return date_part
                .parse::<Self>()
                .map_err(|e| DomainError::DateParseError {
                    date_string: key.to_string(),
                    error: e.to_string(),
                });
        }

        let date: Date = Date::parse(date_part, format_description!("[year]-[month]-[day]"))
            .map_err(|e| DomainError::DateParseError {
                date_string: key.to_string(),
                error: e.to_string(),
            })?;
        Ok(Self::from_date(date))
    }

    /// Returns the abbreviated label used on chart axes, e.g. `Jan 2025`.
    #[must_use]
    pub fn short_label(&self) -> String {
        let name: String = self.month().to_string();
        format!("{} {}", name.get(..3).unwrap_or(&name), self.year)
    }

    /// Returns the full label used on monthly cards, e.g. `January 2025`.
    #[must_use]
    pub fn long_label(&self) -> String {
        format!("{} {}", self.month(), self.year)
    }
}

impl FromStr for ForecastMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(format!("expected YYYY-MM, got '{s}'"));

        let (year_str, month_str) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        if !year_str.bytes().chain(month_str.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u8 = month_str.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl std::fmt::Display for ForecastMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for ForecastMonth {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ForecastMonth> for String {
    fn from(month: ForecastMonth) -> Self {
        month.to_string()
    }
}
