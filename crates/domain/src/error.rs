// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::month::ForecastMonth;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The selected file is not a CSV file.
    UnsupportedExtension {
        /// The name of the rejected file.
        file_name: String,
    },
    /// A month string could not be parsed.
    InvalidMonth(String),
    /// A date string could not be parsed.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Month arithmetic left the representable calendar range.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The forecast period has no start month.
    MissingStartMonth,
    /// The forecast period has no end month.
    MissingEndMonth,
    /// The start month is not later than the current month.
    StartMonthNotInFuture {
        /// The selected start month.
        start: ForecastMonth,
        /// The current calendar month.
        current: ForecastMonth,
    },
    /// The end month precedes the start month.
    EndMonthBeforeStart {
        /// The selected start month.
        start: ForecastMonth,
        /// The selected end month.
        end: ForecastMonth,
    },
    /// The period spans more months than the forecast horizon allows.
    HorizonTooLong {
        /// The selected start month.
        start: ForecastMonth,
        /// The selected end month.
        end: ForecastMonth,
        /// The maximum number of months, start inclusive.
        max_months: u32,
    },
}

impl DomainError {
    /// Returns whether this error describes an invalid forecast period.
    #[must_use]
    pub const fn is_period_error(&self) -> bool {
        matches!(
            self,
            Self::MissingStartMonth
                | Self::MissingEndMonth
                | Self::StartMonthNotInFuture { .. }
                | Self::EndMonthBeforeStart { .. }
                | Self::HorizonTooLong { .. }
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedExtension { file_name } => {
                write!(
                    f,
                    "Unsupported file '{file_name}': please upload a valid .csv file"
                )
            }
            Self::InvalidMonth(msg) => write!(f, "Invalid month: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
            Self::MissingStartMonth => write!(f, "A start month must be selected"),
            Self::MissingEndMonth => write!(f, "An end month must be selected"),
            Self::StartMonthNotInFuture { start, current } => {
                write!(
                    f,
                    "Start month {start} must be later than the current month {current}"
                )
            }
            Self::EndMonthBeforeStart { start, end } => {
                write!(f, "End month {end} must not be before start month {start}")
            }
            Self::HorizonTooLong {
                start,
                end,
                max_months,
            } => {
                write!(
                    f,
                    "Forecast period {start} to {end} exceeds the maximum of {max_months} months"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
