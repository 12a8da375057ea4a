// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::month::ForecastMonth;

/// Maximum forecast horizon in months, start month inclusive.
pub const MAX_HORIZON_MONTHS: u32 = 6;

/// A possibly incomplete forecast period as selected by the user.
///
/// Selecting or clearing the start month always clears the end month, since a
/// previously chosen end may no longer fall within the allowed horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForecastPeriod {
    start: Option<ForecastMonth>,
    end: Option<ForecastMonth>,
}

impl ForecastPeriod {
    /// Creates an empty period.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Returns the selected start month.
    #[must_use]
    pub const fn start(&self) -> Option<ForecastMonth> {
        self.start
    }

    /// Returns the selected end month.
    #[must_use]
    pub const fn end(&self) -> Option<ForecastMonth> {
        self.end
    }

    /// Returns whether neither bound has been selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Sets or clears the start month. The end month is cleared either way.
    pub const fn set_start(&mut self, start: Option<ForecastMonth>) {
        self.start = start;
        self.end = None;
    }

    /// Sets or clears the end month.
    pub const fn set_end(&mut self, end: Option<ForecastMonth>) {
        self.end = end;
    }

    /// Returns the earliest month that may be chosen as a start month.
    ///
    /// # Errors
    ///
    /// Returns an error if the month after `current` is not representable.
    pub fn earliest_start(current: ForecastMonth) -> Result<ForecastMonth, DomainError> {
        current.add_months(1)
    }

    /// Returns the inclusive range of selectable end months for the current
    /// start month, or `None` if no start month is selected.
    #[must_use]
    pub fn end_bounds(&self) -> Option<(ForecastMonth, ForecastMonth)> {
        let start: ForecastMonth = self.start?;
        let latest: ForecastMonth = start.add_months(MAX_HORIZON_MONTHS - 1).ok()?;
        Some((start, latest))
    }

    /// Validates the period against the current calendar month.
    ///
    /// # Arguments
    ///
    /// * `current` - The current calendar month
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either bound is missing
    /// - The start month is not strictly later than `current`
    /// - The end month precedes the start month
    /// - The period spans more than `MAX_HORIZON_MONTHS` months
    pub fn validate(&self, current: ForecastMonth) -> Result<ValidatedPeriod, DomainError> {
        let start: ForecastMonth = self.start.ok_or(DomainError::MissingStartMonth)?;

        // Rule: forecasts only cover the future
        if start <= current {
            return Err(DomainError::StartMonthNotInFuture { start, current });
        }

        let end: ForecastMonth = self.end.ok_or(DomainError::MissingEndMonth)?;

        if end < start {
            return Err(DomainError::EndMonthBeforeStart { start, end });
        }

        // Rule: at most MAX_HORIZON_MONTHS months, start inclusive
        if start.months_until(end) >= i64::from(MAX_HORIZON_MONTHS) {
            return Err(DomainError::HorizonTooLong {
                start,
                end,
                max_months: MAX_HORIZON_MONTHS,
            });
        }

        Ok(ValidatedPeriod { start, end })
    }
}

/// A forecast period that satisfied every period rule when it was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPeriod {
    start: ForecastMonth,
    end: ForecastMonth,
}

impl ValidatedPeriod {
    /// Returns the start month.
    #[must_use]
    pub const fn start(&self) -> ForecastMonth {
        self.start
    }

    /// Returns the end month.
    #[must_use]
    pub const fn end(&self) -> ForecastMonth {
        self.end
    }

    /// Returns the number of months covered, start and end inclusive.
    #[must_use]
    pub fn month_count(&self) -> u32 {
        u32::try_from(self.start.months_until(self.end) + 1).unwrap_or(0)
    }

    /// Returns every month in the period in chronological order.
    #[must_use]
    pub fn months(&self) -> Vec<ForecastMonth> {
        (0..self.month_count())
            .filter_map(|offset| self.start.add_months(offset).ok())
            .collect()
    }

    /// Returns the display label, e.g. `Jan 2025 - Mar 2025`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.short_label(), self.end.short_label())
    }
}
