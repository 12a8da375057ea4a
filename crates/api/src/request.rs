// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Forecast request assembly.

use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use stockcast_domain::{
    ForecastMonth, ForecastPeriod, InventoryFile, ValidatedPeriod, validate_inventory_file,
};

use crate::error::ApiError;

/// Multipart field carrying the raw inventory file.
pub const TRAIN_FILE_FIELD: &str = "train_file";
/// Multipart field carrying the first forecast month.
pub const START_MONTH_FIELD: &str = "start_month";
/// Multipart field carrying the last forecast month.
pub const END_MONTH_FIELD: &str = "end_month";

/// A validated forecast submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    file_name: String,
    bytes: Arc<[u8]>,
    start_month: ForecastMonth,
    end_month: ForecastMonth,
}

impl ForecastRequest {
    /// Creates a request from an accepted file and a validated period.
    #[must_use]
    pub fn new(file: &InventoryFile, period: ValidatedPeriod) -> Self {
        Self {
            file_name: file.name().to_string(),
            bytes: file.shared_bytes(),
            start_month: period.start(),
            end_month: period.end(),
        }
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the raw file bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the first forecast month.
    #[must_use]
    pub const fn start_month(&self) -> ForecastMonth {
        self.start_month
    }

    /// Returns the last forecast month.
    #[must_use]
    pub const fn end_month(&self) -> ForecastMonth {
        self.end_month
    }

    /// Builds the multipart body.
    ///
    /// No content type is set here; the transport picks the boundary.
    #[must_use]
    pub fn into_multipart(self) -> Form {
        let file_part: Part = Part::bytes(self.bytes.to_vec()).file_name(self.file_name);

        Form::new()
            .part(TRAIN_FILE_FIELD, file_part)
            .text(START_MONTH_FIELD, self.start_month.to_string())
            .text(END_MONTH_FIELD, self.end_month.to_string())
    }
}

/// Builds a forecast request after checking every precondition.
///
/// # Arguments
///
/// * `file` - The selected inventory file, if any
/// * `period` - The selected forecast period, possibly incomplete
/// * `current` - The current calendar month
///
/// # Returns
///
/// * `Ok(ForecastRequest)` ready to send
/// * `Err(ApiError)` if the caller must not submit
///
/// # Errors
///
/// Returns an error if:
/// - No file is selected
/// - The file name does not end in `.csv`
/// - Either month is missing or the period violates its invariants
pub fn build_forecast_request(
    file: Option<&InventoryFile>,
    period: &ForecastPeriod,
    current: ForecastMonth,
) -> Result<ForecastRequest, ApiError> {
    let file: &InventoryFile = file.ok_or(ApiError::NoFileSelected)?;
    validate_inventory_file(file).map_err(ApiError::FileRejected)?;
    let validated: ValidatedPeriod = period.validate(current).map_err(ApiError::PeriodInvalid)?;

    Ok(ForecastRequest::new(file, validated))
}
