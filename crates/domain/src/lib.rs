// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod month;
mod period;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use month::ForecastMonth;
pub use period::{ForecastPeriod, MAX_HORIZON_MONTHS, ValidatedPeriod};
pub use types::InventoryFile;
pub use validation::{
    FileRejection, FileStatus, classify_selection, has_csv_extension, validate_inventory_file,
};
