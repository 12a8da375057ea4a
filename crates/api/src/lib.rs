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
#![allow(clippy::multiple_crate_versions)]

mod client;
mod controller;
mod csv_preview;
mod error;
mod present;
mod request;

#[cfg(test)]
mod tests;

pub use client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ForecastBackend, HttpForecastBackend,
};
pub use controller::{DashboardController, read_inventory_file};
pub use csv_preview::{CsvPreview, EXPECTED_COLUMNS, preview_inventory_csv};
pub use error::{ApiError, ClientBuildError, translate_core_error};
pub use present::{
    BarView, CardCell, ChartTheme, DashboardReport, ForecastReport, MetricsView, MonthlyCard,
    PreviewView, SERIES_COLORS, SeriesView, SummaryPanel, ThemeMode, TotalView, TrendPoint,
    monthly_cards, series_color,
};
pub use request::{
    END_MONTH_FIELD, ForecastRequest, START_MONTH_FIELD, TRAIN_FILE_FIELD, build_forecast_request,
};
