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

mod apply;
mod command;
mod error;
mod forecast;
mod projection;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::{CoreError, GenerationError, NormalizationError, TransportError};
pub use forecast::{
    AggregatedMetrics, ForecastEntry, ForecastMeta, ForecastResponse, ForecastValue,
    ProductMetrics, normalize_forecast, normalize_forecast_slice,
};
pub use projection::{BarDatum, NOT_AVAILABLE_LABEL, ProductTotal, TrendRow};
pub use state::{
    DashboardState, DisplayedForecast, GenerationTicket, GenerationToken, IgnoredReason, Outcome,
    Phase, PreviewStatus, PreviewSummary, PreviewTicket, SelectionToken, TransitionResult,
};
