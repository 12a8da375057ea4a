// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of a dashboard report.

use std::fmt::{self, Write};
use stockcast::{ForecastValue, NOT_AVAILABLE_LABEL};
use stockcast_api::{DashboardReport, ForecastReport, PreviewView};

/// Formats an optional chart value the way cards and bars label it.
fn value_text(value: Option<f64>) -> String {
    value.map_or(ForecastValue::Absent, ForecastValue::Present).label()
}

/// Formats an optional metric to two decimals.
fn metric_text(value: Option<f64>) -> String {
    value.map_or_else(|| String::from(NOT_AVAILABLE_LABEL), |v| format!("{v:.2}"))
}

/// Renders the whole dashboard.
///
/// # Errors
///
/// Returns an error only if writing to the buffer fails.
pub fn render_report(report: &DashboardReport) -> Result<String, fmt::Error> {
    let mut out: String = String::new();

    if let Some(file) = &report.file {
        writeln!(out, "File: {file}")?;
    }
    if let Some(feedback) = &report.file_feedback {
        writeln!(out, "File: {feedback}")?;
    }
    match &report.preview {
        PreviewView::NotLoaded => {}
        PreviewView::Loading => writeln!(out, "Preview: loading")?,
        PreviewView::Loaded { records, warnings } => {
            writeln!(out, "Preview: {records} records loaded")?;
            for warning in warnings {
                writeln!(out, "  warning: {warning}")?;
            }
        }
        PreviewView::Failed { message } => writeln!(out, "Preview unavailable: {message}")?,
    }
    if let Some(feedback) = &report.period_feedback {
        writeln!(out, "Period: {feedback}")?;
    }
    if let Some(banner) = &report.banner {
        writeln!(out, "Error: {banner}")?;
    }
    if let Some(forecast) = &report.forecast {
        writeln!(out)?;
        render_forecast(&mut out, forecast)?;
    }

    Ok(out)
}

fn render_forecast(out: &mut String, report: &ForecastReport) -> fmt::Result {
    writeln!(out, "Forecast: {}", report.period)?;
    if let Some(summary) = &report.summary {
        writeln!(
            out,
            "Method: {} | Analysis date: {} | Products: {}",
            summary.method, summary.analysis_date, summary.product_count
        )?;
    }

    writeln!(out, "\nTrend")?;
    let width: usize = report
        .series
        .iter()
        .map(|s| s.product.len())
        .max()
        .unwrap_or(0)
        .max(8);
    write!(out, "{:<10}", "Month")?;
    for series in &report.series {
        write!(out, " {:>width$}", series.product)?;
    }
    writeln!(out)?;
    for point in &report.trend {
        write!(out, "{:<10}", point.label)?;
        for value in &point.values {
            write!(out, " {:>width$}", value_text(*value))?;
        }
        writeln!(out)?;
    }

    if let Some(latest) = &report.latest_month {
        writeln!(out, "\nLatest month ({latest})")?;
        for bar in &report.bars {
            writeln!(out, "  {:<width$} {:>8}", bar.product, bar.label)?;
        }
    }

    if !report.totals.is_empty() {
        writeln!(out, "\nTotals")?;
        for total in &report.totals {
            writeln!(out, "  {:<width$} {:>8}", total.product, value_text(Some(total.total)))?;
        }
    }

    writeln!(out, "\nMonthly forecast")?;
    for card in &report.cards {
        writeln!(out, "  {}", card.heading)?;
        for cell in &card.cells {
            writeln!(out, "    {}: {}", cell.product, cell.text)?;
        }
    }

    if !report.metrics.is_empty() {
        writeln!(out, "\nAccuracy")?;
        for row in &report.metrics {
            writeln!(
                out,
                "  {:<width$} MAPE {} | sMAPE {} | RMSE {} | Accuracy {}",
                row.product,
                metric_text(row.metrics.mape),
                metric_text(row.metrics.smape),
                metric_text(row.metrics.rmse),
                metric_text(row.metrics.accuracy),
            )?;
        }
    }
    if let Some(aggregated) = &report.aggregated_metrics {
        writeln!(
            out,
            "  {:<width$} MAPE {} | sMAPE {} | RMSE {} | Accuracy {}",
            "Average",
            metric_text(aggregated.mape_mean),
            metric_text(aggregated.smape_mean),
            metric_text(aggregated.rmse_mean),
            metric_text(aggregated.accuracy_mean),
        )?;
    }

    Ok(())
}
