// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Presentation view models.
//!
//! Rendering collaborators consume these plain structures. Theme is always
//! passed in explicitly; nothing here reads ambient UI state.

use serde::Serialize;
use stockcast::{
    AggregatedMetrics, DashboardState, DisplayedForecast, ForecastResponse, PreviewStatus,
    ProductMetrics,
};
use stockcast_domain::ForecastMonth;

/// Light or dark rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

/// Chart colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartTheme {
    /// Grid line colour.
    pub grid: &'static str,
    /// Axis and label text colour.
    pub text: &'static str,
    /// Chart background colour.
    pub background: &'static str,
}

impl ChartTheme {
    /// Returns the chart colours for a theme.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                grid: "#374151",
                text: "#D1D5DB",
                background: "#1F2937",
            },
            ThemeMode::Light => Self {
                grid: "#E5E7EB",
                text: "#374151",
                background: "#FFFFFF",
            },
        }
    }
}

/// Series colours, cycled by series index.
pub const SERIES_COLORS: [&str; 5] = ["#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6"];

/// Returns the colour of the series at `index`.
#[must_use]
pub const fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Summary shown above the charts when the service supplied metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPanel {
    /// The forecasting method, upper-cased.
    pub method: String,
    /// The date the forecast was generated, `YYYY-MM-DD`.
    pub analysis_date: String,
    /// The number of products in the uploaded history.
    pub product_count: usize,
    /// The submitted period, e.g. `Jan 2025 - Mar 2025`.
    pub period: String,
}

impl SummaryPanel {
    /// Builds the panel, or `None` if the response carried no metadata.
    #[must_use]
    pub fn from_forecast(displayed: &DisplayedForecast) -> Option<Self> {
        let meta = displayed.response.meta()?;
        Some(Self {
            method: meta.method.to_uppercase(),
            analysis_date: meta.generated_on.date().to_string(),
            product_count: meta.last_dates_per_product.len(),
            period: displayed.period.label(),
        })
    }
}

/// One product cell on a monthly card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardCell {
    /// The product name.
    pub product: String,
    /// The rounded value, or `N/A`.
    pub text: String,
}

/// One card per forecasted month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCard {
    /// The month heading, e.g. `January 2025`.
    pub heading: String,
    /// One cell per product.
    pub cells: Vec<CardCell>,
}

/// Builds one card per entry, in delivery order.
#[must_use]
pub fn monthly_cards(response: &ForecastResponse) -> Vec<MonthlyCard> {
    response
        .entries()
        .iter()
        .map(|entry| MonthlyCard {
            heading: entry.month.long_label(),
            cells: response
                .products()
                .iter()
                .map(|product| CardCell {
                    product: product.clone(),
                    text: entry.value(product).label(),
                })
                .collect(),
        })
        .collect()
}

/// A chart series and its colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesView {
    /// The product name.
    pub product: String,
    /// The series colour.
    pub color: &'static str,
}

/// One x-axis point on the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// The axis label, e.g. `Jan 2025`.
    pub label: String,
    /// Values in series order; `None` where no forecast is available.
    pub values: Vec<Option<f64>>,
}

/// One bar on the latest-month chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    /// The product name.
    pub product: String,
    /// The bar height.
    pub height: f64,
    /// The bar label, distinguishing `N/A` from `0`.
    pub label: String,
    /// The bar colour.
    pub color: &'static str,
}

/// A product total for aggregate views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalView {
    /// The product name.
    pub product: String,
    /// The total across all months.
    pub total: f64,
}

/// Backtest accuracy for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsView {
    /// The product name.
    pub product: String,
    /// The reported figures.
    #[serde(flatten)]
    pub metrics: ProductMetrics,
}

/// Everything needed to render a generated forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// The submitted period label.
    pub period: String,
    /// Chart colours.
    pub theme: ChartTheme,
    /// The summary panel, if metadata was supplied.
    pub summary: Option<SummaryPanel>,
    /// One series per product.
    pub series: Vec<SeriesView>,
    /// The trend chart points.
    pub trend: Vec<TrendPoint>,
    /// The latest-month label, e.g. `Mar 2025`.
    pub latest_month: Option<String>,
    /// The latest-month bars.
    pub bars: Vec<BarView>,
    /// Non-zero product totals.
    pub totals: Vec<TotalView>,
    /// The monthly cards.
    pub cards: Vec<MonthlyCard>,
    /// Per-product accuracy, if supplied.
    pub metrics: Vec<MetricsView>,
    /// Aggregated accuracy, if supplied.
    pub aggregated_metrics: Option<AggregatedMetrics>,
}

impl ForecastReport {
    /// Builds the report for a displayed forecast.
    #[must_use]
    pub fn new(displayed: &DisplayedForecast, theme: ThemeMode) -> Self {
        let response: &ForecastResponse = &displayed.response;

        Self {
            period: displayed.period.label(),
            theme: ChartTheme::for_mode(theme),
            summary: SummaryPanel::from_forecast(displayed),
            series: response
                .products()
                .iter()
                .enumerate()
                .map(|(index, product)| SeriesView {
                    product: product.clone(),
                    color: series_color(index),
                })
                .collect(),
            trend: response
                .trend_rows()
                .into_iter()
                .map(|row| TrendPoint {
                    label: row.month.short_label(),
                    values: row.values.iter().map(|(_, value)| value.as_f64()).collect(),
                })
                .collect(),
            latest_month: response.latest_month().map(|month| month.short_label()),
            bars: response
                .latest_month_bars()
                .into_iter()
                .enumerate()
                .map(|(index, bar)| BarView {
                    height: bar.height(),
                    label: bar.label(),
                    product: bar.product,
                    color: series_color(index),
                })
                .collect(),
            totals: response
                .nonzero_totals()
                .into_iter()
                .map(|t| TotalView {
                    product: t.product,
                    total: t.total,
                })
                .collect(),
            cards: monthly_cards(response),
            metrics: response
                .metrics()
                .iter()
                .map(|(product, metrics)| MetricsView {
                    product: product.clone(),
                    metrics: *metrics,
                })
                .collect(),
            aggregated_metrics: response.aggregated_metrics().copied(),
        }
    }
}

/// Preview details for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewView {
    /// No accepted file.
    NotLoaded,
    /// Still parsing.
    Loading,
    /// Parsed successfully.
    Loaded {
        /// Number of data records.
        records: usize,
        /// Advisory warnings.
        warnings: Vec<String>,
    },
    /// Could not be parsed.
    Failed {
        /// The parse failure.
        message: String,
    },
}

impl From<PreviewStatus<'_>> for PreviewView {
    fn from(status: PreviewStatus<'_>) -> Self {
        match status {
            PreviewStatus::NotLoaded => Self::NotLoaded,
            PreviewStatus::Loading => Self::Loading,
            PreviewStatus::Loaded(summary) => Self::Loaded {
                records: summary.records,
                warnings: summary.warnings.clone(),
            },
            PreviewStatus::Failed(message) => Self::Failed {
                message: message.to_string(),
            },
        }
    }
}

/// The whole dashboard as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// The current phase name.
    pub phase: &'static str,
    /// The selected file name.
    pub file: Option<String>,
    /// Inline feedback for the file picker.
    pub file_feedback: Option<String>,
    /// Inline feedback for the period pickers.
    pub period_feedback: Option<String>,
    /// The preview status.
    pub preview: PreviewView,
    /// The dismissible failure banner.
    pub banner: Option<String>,
    /// The last successfully generated forecast.
    pub forecast: Option<ForecastReport>,
}

impl DashboardReport {
    /// Builds the report from a state snapshot.
    ///
    /// # Arguments
    ///
    /// * `state` - The dashboard state
    /// * `current` - The month period validation treats as "now"
    /// * `theme` - The theme to render charts with
    #[must_use]
    pub fn from_state(state: &DashboardState, current: ForecastMonth, theme: ThemeMode) -> Self {
        Self {
            phase: state.phase().name(),
            file: state.file().map(|f| f.name().to_string()),
            file_feedback: state.file_feedback(),
            period_feedback: state.period_feedback(current),
            preview: PreviewView::from(state.preview_status()),
            banner: state.banner(),
            forecast: state.forecast().map(|f| ForecastReport::new(f, theme)),
        }
    }
}
