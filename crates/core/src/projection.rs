// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chart-ready projections derived on demand from a `ForecastResponse`.

use crate::forecast::{ForecastEntry, ForecastResponse, ForecastValue};
use std::num::FpCategory;
use stockcast_domain::ForecastMonth;

/// Label shown in place of a value when no forecast is available.
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

impl ForecastValue {
    /// Returns the display text: the value rounded to a whole number, or
    /// `N/A` when absent.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Present(v) => {
                let rounded: f64 = v.round();
                if rounded.classify() == FpCategory::Zero {
                    String::from("0")
                } else {
                    format!("{rounded:.0}")
                }
            }
            Self::Absent => String::from(NOT_AVAILABLE_LABEL),
        }
    }
}

/// One point on the trend chart: a month and a value per product.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    /// The forecasted month.
    pub month: ForecastMonth,
    /// Values in canonical product order.
    pub values: Vec<(String, ForecastValue)>,
}

impl TrendRow {
    /// Returns the value for a product, if the product is part of the row.
    #[must_use]
    pub fn value(&self, product: &str) -> Option<ForecastValue> {
        self.values
            .iter()
            .find(|(name, _)| name == product)
            .map(|(_, value)| *value)
    }
}

/// One bar on the latest-month chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    /// The product name.
    pub product: String,
    /// The underlying forecast, kept so labels can tell `N/A` from `0`.
    pub value: ForecastValue,
}

impl BarDatum {
    /// Returns the bar height. Absent values are drawn at zero.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.value.or_zero()
    }

    /// Returns the bar label.
    #[must_use]
    pub fn label(&self) -> String {
        self.value.label()
    }
}

/// The sum of a product's forecasts across every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTotal {
    /// The product name.
    pub product: String,
    /// The total, counting absent values as zero.
    pub total: f64,
}

impl ForecastResponse {
    /// Returns the first forecasted month.
    ///
    /// A normalized response always has at least one entry.
    #[must_use]
    pub fn first_month(&self) -> Option<ForecastMonth> {
        self.entries().first().map(|e| e.month)
    }

    /// Returns the last forecasted month.
    #[must_use]
    pub fn latest_month(&self) -> Option<ForecastMonth> {
        self.latest_entry().map(|e| e.month)
    }

    fn latest_entry(&self) -> Option<&ForecastEntry> {
        self.entries().last()
    }

    /// Returns one trend row per entry, in delivery order.
    #[must_use]
    pub fn trend_rows(&self) -> Vec<TrendRow> {
        self.entries()
            .iter()
            .map(|entry| TrendRow {
                month: entry.month,
                values: self
                    .products()
                    .iter()
                    .map(|product| (product.clone(), entry.value(product)))
                    .collect(),
            })
            .collect()
    }

    /// Returns one bar per product for the last forecasted month.
    #[must_use]
    pub fn latest_month_bars(&self) -> Vec<BarDatum> {
        let Some(latest) = self.latest_entry() else {
            return Vec::new();
        };

        self.products()
            .iter()
            .map(|product| BarDatum {
                product: product.clone(),
                value: latest.value(product),
            })
            .collect()
    }

    /// Returns every product's total across all entries, in product order.
    #[must_use]
    pub fn totals_by_product(&self) -> Vec<ProductTotal> {
        self.products()
            .iter()
            .map(|product| ProductTotal {
                product: product.clone(),
                total: self
                    .entries()
                    .iter()
                    .map(|entry| entry.value(product).or_zero())
                    .sum(),
            })
            .collect()
    }

    /// Returns product totals for aggregate views, eliding products whose
    /// total is exactly zero.
    #[must_use]
    pub fn nonzero_totals(&self) -> Vec<ProductTotal> {
        self.totals_by_product()
            .into_iter()
            .filter(|t| t.total.classify() != FpCategory::Zero)
            .collect()
    }
}
