// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Forecast response normalization.
//!
//! The forecasting service returns an ordered array of single-key objects,
//! each mapping an ISO date to per-product values. This module validates that
//! shape once and produces a strongly typed `ForecastResponse`, so that chart
//! projections never have to re-derive shape assumptions.

use crate::error::NormalizationError;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use stockcast_domain::ForecastMonth;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, warn};

/// A single forecast cell.
///
/// `Absent` means the service had no usable forecast for the cell. It is kept
/// distinct from a zero forecast and from a parse failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForecastValue {
    /// A finite forecast value, stored unrounded.
    Present(f64),
    /// No forecast is available.
    Absent,
}

impl ForecastValue {
    /// Coerces a JSON value into a forecast cell.
    ///
    /// Numbers and numeric strings that are finite become `Present`.
    /// Everything else, including `null`, becomes `Absent`.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let number: Option<f64> = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(v) if v.is_finite() => Self::Present(v),
            _ => Self::Absent,
        }
    }

    /// Returns the value, or `None` if absent.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(*v),
            Self::Absent => None,
        }
    }

    /// Returns whether no forecast is available.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the value, treating absent cells as zero.
    #[must_use]
    pub const fn or_zero(&self) -> f64 {
        match self {
            Self::Present(v) => *v,
            Self::Absent => 0.0,
        }
    }
}

/// One forecasted calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// The forecasted month.
    pub month: ForecastMonth,
    /// Forecast values keyed by product name.
    pub values: BTreeMap<String, ForecastValue>,
}

impl ForecastEntry {
    /// Returns the value for a product, or `Absent` if the product is unknown.
    #[must_use]
    pub fn value(&self, product: &str) -> ForecastValue {
        self.values
            .get(product)
            .copied()
            .unwrap_or(ForecastValue::Absent)
    }
}

/// Informational metadata attached to a forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastMeta {
    /// The forecasting method reported by the service.
    pub method: String,
    /// When the forecast was generated.
    pub generated_on: OffsetDateTime,
    /// The last observed date for each product in the uploaded history.
    pub last_dates_per_product: BTreeMap<String, Date>,
}

/// Backtest accuracy figures for a single product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    /// Mean absolute percentage error.
    #[serde(default)]
    pub mape: Option<f64>,
    /// Symmetric mean absolute percentage error (`sMAPE`).
    #[serde(default)]
    pub smape: Option<f64>,
    /// Root mean squared error.
    #[serde(default)]
    pub rmse: Option<f64>,
    /// Accuracy, as 100 minus MAPE.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Backtest accuracy figures averaged across products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    /// Mean of per-product MAPE.
    #[serde(default)]
    pub mape_mean: Option<f64>,
    /// Mean of per-product `sMAPE`.
    #[serde(default)]
    pub smape_mean: Option<f64>,
    /// Mean of per-product RMSE.
    #[serde(default)]
    pub rmse_mean: Option<f64>,
    /// Mean of per-product accuracy.
    #[serde(default)]
    pub accuracy_mean: Option<f64>,
}

impl AggregatedMetrics {
    /// Returns whether no aggregate is available.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mape_mean.is_none()
            && self.smape_mean.is_none()
            && self.rmse_mean.is_none()
            && self.accuracy_mean.is_none()
    }
}

/// A validated forecast response.
///
/// Every entry exposes exactly the products listed in `products`, and entries
/// keep the order in which the service delivered them.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResponse {
    products: Vec<String>,
    entries: Vec<ForecastEntry>,
    meta: Option<ForecastMeta>,
    metrics: BTreeMap<String, ProductMetrics>,
    aggregated_metrics: Option<AggregatedMetrics>,
}

impl ForecastResponse {
    /// Returns the canonical product names, in the order of the first entry.
    #[must_use]
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Returns the forecasted entries in delivery order.
    #[must_use]
    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    /// Returns the metadata, if the service supplied a complete set.
    #[must_use]
    pub const fn meta(&self) -> Option<&ForecastMeta> {
        self.meta.as_ref()
    }

    /// Returns per-product accuracy metrics, if any were supplied.
    #[must_use]
    pub const fn metrics(&self) -> &BTreeMap<String, ProductMetrics> {
        &self.metrics
    }

    /// Returns the aggregated accuracy metrics, if any were supplied.
    #[must_use]
    pub const fn aggregated_metrics(&self) -> Option<&AggregatedMetrics> {
        self.aggregated_metrics.as_ref()
    }
}

/// Normalizes a raw response body.
///
/// # Errors
///
/// Returns `NormalizationError::MalformedJson` if the body is not JSON, or any
/// error `normalize_forecast` reports.
pub fn normalize_forecast_slice(body: &[u8]) -> Result<ForecastResponse, NormalizationError> {
    let raw: Value = serde_json::from_slice(body)
        .map_err(|e| NormalizationError::MalformedJson(e.to_string()))?;
    normalize_forecast(&raw)
}

/// Validates and normalizes a parsed forecast response.
///
/// # Arguments
///
/// * `raw` - The JSON document returned by the forecasting service
///
/// # Returns
///
/// * `Ok(ForecastResponse)` if every entry is well formed and consistent
/// * `Err(NormalizationError)` describing the first structural fault
///
/// # Errors
///
/// Returns an error if:
/// - `forecasted_products` is missing, not an array, or empty
/// - An entry is not a single-key object whose value is an object
/// - An entry's product keys differ from those of the first entry
/// - An entry's date key cannot be parsed
///
/// Missing or incomplete `meta` and unusable metrics are not errors; they are
/// dropped with a warning since they are informational only.
pub fn normalize_forecast(raw: &Value) -> Result<ForecastResponse, NormalizationError> {
    let root: &Map<String, Value> = raw.as_object().ok_or_else(|| {
        NormalizationError::MalformedStructure(String::from("response is not a JSON object"))
    })?;

    let raw_entries: &Vec<Value> = root
        .get("forecasted_products")
        .ok_or_else(|| {
            NormalizationError::MalformedStructure(String::from(
                "missing 'forecasted_products'",
            ))
        })?
        .as_array()
        .ok_or_else(|| {
            NormalizationError::MalformedStructure(String::from(
                "'forecasted_products' is not an array",
            ))
        })?;

    if raw_entries.is_empty() {
        return Err(NormalizationError::Empty);
    }

    let mut products: Vec<String> = Vec::new();
    let mut canonical: BTreeSet<&str> = BTreeSet::new();
    let mut entries: Vec<ForecastEntry> = Vec::with_capacity(raw_entries.len());

    for (index, raw_entry) in raw_entries.iter().enumerate() {
        let (date_key, raw_values) = split_entry(index, raw_entry)?;

        // Rule: every entry carries exactly the first entry's products
        let keys: BTreeSet<&str> = raw_values.keys().map(String::as_str).collect();
        if index == 0 {
            products = raw_values.keys().cloned().collect();
            canonical = keys;
        } else if keys != canonical {
            return Err(NormalizationError::InconsistentProducts {
                index,
                missing: canonical.difference(&keys).map(|p| (*p).to_string()).collect(),
                unexpected: keys.difference(&canonical).map(|p| (*p).to_string()).collect(),
            });
        }

        let month: ForecastMonth =
            ForecastMonth::from_date_key(date_key).map_err(|_| NormalizationError::BadDate {
                index,
                key: date_key.to_string(),
            })?;

        let values: BTreeMap<String, ForecastValue> = raw_values
            .iter()
            .map(|(product, value)| (product.clone(), ForecastValue::from_json(value)))
            .collect();

        entries.push(ForecastEntry { month, values });
    }

    let meta: Option<ForecastMeta> = match root.get("meta") {
        None | Some(Value::Null) => {
            debug!("Forecast response has no meta section");
            None
        }
        Some(value) => match parse_meta(value) {
            Ok(meta) => Some(meta),
            Err(reason) => {
                warn!(%reason, "Ignoring incomplete forecast meta section");
                None
            }
        },
    };

    let metrics: BTreeMap<String, ProductMetrics> =
        parse_optional_section(root, "metrics").unwrap_or_default();
    let aggregated_metrics: Option<AggregatedMetrics> =
        parse_optional_section::<AggregatedMetrics>(root, "aggregated_metrics")
            .filter(|m| !m.is_empty());

    debug!(
        entries = entries.len(),
        products = products.len(),
        has_meta = meta.is_some(),
        "Normalized forecast response"
    );

    Ok(ForecastResponse {
        products,
        entries,
        meta,
        metrics,
        aggregated_metrics,
    })
}

/// Splits a raw entry into its date key and product value object.
fn split_entry(
    index: usize,
    raw_entry: &Value,
) -> Result<(&str, &Map<String, Value>), NormalizationError> {
    let malformed = |reason: &str| NormalizationError::MalformedEntry {
        index,
        reason: reason.to_string(),
    };

    let object: &Map<String, Value> = raw_entry
        .as_object()
        .ok_or_else(|| malformed("entry is not an object"))?;

    let mut fields = object.iter();
    let (date_key, values) = match (fields.next(), fields.next()) {
        (Some(field), None) => field,
        _ => return Err(malformed("entry must have exactly one date key")),
    };

    let values: &Map<String, Value> = values
        .as_object()
        .ok_or_else(|| malformed("entry value is not an object of products"))?;

    Ok((date_key.as_str(), values))
}

/// Parses the meta section, returning a reason on failure.
fn parse_meta(value: &Value) -> Result<ForecastMeta, String> {
    let object: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| String::from("meta is not an object"))?;

    let method: String = object
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| String::from("meta.method is missing"))?
        .to_string();

    let generated_on_str: &str = object
        .get("generated_on")
        .and_then(Value::as_str)
        .ok_or_else(|| String::from("meta.generated_on is missing"))?;
    let generated_on: OffsetDateTime = parse_timestamp(generated_on_str)
        .ok_or_else(|| format!("meta.generated_on '{generated_on_str}' is not a timestamp"))?;

    let last_dates: &Map<String, Value> = object
        .get("last_dates_per_product")
        .and_then(Value::as_object)
        .ok_or_else(|| String::from("meta.last_dates_per_product is missing"))?;

    let mut last_dates_per_product: BTreeMap<String, Date> = BTreeMap::new();
    for (product, date_value) in last_dates {
        let date: Date = date_value
            .as_str()
            .and_then(parse_date)
            .ok_or_else(|| format!("meta.last_dates_per_product['{product}'] is not a date"))?;
        last_dates_per_product.insert(product.clone(), date);
    }

    Ok(ForecastMeta {
        method,
        generated_on,
        last_dates_per_product,
    })
}

/// Parses an RFC 3339 timestamp, a naive ISO-8601 timestamp (assumed UTC), or
/// a bare date (midnight UTC).
fn parse_timestamp(s: &str) -> Option<OffsetDateTime> {
    let s: &str = s.trim();
    OffsetDateTime::parse(s, &Rfc3339)
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(s, &Iso8601::DEFAULT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|| parse_date(s).map(|d| d.midnight().assume_utc()))
}

/// Parses the date portion of an ISO-8601 date or timestamp.
fn parse_date(s: &str) -> Option<Date> {
    let s: &str = s.trim();
    let date_part: &str = s.split(['T', ' ']).next().unwrap_or(s);
    Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()
}

/// Deserializes an optional informational section, ignoring it on failure.
fn parse_optional_section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &str,
) -> Option<T> {
    let value: &Value = root.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(section) => Some(section),
        Err(e) => {
            warn!(section = key, error = %e, "Ignoring malformed forecast section");
            None
        }
    }
}
