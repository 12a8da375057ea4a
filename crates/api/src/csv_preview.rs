// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview for inventory uploads.
//!
//! This module parses an inventory file for on-screen confirmation only.
//! The preview is never sent to the forecasting service; the raw file bytes
//! are what gets submitted.

use csv::StringRecord;
use std::collections::{BTreeMap, HashSet};
use stockcast::PreviewSummary;
use tracing::debug;

use crate::error::ApiError;

/// Columns the forecasting service expects in an inventory file.
pub const EXPECTED_COLUMNS: &[&str] = &["product_code", "date", "sales"];

/// A parsed inventory preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreview {
    /// Header names in file order, trimmed.
    pub headers: Vec<String>,
    /// One mapping per non-blank data row, keyed by header name.
    pub rows: Vec<BTreeMap<String, String>>,
    /// Advisory warnings. They never block submission.
    pub warnings: Vec<String>,
}

impl CsvPreview {
    /// Returns the number of data records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Converts the preview into the summary tracked by the dashboard.
    #[must_use]
    pub fn into_summary(self, file_name: &str) -> PreviewSummary {
        PreviewSummary {
            file_name: file_name.to_string(),
            records: self.rows.len(),
            warnings: self.warnings,
        }
    }
}

/// Normalizes a header name: trim, lowercase, replace spaces with underscores.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Returns a warning for each expected column the headers do not provide.
fn missing_column_warnings(headers: &[String]) -> Vec<String> {
    let present: HashSet<String> = headers.iter().map(|h| normalize_header(h)).collect();

    EXPECTED_COLUMNS
        .iter()
        .filter(|expected| !present.contains(**expected))
        .map(|missing| format!("Expected column '{missing}' was not found"))
        .collect()
}

/// Returns whether every field of a record is blank.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Previews inventory CSV content without sending it anywhere.
///
/// The first row defines field names; every later non-blank row becomes a
/// mapping from header name to cell text.
///
/// # Arguments
///
/// * `content` - The raw file bytes
///
/// # Returns
///
/// * `Ok(CsvPreview)` with the parsed rows and advisory warnings
/// * `Err(ApiError)` if the content is not valid CSV
///
/// # Errors
///
/// Returns an error if:
/// - The file has no header row
/// - The content is not valid UTF-8
/// - A non-blank row has a different number of fields than the header
pub fn preview_inventory_csv(content: &[u8]) -> Result<CsvPreview, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    // Get and validate headers
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(ApiError::InvalidCsvFormat {
            reason: String::from("CSV file has no header row"),
        });
    }

    let mut rows: Vec<BTreeMap<String, String>> = Vec::new();

    for result in reader.records() {
        let record: StringRecord = result.map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("CSV parse error: {e}"),
        })?;

        if is_blank(&record) {
            continue;
        }

        if record.len() != headers.len() {
            let line: u64 = record.position().map_or(0, csv::Position::line);
            return Err(ApiError::InvalidCsvFormat {
                reason: format!(
                    "line {line} has {} fields, expected {}",
                    record.len(),
                    headers.len()
                ),
            });
        }

        rows.push(
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect(),
        );
    }

    let warnings: Vec<String> = missing_column_warnings(&headers);

    debug!(
        columns = headers.len(),
        records = rows.len(),
        warnings = warnings.len(),
        "Parsed inventory preview"
    );

    Ok(CsvPreview {
        headers,
        rows,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Product Code"), "product_code");
        assert_eq!(normalize_header("  DATE  "), "date");
        assert_eq!(normalize_header("sales"), "sales");
    }

    #[test]
    fn test_rows_are_keyed_by_header() {
        let csv: &str = "product_code,date,sales\nA1,2024-01-01,12\nB2,2024-01-01,7\n";
        let preview: CsvPreview = preview_inventory_csv(csv.as_bytes()).unwrap();

        assert_eq!(preview.headers, vec!["product_code", "date", "sales"]);
        assert_eq!(preview.record_count(), 2);
        assert_eq!(preview.rows[0]["product_code"], "A1");
        assert_eq!(preview.rows[1]["sales"], "7");
        assert!(preview.warnings.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv: &str = "product_code,date,sales\n\nA1,2024-01-01,12\n\n  \n,,\nB2,2024-02-01,9\n";
        let preview: CsvPreview = preview_inventory_csv(csv.as_bytes()).unwrap();

        assert_eq!(preview.record_count(), 2);
    }

    #[test]
    fn test_header_only_file_has_no_records() {
        let preview: CsvPreview = preview_inventory_csv(b"product_code,date,sales\n").unwrap();

        assert_eq!(preview.record_count(), 0);
    }

    #[test]
    fn test_missing_expected_columns_are_warnings() {
        let csv: &str = "Product Code,Quantity\nA1,3\n";
        let preview: CsvPreview = preview_inventory_csv(csv.as_bytes()).unwrap();

        assert_eq!(preview.record_count(), 1);
        assert_eq!(
            preview.warnings,
            vec![
                String::from("Expected column 'date' was not found"),
                String::from("Expected column 'sales' was not found"),
            ]
        );
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let err: ApiError = preview_inventory_csv(b"").unwrap_err();

        assert!(matches!(err, ApiError::InvalidCsvFormat { .. }));
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let csv: &str = "product_code,date,sales\nA1,2024-01-01\n";
        let err: ApiError = preview_inventory_csv(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let content: &[u8] = b"product_code,date,sales\nA\xff,2024-01-01,1\n";
        let err: ApiError = preview_inventory_csv(content).unwrap_err();

        assert!(matches!(err, ApiError::InvalidCsvFormat { .. }));
    }

    #[test]
    fn test_into_summary_carries_file_name() {
        let preview: CsvPreview =
            preview_inventory_csv(b"product_code,date,sales\nA1,2024-01-01,1\n").unwrap();
        let summary: PreviewSummary = preview.into_summary("inventory.csv");

        assert_eq!(summary.file_name, "inventory.csv");
        assert_eq!(summary.records, 1);
    }
}
