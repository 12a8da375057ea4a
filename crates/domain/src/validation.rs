// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::InventoryFile;
use tracing::debug;

/// The only file extension accepted for inventory uploads.
const CSV_EXTENSION: &str = ".csv";

/// Why a selected file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRejection {
    /// The file name does not end in `.csv`.
    UnsupportedExtension,
}

/// The status of the file picker after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// No file is selected. Clearing the picker is not an error.
    Empty,
    /// The selected file is an acceptable inventory source.
    Accepted {
        /// The accepted file name.
        file_name: String,
    },
    /// The selected file was rejected.
    Rejected {
        /// The rejected file name.
        file_name: String,
        /// The rejection reason.
        reason: FileRejection,
    },
}

impl FileStatus {
    /// Returns whether a usable file is selected.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Returns whether a file name ends in `.csv`, ignoring ASCII case.
#[must_use]
pub fn has_csv_extension(file_name: &str) -> bool {
    file_name
        .len()
        .checked_sub(CSV_EXTENSION.len())
        .and_then(|start| file_name.get(start..))
        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(CSV_EXTENSION))
}

/// Validates that a file is an acceptable inventory source.
///
/// Only the file name is authoritative. The declared media type is advisory,
/// since pickers report it inconsistently for CSV files.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedExtension` if the name does not end in
/// `.csv` (case-insensitive).
pub fn validate_inventory_file(file: &InventoryFile) -> Result<(), DomainError> {
    if !has_csv_extension(file.name()) {
        return Err(DomainError::UnsupportedExtension {
            file_name: file.name().to_string(),
        });
    }

    if let Some(mime_type) = file.mime_type()
        && !mime_type.eq_ignore_ascii_case("text/csv")
    {
        debug!(
            file_name = file.name(),
            mime_type, "Accepting CSV file with unexpected declared media type"
        );
    }

    Ok(())
}

/// Classifies a picker selection, where `None` means the picker was cleared.
#[must_use]
pub fn classify_selection(selection: Option<&InventoryFile>) -> FileStatus {
    match selection {
        None => FileStatus::Empty,
        Some(file) => match validate_inventory_file(file) {
            Ok(()) => FileStatus::Accepted {
                file_name: file.name().to_string(),
            },
            Err(_) => FileStatus::Rejected {
                file_name: file.name().to_string(),
                reason: FileRejection::UnsupportedExtension,
            },
        },
    }
}
