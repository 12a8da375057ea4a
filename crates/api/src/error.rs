// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use stockcast::{CoreError, GenerationError};
use stockcast_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and carry the user-visible
/// message for every rejected transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No inventory file has been selected.
    #[error("An inventory CSV file must be selected")]
    NoFileSelected,

    /// The selected file is not an acceptable inventory source.
    #[error("{0}")]
    FileRejected(DomainError),

    /// The forecast period is incomplete or violates its invariants.
    #[error("{0}")]
    PeriodInvalid(DomainError),

    /// The command is not permitted in the current dashboard phase.
    #[error("{message}")]
    InvalidTransition {
        /// A human-readable description of the rejected transition.
        message: String,
    },

    /// The CSV preview could not be parsed.
    #[error("Invalid CSV: {reason}")]
    InvalidCsvFormat {
        /// Description of the parse failure.
        reason: String,
    },

    /// An inventory file could not be read from disk.
    #[error("Failed to read '{path}': {reason}")]
    FileRead {
        /// The path that was read.
        path: String,
        /// Description of the I/O failure.
        reason: String,
    },

    /// Forecast generation failed.
    #[error("{}", .0.banner_message())]
    Generation(GenerationError),
}

/// Errors raised while constructing the HTTP transport.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The configured base URL is not a valid URL.
    #[error("Invalid forecast endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The configured base URL.
        url: String,
        /// Why it could not be parsed.
        reason: String,
    },

    /// The HTTP client could not be created.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NoFileSelected => ApiError::NoFileSelected,
        CoreError::DomainViolation(domain @ DomainError::UnsupportedExtension { .. }) => {
            ApiError::FileRejected(domain)
        }
        CoreError::DomainViolation(domain) => ApiError::PeriodInvalid(domain),
        err @ CoreError::InvalidPhase { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self::Generation(err)
    }
}
