// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use stockcast_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A submission was requested with no file selected.
    NoFileSelected,
    /// The event is not permitted in the current phase.
    InvalidPhase {
        /// The event that was attempted.
        event: &'static str,
        /// The phase the dashboard was in.
        phase: &'static str,
    },
}

impl CoreError {
    /// Returns whether the error blocks submission because of the file picker.
    #[must_use]
    pub const fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::NoFileSelected | Self::DomainViolation(DomainError::UnsupportedExtension { .. })
        )
    }

    /// Returns whether the error blocks submission because of the period.
    #[must_use]
    pub const fn is_period_error(&self) -> bool {
        match self {
            Self::DomainViolation(err) => err.is_period_error(),
            _ => false,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoFileSelected => write!(f, "An inventory CSV file must be selected"),
            Self::InvalidPhase { event, phase } => {
                write!(f, "Cannot {event} while the dashboard is {phase}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Failures reaching the forecasting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The service answered with a non-success status code.
    Status(u16),
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The service could not be reached.
    NetworkUnavailable(String),
}

impl TransportError {
    /// Returns whether the user should be invited to retry.
    #[must_use]
    pub const fn suggests_retry(&self) -> bool {
        matches!(self, Self::Timeout | Self::NetworkUnavailable(_))
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "Forecast service responded with status {code}"),
            Self::Timeout => write!(f, "Forecast service timed out"),
            Self::NetworkUnavailable(msg) => {
                write!(f, "Forecast service is unreachable: {msg}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Reasons a forecast response failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// The response body is not valid JSON.
    MalformedJson(String),
    /// The response does not have the expected overall shape.
    MalformedStructure(String),
    /// The response contains no forecasted entries.
    Empty,
    /// An entry is not a single-key object mapping a date to product values.
    MalformedEntry {
        /// The zero-based entry index.
        index: usize,
        /// Description of the problem.
        reason: String,
    },
    /// An entry's product keys differ from those of the first entry.
    InconsistentProducts {
        /// The zero-based entry index.
        index: usize,
        /// Products present in the first entry but not this one.
        missing: Vec<String>,
        /// Products present in this entry but not the first one.
        unexpected: Vec<String>,
    },
    /// An entry's date key is not a valid date.
    BadDate {
        /// The zero-based entry index.
        index: usize,
        /// The offending date key.
        key: String,
    },
}

impl NormalizationError {
    /// Returns the entry index the error refers to, if any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::MalformedEntry { index, .. }
            | Self::InconsistentProducts { index, .. }
            | Self::BadDate { index, .. } => Some(*index),
            Self::MalformedJson(_) | Self::MalformedStructure(_) | Self::Empty => None,
        }
    }
}

impl std::fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson(msg) => write!(f, "Forecast response is not valid JSON: {msg}"),
            Self::MalformedStructure(msg) => write!(f, "Malformed forecast response: {msg}"),
            Self::Empty => write!(f, "Forecast response contains no forecasted entries"),
            Self::MalformedEntry { index, reason } => {
                write!(f, "Malformed forecast entry {index}: {reason}")
            }
            Self::InconsistentProducts {
                index,
                missing,
                unexpected,
            } => {
                write!(
                    f,
                    "Forecast entry {index} has inconsistent products (missing: [{}], unexpected: [{}])",
                    missing.join(", "),
                    unexpected.join(", ")
                )
            }
            Self::BadDate { index, key } => {
                write!(f, "Forecast entry {index} has an invalid date '{key}'")
            }
        }
    }
}

impl std::error::Error for NormalizationError {}

/// Why a forecast generation attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request did not produce a successful response.
    Transport(TransportError),
    /// The response could not be normalized.
    Normalization(NormalizationError),
}

impl GenerationError {
    /// Returns the dismissible banner text for this failure.
    #[must_use]
    pub fn banner_message(&self) -> String {
        match self {
            Self::Transport(err) if err.suggests_retry() => {
                format!("{err}. Please try again.")
            }
            Self::Transport(err) => format!("Failed to generate forecast: {err}"),
            Self::Normalization(err) => format!("Received an unusable forecast: {err}"),
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Transport error: {err}"),
            Self::Normalization(err) => write!(f, "Normalization error: {err}"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<TransportError> for GenerationError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<NormalizationError> for GenerationError {
    fn from(err: NormalizationError) -> Self {
        Self::Normalization(err)
    }
}
