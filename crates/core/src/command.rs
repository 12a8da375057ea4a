// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::GenerationError;
use crate::forecast::ForecastResponse;
use crate::state::{GenerationToken, PreviewSummary, SelectionToken};
use stockcast_domain::{ForecastMonth, InventoryFile};

/// A command represents user intent or an async completion as data only.
///
/// Commands are the only way to request dashboard state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// The file picker resolved a file, or `None` if it was cleared.
    SelectFile(Option<InventoryFile>),
    /// Set or clear the forecast start month. Always clears the end month.
    SetStartMonth(Option<ForecastMonth>),
    /// Set or clear the forecast end month.
    SetEndMonth(Option<ForecastMonth>),
    /// Request forecast generation.
    Submit,
    /// A forecast request completed with a normalized response.
    GenerationSucceeded {
        /// The token issued when the request started.
        token: GenerationToken,
        /// The normalized response.
        response: ForecastResponse,
    },
    /// A forecast request failed.
    GenerationFailed {
        /// The token issued when the request started.
        token: GenerationToken,
        /// Why the request failed.
        error: GenerationError,
    },
    /// A CSV preview finished parsing.
    PreviewLoaded {
        /// The selection the preview was requested for.
        token: SelectionToken,
        /// The preview summary.
        summary: PreviewSummary,
    },
    /// A CSV preview could not be parsed.
    PreviewFailed {
        /// The selection the preview was requested for.
        token: SelectionToken,
        /// The parse failure message.
        message: String,
    },
    /// Dismiss the generation failure banner.
    DismissError,
}

impl Command {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectFile(_) => "SelectFile",
            Self::SetStartMonth(_) => "SetStartMonth",
            Self::SetEndMonth(_) => "SetEndMonth",
            Self::Submit => "Submit",
            Self::GenerationSucceeded { .. } => "GenerationSucceeded",
            Self::GenerationFailed { .. } => "GenerationFailed",
            Self::PreviewLoaded { .. } => "PreviewLoaded",
            Self::PreviewFailed { .. } => "PreviewFailed",
            Self::DismissError => "DismissError",
        }
    }
}
