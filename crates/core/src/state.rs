// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::GenerationError;
use crate::forecast::ForecastResponse;
use stockcast_domain::{
    DomainError, FileStatus, ForecastMonth, ForecastPeriod, InventoryFile, ValidatedPeriod,
};

/// Identifies one file selection. Incremented on every selection, including
/// clearing the picker, so previews for replaced files can be discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionToken(pub(crate) u64);

/// Identifies one generation epoch. Incremented on every file selection and
/// every accepted submission, so only the newest request may land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationToken(pub(crate) u64);

impl std::fmt::Display for GenerationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::fmt::Display for SelectionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The dashboard phase.
///
/// A single tagged phase replaces independent boolean flags, so impossible
/// combinations such as generating and failed at once cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No usable file is selected.
    Idle,
    /// A file is selected and no period bound has been chosen.
    FileSelected,
    /// A file is selected and the period is incomplete or invalid.
    PeriodIncomplete,
    /// A file is selected and the period is valid.
    ReadyToGenerate,
    /// A forecast request is in flight.
    Generating {
        /// The token of the in-flight request.
        token: GenerationToken,
        /// The period the request was submitted with.
        period: ValidatedPeriod,
    },
    /// The most recent request produced a forecast.
    Displaying,
    /// The most recent request failed.
    GenerationFailed {
        /// Why it failed.
        error: GenerationError,
    },
}

impl Phase {
    /// Returns a short name for logging and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileSelected => "waiting for a forecast period",
            Self::PeriodIncomplete => "waiting for a valid forecast period",
            Self::ReadyToGenerate => "ready to generate",
            Self::Generating { .. } => "generating",
            Self::Displaying => "displaying a forecast",
            Self::GenerationFailed { .. } => "showing a generation failure",
        }
    }

    /// Returns whether a request is in flight.
    #[must_use]
    pub const fn is_generating(&self) -> bool {
        matches!(self, Self::Generating { .. })
    }
}

/// Presentation-only summary of a parsed CSV preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSummary {
    /// The file the preview was parsed from.
    pub file_name: String,
    /// The number of data records, excluding the header and blank lines.
    pub records: usize,
    /// Advisory warnings, such as missing expected columns.
    pub warnings: Vec<String>,
}

/// The preview status of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus<'a> {
    /// No accepted file is selected.
    NotLoaded,
    /// The preview is still being parsed.
    Loading,
    /// The preview parsed successfully.
    Loaded(&'a PreviewSummary),
    /// The preview could not be parsed. Generation is unaffected.
    Failed(&'a str),
}

/// A forecast together with the period it was generated for.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedForecast {
    /// The period submitted with the request.
    pub period: ValidatedPeriod,
    /// The normalized response.
    pub response: ForecastResponse,
}

/// Everything needed to dispatch one forecast request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    /// The token the completion must carry.
    pub token: GenerationToken,
    /// The file to submit.
    pub file: InventoryFile,
    /// The validated period to submit.
    pub period: ValidatedPeriod,
}

/// Everything needed to parse one CSV preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTicket {
    /// The token the completion must carry.
    pub token: SelectionToken,
    /// The file to preview.
    pub file: InventoryFile,
}

/// Why a command was accepted without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// A submission arrived while a request was already in flight.
    AlreadyGenerating,
    /// A generation result arrived for a superseded request.
    StaleGeneration {
        /// The token the result carried.
        token: GenerationToken,
    },
    /// A preview result arrived for a replaced file.
    StalePreview {
        /// The token the result carried.
        token: SelectionToken,
    },
    /// There was no failure banner to dismiss.
    NothingToDismiss,
}

/// What the caller must do after a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed; nothing else to do.
    Applied,
    /// An accepted file should be parsed for preview.
    PreviewRequested(PreviewTicket),
    /// A forecast request should be dispatched.
    GenerationStarted(GenerationTicket),
    /// The command was ignored.
    Ignored(IgnoredReason),
}

/// The result of a successful state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: DashboardState,
    /// The follow-up the caller must perform.
    pub outcome: Outcome,
}

/// The complete dashboard state.
///
/// Owned by a single writer. Every change goes through `apply`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub(crate) file: Option<InventoryFile>,
    pub(crate) file_status: FileStatus,
    pub(crate) period: ForecastPeriod,
    pub(crate) phase: Phase,
    pub(crate) selection: SelectionToken,
    pub(crate) generation: GenerationToken,
    pub(crate) preview: Option<PreviewSummary>,
    pub(crate) preview_pending: bool,
    pub(crate) preview_error: Option<String>,
    pub(crate) forecast: Option<DisplayedForecast>,
}

impl DashboardState {
    /// Creates an idle dashboard with no file and no period.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            file: None,
            file_status: FileStatus::Empty,
            period: ForecastPeriod::new(),
            phase: Phase::Idle,
            selection: SelectionToken(0),
            generation: GenerationToken(0),
            preview: None,
            preview_pending: false,
            preview_error: None,
            forecast: None,
        }
    }

    /// Returns the selected file, if one was accepted.
    #[must_use]
    pub const fn file(&self) -> Option<&InventoryFile> {
        self.file.as_ref()
    }

    /// Returns the file picker status.
    #[must_use]
    pub const fn file_status(&self) -> &FileStatus {
        &self.file_status
    }

    /// Returns the selected period, possibly incomplete.
    #[must_use]
    pub const fn period(&self) -> &ForecastPeriod {
        &self.period
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the current selection token.
    #[must_use]
    pub const fn selection(&self) -> SelectionToken {
        self.selection
    }

    /// Returns the current generation token.
    #[must_use]
    pub const fn generation(&self) -> GenerationToken {
        self.generation
    }

    /// Returns the most recent successful preview.
    #[must_use]
    pub const fn preview(&self) -> Option<&PreviewSummary> {
        self.preview.as_ref()
    }

    /// Returns whether a preview for the current file is still being parsed.
    #[must_use]
    pub const fn is_previewing(&self) -> bool {
        self.preview_pending
    }

    /// Returns the last preview failure for the current file.
    #[must_use]
    pub fn preview_error(&self) -> Option<&str> {
        self.preview_error.as_deref()
    }

    /// Returns the preview status for the current selection.
    #[must_use]
    pub fn preview_status(&self) -> PreviewStatus<'_> {
        if self.preview_pending {
            return PreviewStatus::Loading;
        }
        match (&self.preview_error, &self.preview) {
            (Some(message), _) => PreviewStatus::Failed(message),
            (None, Some(summary)) => PreviewStatus::Loaded(summary),
            (None, None) => PreviewStatus::NotLoaded,
        }
    }

    /// Returns the last successfully generated forecast.
    ///
    /// A failed regeneration keeps the previous forecast visible; only a new
    /// file selection discards it.
    #[must_use]
    pub const fn forecast(&self) -> Option<&DisplayedForecast> {
        self.forecast.as_ref()
    }

    /// Returns inline feedback for the file picker.
    #[must_use]
    pub fn file_feedback(&self) -> Option<String> {
        match &self.file_status {
            FileStatus::Rejected { file_name, .. } => Some(
                DomainError::UnsupportedExtension {
                    file_name: file_name.clone(),
                }
                .to_string(),
            ),
            FileStatus::Empty | FileStatus::Accepted { .. } => None,
        }
    }

    /// Returns inline feedback for the period pickers, if any bound is set
    /// and the period does not validate.
    #[must_use]
    pub fn period_feedback(&self, current: ForecastMonth) -> Option<String> {
        if self.period.is_empty() {
            return None;
        }
        self.period.validate(current).err().map(|e| e.to_string())
    }

    /// Returns the dismissible banner text for a failed generation.
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        match &self.phase {
            Phase::GenerationFailed { error } => Some(error.banner_message()),
            _ => None,
        }
    }

    /// Recomputes the phase from the file and period.
    ///
    /// Must not be called while a request is in flight.
    pub(crate) fn settle(&mut self, current: ForecastMonth) {
        self.phase = if self.file.is_none() {
            Phase::Idle
        } else if self.period.validate(current).is_ok() {
            Phase::ReadyToGenerate
        } else if self.period.is_empty() {
            Phase::FileSelected
        } else {
            Phase::PeriodIncomplete
        };
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
