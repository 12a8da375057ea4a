// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async driver for the dashboard state machine.
//!
//! The controller is the single writer of `DashboardState`. Every change goes
//! through `stockcast::apply` while the state lock is held; the lock is never
//! held across file parsing or network round-trips, so new selections remain
//! possible while a request is outstanding.

use std::path::Path;
use std::sync::Arc;
use stockcast::{
    Command, DashboardState, GenerationError, GenerationTicket, Outcome, PreviewSummary,
    PreviewTicket, TransitionResult, apply, normalize_forecast_slice,
};
use stockcast_domain::{DomainError, FileStatus, ForecastMonth, InventoryFile};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::client::ForecastBackend;
use crate::csv_preview::preview_inventory_csv;
use crate::error::ApiError;
use crate::request::ForecastRequest;

/// Drives the dashboard against a forecasting backend.
#[derive(Debug)]
pub struct DashboardController<B> {
    state: Arc<Mutex<DashboardState>>,
    backend: Arc<B>,
    current_month: ForecastMonth,
}

impl<B> Clone for DashboardController<B> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            backend: Arc::clone(&self.backend),
            current_month: self.current_month,
        }
    }
}

impl<B: ForecastBackend> DashboardController<B> {
    /// Creates an idle controller.
    ///
    /// # Arguments
    ///
    /// * `backend` - The forecasting service transport
    /// * `current_month` - The month period validation treats as "now"
    #[must_use]
    pub fn new(backend: B, current_month: ForecastMonth) -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState::new())),
            backend: Arc::new(backend),
            current_month,
        }
    }

    /// Returns the month period validation treats as "now".
    #[must_use]
    pub const fn current_month(&self) -> ForecastMonth {
        self.current_month
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Applies one command under the state lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected. The state is left
    /// unchanged in that case.
    pub async fn dispatch(&self, command: Command) -> Result<Outcome, ApiError> {
        let name: &'static str = command.name();
        let mut state = self.state.lock().await;
        let TransitionResult { new_state, outcome } =
            apply(&state, command, self.current_month).map_err(|e| {
                warn!(command = name, error = %e, "Command rejected");
                ApiError::from(e)
            })?;
        *state = new_state;
        drop(state);

        debug!(command = name, ?outcome, "Command applied");
        Ok(outcome)
    }

    /// Selects a file, or clears the selection with `None`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PreviewTicket))` if the file was accepted and should be previewed
    /// * `Ok(None)` if the selection was cleared
    ///
    /// # Errors
    ///
    /// Returns `ApiError::FileRejected` if the file is not a CSV file. The
    /// rejection is also recorded in the state for inline feedback.
    pub async fn select_file(
        &self,
        file: Option<InventoryFile>,
    ) -> Result<Option<PreviewTicket>, ApiError> {
        match self.dispatch(Command::SelectFile(file)).await? {
            Outcome::PreviewRequested(ticket) => {
                info!(file = ticket.file.name(), bytes = ticket.file.len(), "File selected");
                Ok(Some(ticket))
            }
            _ => {
                let state: DashboardState = self.snapshot().await;
                if state.file_feedback().is_some() {
                    return Err(rejection(&state));
                }
                info!("File selection cleared");
                Ok(None)
            }
        }
    }

    /// Parses a preview for a selected file and records the result.
    ///
    /// Parsing runs on the blocking pool. A failure is recorded in the state
    /// and never blocks generation.
    ///
    /// # Errors
    ///
    /// Returns an error only if recording the result is rejected.
    pub async fn load_preview(&self, ticket: PreviewTicket) -> Result<Outcome, ApiError> {
        let PreviewTicket { token, file } = ticket;
        let file_name: String = file.name().to_string();

        let parsed = tokio::task::spawn_blocking(move || preview_inventory_csv(file.bytes())).await;

        let command: Command = match parsed {
            Ok(Ok(preview)) => {
                let summary: PreviewSummary = preview.into_summary(&file_name);
                info!(
                    file = %file_name,
                    records = summary.records,
                    warnings = summary.warnings.len(),
                    "Preview loaded"
                );
                Command::PreviewLoaded { token, summary }
            }
            Ok(Err(e)) => {
                warn!(file = %file_name, error = %e, "Preview failed");
                Command::PreviewFailed {
                    token,
                    message: e.to_string(),
                }
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "Preview task failed");
                Command::PreviewFailed {
                    token,
                    message: format!("Preview could not be completed: {e}"),
                }
            }
        };

        self.dispatch(command).await
    }

    /// Sets or clears the first forecast month. Always clears the end month.
    ///
    /// # Errors
    ///
    /// Never fails in practice; returns the dispatch result for symmetry.
    pub async fn set_start_month(&self, month: Option<ForecastMonth>) -> Result<Outcome, ApiError> {
        self.dispatch(Command::SetStartMonth(month)).await
    }

    /// Sets or clears the last forecast month.
    ///
    /// # Errors
    ///
    /// Never fails in practice; returns the dispatch result for symmetry.
    pub async fn set_end_month(&self, month: Option<ForecastMonth>) -> Result<Outcome, ApiError> {
        self.dispatch(Command::SetEndMonth(month)).await
    }

    /// Dismisses the generation failure banner.
    ///
    /// # Errors
    ///
    /// Never fails in practice; returns the dispatch result for symmetry.
    pub async fn dismiss_error(&self) -> Result<Outcome, ApiError> {
        self.dispatch(Command::DismissError).await
    }

    /// Requests generation.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(GenerationTicket))` if a new request should be dispatched
    /// * `Ok(None)` if a request is already in flight
    ///
    /// # Errors
    ///
    /// Returns an error if the dashboard is not ready to generate.
    pub async fn begin_generation(&self) -> Result<Option<GenerationTicket>, ApiError> {
        match self.dispatch(Command::Submit).await? {
            Outcome::GenerationStarted(ticket) => Ok(Some(ticket)),
            _ => Ok(None),
        }
    }

    /// Sends the request for a ticket and records the result.
    ///
    /// The state lock is not held while the request is outstanding. A result
    /// for a superseded ticket is discarded on arrival.
    ///
    /// A ticket is only issued once the selected file and period pass the
    /// checks of `build_forecast_request`, so the request is assembled from
    /// the ticket directly.
    ///
    /// # Errors
    ///
    /// Returns an error only if recording the result is rejected.
    pub async fn complete_generation(&self, ticket: GenerationTicket) -> Result<Outcome, ApiError> {
        let GenerationTicket {
            token,
            file,
            period,
        } = ticket;
        let request: ForecastRequest = ForecastRequest::new(&file, period);

        let result: Result<_, GenerationError> = match self.backend.generate(request).await {
            Ok(body) => normalize_forecast_slice(&body).map_err(GenerationError::from),
            Err(e) => Err(GenerationError::from(e)),
        };

        let command: Command = match result {
            Ok(response) => Command::GenerationSucceeded { token, response },
            Err(error) => Command::GenerationFailed { token, error },
        };

        self.dispatch(command).await
    }

    /// Requests generation, waits for the result, and records it.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` describing how the result was recorded, or
    ///   `Outcome::Ignored` if a request was already in flight
    ///
    /// # Errors
    ///
    /// Returns an error if the dashboard is not ready to generate.
    pub async fn submit(&self) -> Result<Outcome, ApiError> {
        match self.dispatch(Command::Submit).await? {
            Outcome::GenerationStarted(ticket) => self.complete_generation(ticket).await,
            other => Ok(other),
        }
    }
}

/// Builds the error for a rejected selection from the recorded file status.
fn rejection(state: &DashboardState) -> ApiError {
    match state.file_status() {
        FileStatus::Rejected { file_name, .. } => {
            ApiError::FileRejected(DomainError::UnsupportedExtension {
                file_name: file_name.clone(),
            })
        }
        FileStatus::Empty | FileStatus::Accepted { .. } => ApiError::NoFileSelected,
    }
}

/// Reads an inventory file from disk.
///
/// # Errors
///
/// Returns `ApiError::FileRead` if the file cannot be read.
pub async fn read_inventory_file(path: &Path) -> Result<InventoryFile, ApiError> {
    let bytes: Vec<u8> = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let name: String = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mime_type: Option<String> = path
        .extension()
        .filter(|ext| ext.eq_ignore_ascii_case("csv"))
        .map(|_| String::from("text/csv"));

    debug!(path = %path.display(), bytes = bytes.len(), "Read inventory file");
    Ok(InventoryFile::new(name, mime_type, bytes))
}
