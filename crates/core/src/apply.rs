// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    DashboardState, DisplayedForecast, GenerationTicket, GenerationToken, IgnoredReason, Outcome,
    Phase, PreviewTicket, SelectionToken, TransitionResult,
};
use stockcast_domain::{
    DomainError, FileStatus, ForecastMonth, ValidatedPeriod, classify_selection,
};
use tracing::{debug, info, warn};

/// Applies a command to the current state, producing a new state and the
/// follow-up the caller must perform.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `current` - The current calendar month, used for period validation
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and outcome
/// * `Err(CoreError)` if the command is not permitted
///
/// # Errors
///
/// Returns an error if `Submit` is requested when the dashboard is not
/// ready to generate:
/// - No file has been selected
/// - The selected file was rejected
/// - The forecast period is missing or invalid
/// - A forecast is being displayed or a failure banner is showing
pub fn apply(
    state: &DashboardState,
    command: Command,
    current: ForecastMonth,
) -> Result<TransitionResult, CoreError> {
    debug!(command = command.name(), phase = state.phase.name(), "Applying command");

    match command {
        Command::SelectFile(selection) => {
            let mut new_state: DashboardState = state.clone();

            if let Phase::Generating { token, .. } = &state.phase {
                info!(%token, "File replaced while generating; discarding in-flight request");
            }

            new_state.selection = SelectionToken(state.selection.0 + 1);
            new_state.generation = GenerationToken(state.generation.0 + 1);
            new_state.forecast = None;
            new_state.preview = None;
            new_state.preview_error = None;
            new_state.file_status = classify_selection(selection.as_ref());

            let outcome: Outcome = match (&new_state.file_status, selection) {
                (FileStatus::Accepted { .. }, Some(file)) => {
                    new_state.file = Some(file.clone());
                    new_state.preview_pending = true;
                    Outcome::PreviewRequested(PreviewTicket {
                        token: new_state.selection,
                        file,
                    })
                }
                _ => {
                    new_state.file = None;
                    new_state.preview_pending = false;
                    Outcome::Applied
                }
            };

            new_state.settle(current);
            Ok(TransitionResult { new_state, outcome })
        }
        Command::SetStartMonth(start) => {
            let mut new_state: DashboardState = state.clone();
            new_state.period.set_start(start);
            if !state.phase.is_generating() {
                new_state.settle(current);
            }
            Ok(applied(new_state))
        }
        Command::SetEndMonth(end) => {
            let mut new_state: DashboardState = state.clone();
            new_state.period.set_end(end);
            if !state.phase.is_generating() {
                new_state.settle(current);
            }
            Ok(applied(new_state))
        }
        Command::Submit => submit(state, current),
        Command::GenerationSucceeded { token, response } => {
            let Some(period) = in_flight_period(state, token) else {
                return Ok(stale_generation(state, token));
            };

            let mut new_state: DashboardState = state.clone();
            info!(
                %token,
                products = response.products().len(),
                entries = response.entries().len(),
                "Forecast generated"
            );
            new_state.forecast = Some(DisplayedForecast { period, response });
            new_state.phase = Phase::Displaying;
            Ok(applied(new_state))
        }
        Command::GenerationFailed { token, error } => {
            if in_flight_period(state, token).is_none() {
                return Ok(stale_generation(state, token));
            }

            let mut new_state: DashboardState = state.clone();
            warn!(%token, error = %error, "Forecast generation failed");
            new_state.phase = Phase::GenerationFailed { error };
            Ok(applied(new_state))
        }
        Command::PreviewLoaded { token, summary } => {
            if token != state.selection {
                return Ok(stale_preview(state, token));
            }

            let mut new_state: DashboardState = state.clone();
            new_state.preview = Some(summary);
            new_state.preview_pending = false;
            new_state.preview_error = None;
            Ok(applied(new_state))
        }
        Command::PreviewFailed { token, message } => {
            if token != state.selection {
                return Ok(stale_preview(state, token));
            }

            let mut new_state: DashboardState = state.clone();
            new_state.preview_pending = false;
            new_state.preview_error = Some(message);
            Ok(applied(new_state))
        }
        Command::DismissError => {
            if !matches!(state.phase, Phase::GenerationFailed { .. }) {
                return Ok(ignored(state, IgnoredReason::NothingToDismiss));
            }

            let mut new_state: DashboardState = state.clone();
            new_state.settle(current);
            Ok(applied(new_state))
        }
    }
}

/// Handles a submission request.
fn submit(state: &DashboardState, current: ForecastMonth) -> Result<TransitionResult, CoreError> {
    match &state.phase {
        Phase::Generating { token, .. } => {
            debug!(%token, "Submission ignored; a request is already in flight");
            Ok(ignored(state, IgnoredReason::AlreadyGenerating))
        }
        Phase::ReadyToGenerate => {
            let Some(file) = state.file.clone() else {
                return Err(CoreError::NoFileSelected);
            };
            let period: ValidatedPeriod = state.period.validate(current)?;
            let token: GenerationToken = GenerationToken(state.generation.0 + 1);

            let mut new_state: DashboardState = state.clone();
            new_state.generation = token;
            new_state.phase = Phase::Generating { token, period };

            info!(
                %token,
                file = file.name(),
                period = %period.label(),
                "Forecast generation started"
            );

            Ok(TransitionResult {
                new_state,
                outcome: Outcome::GenerationStarted(GenerationTicket {
                    token,
                    file,
                    period,
                }),
            })
        }
        Phase::Idle | Phase::FileSelected | Phase::PeriodIncomplete => {
            Err(blocking_error(state, current))
        }
        Phase::Displaying | Phase::GenerationFailed { .. } => Err(CoreError::InvalidPhase {
            event: "submit",
            phase: state.phase.name(),
        }),
    }
}

/// Explains why a dashboard that is not ready cannot submit.
fn blocking_error(state: &DashboardState, current: ForecastMonth) -> CoreError {
    if let FileStatus::Rejected { file_name, .. } = &state.file_status {
        return CoreError::DomainViolation(DomainError::UnsupportedExtension {
            file_name: file_name.clone(),
        });
    }
    if state.file.is_none() {
        return CoreError::NoFileSelected;
    }
    match state.period.validate(current) {
        Err(err) => CoreError::DomainViolation(err),
        Ok(_) => CoreError::InvalidPhase {
            event: "submit",
            phase: state.phase.name(),
        },
    }
}

/// Returns the submitted period if `token` identifies the in-flight request.
fn in_flight_period(state: &DashboardState, token: GenerationToken) -> Option<ValidatedPeriod> {
    match &state.phase {
        Phase::Generating {
            token: expected,
            period,
        } if *expected == token => Some(*period),
        _ => None,
    }
}

const fn applied(new_state: DashboardState) -> TransitionResult {
    TransitionResult {
        new_state,
        outcome: Outcome::Applied,
    }
}

fn ignored(state: &DashboardState, reason: IgnoredReason) -> TransitionResult {
    TransitionResult {
        new_state: state.clone(),
        outcome: Outcome::Ignored(reason),
    }
}

fn stale_generation(state: &DashboardState, token: GenerationToken) -> TransitionResult {
    debug!(%token, current = %state.generation, "Discarding stale generation result");
    ignored(state, IgnoredReason::StaleGeneration { token })
}

fn stale_preview(state: &DashboardState, token: SelectionToken) -> TransitionResult {
    debug!(%token, current = %state.selection, "Discarding stale preview result");
    ignored(state, IgnoredReason::StalePreview { token })
}
