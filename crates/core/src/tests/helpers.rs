// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Command, DashboardState, ForecastResponse, GenerationTicket, Outcome, TransitionResult, apply,
    normalize_forecast,
};
use serde_json::json;
use stockcast_domain::{ForecastMonth, InventoryFile};

pub fn month(year: i32, number: u8) -> ForecastMonth {
    ForecastMonth::new(year, number).unwrap()
}

/// The month every dashboard test treats as "now".
pub fn current_month() -> ForecastMonth {
    month(2024, 12)
}

pub fn create_test_csv() -> InventoryFile {
    InventoryFile::new(
        "inventory.csv",
        Some(String::from("text/csv")),
        b"product_code,date,sales\nAlpha,2024-01-01,10\n".to_vec(),
    )
}

pub fn create_test_response() -> ForecastResponse {
    normalize_forecast(&json!({
        "forecasted_products": [
            { "2025-01-01": { "Alpha": 100.4, "Bravo": 50 } },
            { "2025-02-01": { "Alpha": 110, "Bravo": null } },
            { "2025-03-01": { "Alpha": 120.6, "Bravo": 0 } }
        ]
    }))
    .unwrap()
}

/// Applies a command that is expected to succeed.
pub fn step(state: &DashboardState, command: Command) -> TransitionResult {
    apply(state, command, current_month()).unwrap()
}

/// Builds a dashboard with a file and a valid January to March period.
pub fn create_ready_state() -> DashboardState {
    let mut state: DashboardState = step(
        &DashboardState::new(),
        Command::SelectFile(Some(create_test_csv())),
    )
    .new_state;
    state = step(&state, Command::SetStartMonth(Some(month(2025, 1)))).new_state;
    step(&state, Command::SetEndMonth(Some(month(2025, 3)))).new_state
}

/// Submits from a ready dashboard and returns the generating state and ticket.
pub fn create_generating_state() -> (DashboardState, GenerationTicket) {
    let result: TransitionResult = step(&create_ready_state(), Command::Submit);
    match result.outcome {
        Outcome::GenerationStarted(ticket) => (result.new_state, ticket),
        other => panic!("expected generation to start, got {other:?}"),
    }
}
