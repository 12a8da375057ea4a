// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, DashboardController, ForecastRequest, build_forecast_request, read_inventory_file,
};
use stockcast::{
    DashboardState, IgnoredReason, NormalizationError, Outcome, Phase, PreviewStatus,
    TransportError,
};
use stockcast_domain::{DomainError, InventoryFile};

use super::helpers::{
    ScriptedBackend, create_test_csv, current_month, month, one_month_body, three_month_body,
};

async fn ready(controller: &DashboardController<ScriptedBackend>, file_name: &str) {
    controller
        .select_file(Some(create_test_csv(file_name)))
        .await
        .unwrap();
    controller.set_start_month(Some(month(2025, 1))).await.unwrap();
    controller.set_end_month(Some(month(2025, 3))).await.unwrap();
}

#[tokio::test]
async fn test_rejected_selection_surfaces_message() {
    let controller = DashboardController::new(ScriptedBackend::new(), current_month());
    let file: InventoryFile = InventoryFile::new("stock.xls", None, b"data".to_vec());

    let err: ApiError = controller.select_file(Some(file)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported file 'stock.xls': please upload a valid .csv file"
    );

    let state: DashboardState = controller.snapshot().await;
    assert_eq!(state.phase(), &Phase::Idle);
    assert!(state.file_feedback().is_some());
}

#[tokio::test]
async fn test_cleared_selection_is_not_an_error() {
    let controller = DashboardController::new(ScriptedBackend::new(), current_month());
    ready(&controller, "inventory.csv").await;

    assert!(controller.select_file(None).await.unwrap().is_none());
    assert_eq!(controller.snapshot().await.phase(), &Phase::Idle);
}

#[tokio::test]
async fn test_preview_reports_record_count() {
    let controller = DashboardController::new(ScriptedBackend::new(), current_month());
    let ticket = controller
        .select_file(Some(create_test_csv("inventory.csv")))
        .await
        .unwrap()
        .unwrap();

    controller.load_preview(ticket).await.unwrap();

    let state: DashboardState = controller.snapshot().await;
    assert!(matches!(
        state.preview_status(),
        PreviewStatus::Loaded(summary) if summary.records == 2
    ));
}

#[tokio::test]
async fn test_preview_failure_does_not_block_submission() {
    let backend: ScriptedBackend =
        ScriptedBackend::new().answer("broken.csv", &one_month_body("Alpha", 5.0));
    let controller = DashboardController::new(backend, current_month());
    let file: InventoryFile = InventoryFile::new("broken.csv", None, b"a,b\n1,2,3\n".to_vec());

    let ticket = controller.select_file(Some(file)).await.unwrap().unwrap();
    controller.load_preview(ticket).await.unwrap();
    controller.set_start_month(Some(month(2025, 1))).await.unwrap();
    controller.set_end_month(Some(month(2025, 1))).await.unwrap();

    let state: DashboardState = controller.snapshot().await;
    assert!(matches!(state.preview_status(), PreviewStatus::Failed(_)));
    assert_eq!(state.phase(), &Phase::ReadyToGenerate);

    controller.submit().await.unwrap();
    assert_eq!(controller.snapshot().await.phase(), &Phase::Displaying);
}

#[tokio::test]
async fn test_submit_before_ready_is_rejected() {
    let controller = DashboardController::new(ScriptedBackend::new(), current_month());
    controller
        .select_file(Some(create_test_csv("inventory.csv")))
        .await
        .unwrap();
    controller.set_start_month(Some(month(2025, 1))).await.unwrap();

    let err: ApiError = controller.submit().await.unwrap_err();
    assert_eq!(err, ApiError::PeriodInvalid(DomainError::MissingEndMonth));
}

#[tokio::test]
async fn test_null_values_survive_the_pipeline() {
    let backend: ScriptedBackend =
        ScriptedBackend::new().answer("inventory.csv", &three_month_body());
    let controller = DashboardController::new(backend, current_month());
    ready(&controller, "inventory.csv").await;

    controller.submit().await.unwrap();

    let state: DashboardState = controller.snapshot().await;
    let response = &state.forecast().unwrap().response;
    assert!(response.entries()[1].value("Bravo").is_absent());
    assert_eq!(response.latest_month_bars()[1].label(), "0");
}

#[tokio::test]
async fn test_transport_failure_moves_to_generation_failed() {
    let backend: ScriptedBackend =
        ScriptedBackend::new().fail("inventory.csv", TransportError::Timeout);
    let controller = DashboardController::new(backend, current_month());
    ready(&controller, "inventory.csv").await;

    controller.submit().await.unwrap();

    let state: DashboardState = controller.snapshot().await;
    assert!(matches!(state.phase(), Phase::GenerationFailed { .. }));
    assert_eq!(
        state.banner().as_deref(),
        Some("Forecast service timed out. Please try again.")
    );

    controller.dismiss_error().await.unwrap();
    assert_eq!(controller.snapshot().await.phase(), &Phase::ReadyToGenerate);
}

#[tokio::test]
async fn test_unusable_body_moves_to_generation_failed() {
    let backend: ScriptedBackend =
        ScriptedBackend::new().answer_raw("inventory.csv", b"{\"forecasted_products\": []}");
    let controller = DashboardController::new(backend, current_month());
    ready(&controller, "inventory.csv").await;

    controller.submit().await.unwrap();

    let state: DashboardState = controller.snapshot().await;
    assert!(matches!(
        state.phase(),
        Phase::GenerationFailed {
            error: stockcast::GenerationError::Normalization(NormalizationError::Empty)
        }
    ));
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let backend: ScriptedBackend =
        ScriptedBackend::new().answer("inventory.csv", &three_month_body());
    let controller = DashboardController::new(backend, current_month());
    ready(&controller, "inventory.csv").await;

    let ticket = controller.begin_generation().await.unwrap().unwrap();
    assert!(controller.begin_generation().await.unwrap().is_none());
    assert_eq!(
        controller.submit().await.unwrap(),
        Outcome::Ignored(IgnoredReason::AlreadyGenerating)
    );

    controller.complete_generation(ticket).await.unwrap();
    assert_eq!(controller.snapshot().await.phase(), &Phase::Displaying);
}

#[tokio::test]
async fn test_dispatched_request_matches_built_request() {
    let backend: ScriptedBackend =
        ScriptedBackend::new().answer("inventory.csv", &three_month_body());
    let recorder: ScriptedBackend = backend.clone();
    let controller = DashboardController::new(backend, current_month());
    ready(&controller, "inventory.csv").await;

    let state: DashboardState = controller.snapshot().await;
    let expected: ForecastRequest =
        build_forecast_request(state.file(), state.period(), current_month()).unwrap();

    controller.submit().await.unwrap();

    assert_eq!(recorder.received(), vec![expected]);
}

#[tokio::test]
async fn test_stale_response_for_replaced_file_is_discarded() {
    let backend: ScriptedBackend = ScriptedBackend::new()
        .answer("a.csv", &one_month_body("FromA", 1.0))
        .answer("b.csv", &one_month_body("FromB", 2.0));
    let controller = DashboardController::new(backend, current_month());

    ready(&controller, "a.csv").await;
    let ticket_a = controller.begin_generation().await.unwrap().unwrap();

    // File B replaces A before A's response arrives
    ready(&controller, "b.csv").await;
    let ticket_b = controller.begin_generation().await.unwrap().unwrap();

    let landed_b: Outcome = controller.complete_generation(ticket_b).await.unwrap();
    assert_eq!(landed_b, Outcome::Applied);

    let landed_a: Outcome = controller.complete_generation(ticket_a.clone()).await.unwrap();
    assert_eq!(
        landed_a,
        Outcome::Ignored(IgnoredReason::StaleGeneration {
            token: ticket_a.token
        })
    );

    let state: DashboardState = controller.snapshot().await;
    assert_eq!(state.phase(), &Phase::Displaying);
    assert_eq!(
        state.forecast().unwrap().response.products(),
        &[String::from("FromB")]
    );
}

#[tokio::test]
async fn test_read_inventory_file_from_disk() {
    let path = std::env::temp_dir().join(format!("stockcast-{}.csv", std::process::id()));
    tokio::fs::write(&path, b"product_code,date,sales\n").await.unwrap();

    let file: InventoryFile = read_inventory_file(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert!(file.name().ends_with(".csv"));
    assert_eq!(file.mime_type(), Some("text/csv"));
    assert_eq!(file.bytes(), b"product_code,date,sales\n");
}

#[tokio::test]
async fn test_read_missing_file_reports_path() {
    let err: ApiError = read_inventory_file(std::path::Path::new("/nonexistent/stock.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::FileRead { .. }));
    assert!(err.to_string().contains("/nonexistent/stock.csv"));
}
