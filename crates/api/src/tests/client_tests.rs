// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ClientBuildError, ClientConfig, DashboardController, DashboardReport, ForecastBackend,
    ForecastRequest, HttpForecastBackend, ThemeMode,
};
use std::time::Duration;
use stockcast::{Outcome, Phase, TransportError};
use stockcast_domain::ForecastPeriod;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{create_test_csv, current_month, month, three_month_body};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    }
}

fn january_to_march() -> ForecastRequest {
    let mut period: ForecastPeriod = ForecastPeriod::new();
    period.set_start(Some(month(2025, 1)));
    period.set_end(Some(month(2025, 3)));
    ForecastRequest::new(
        &create_test_csv("inventory.csv"),
        period.validate(current_month()).unwrap(),
    )
}

#[test]
fn test_default_config() {
    let config: ClientConfig = ClientConfig::default();

    assert_eq!(config.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.timeout, Duration::from_secs(120));
    assert_eq!(
        config.forecast_url().unwrap().as_str(),
        "http://127.0.0.1:8000/forecast"
    );
}

#[test]
fn test_trailing_slash_is_not_doubled() {
    let config: ClientConfig = ClientConfig {
        base_url: String::from("http://forecast.local/api/"),
        ..ClientConfig::default()
    };

    assert_eq!(
        config.forecast_url().unwrap().as_str(),
        "http://forecast.local/api/forecast"
    );
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let config: ClientConfig = ClientConfig {
        base_url: String::from("not a url"),
        ..ClientConfig::default()
    };

    assert!(matches!(
        HttpForecastBackend::new(&config),
        Err(ClientBuildError::InvalidEndpoint { .. })
    ));
}

#[tokio::test]
async fn test_posts_multipart_form() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/forecast"))
        .and(header_regex("content-type", "^multipart/form-data; boundary=.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_month_body()))
        .expect(1)
        .mount(&server)
        .await;

    let backend: HttpForecastBackend = HttpForecastBackend::new(&config_for(&server)).unwrap();
    let body: Vec<u8> = backend.generate(january_to_march()).await.unwrap();
    assert!(!body.is_empty());

    let requests = server.received_requests().await.unwrap();
    let sent: String = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(sent.contains("name=\"train_file\"; filename=\"inventory.csv\""));
    assert!(sent.contains("product_code,date,sales"));
    assert!(sent.contains("name=\"start_month\"\r\n\r\n2025-01"));
    assert!(sent.contains("name=\"end_month\"\r\n\r\n2025-03"));
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(422).set_body_string("<html>bad</html>"))
        .mount(&server)
        .await;

    let backend: HttpForecastBackend = HttpForecastBackend::new(&config_for(&server)).unwrap();
    let err: TransportError = backend.generate(january_to_march()).await.unwrap_err();

    assert_eq!(err, TransportError::Status(422));
    assert!(!err.suggests_retry());
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(three_month_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config: ClientConfig = ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(200),
    };
    let backend: HttpForecastBackend = HttpForecastBackend::new(&config).unwrap();
    let err: TransportError = backend.generate(january_to_march()).await.unwrap_err();

    assert_eq!(err, TransportError::Timeout);
    assert!(err.suggests_retry());
}

#[tokio::test]
async fn test_unreachable_service_is_network_unavailable() {
    // A pooled server keeps listening after drop
    let server: MockServer = MockServer::builder().start().await;
    let config: ClientConfig = config_for(&server);
    drop(server);

    let backend: HttpForecastBackend = HttpForecastBackend::new(&config).unwrap();
    let err: TransportError = backend.generate(january_to_march()).await.unwrap_err();

    assert!(matches!(err, TransportError::NetworkUnavailable(_)));
}

#[tokio::test]
async fn test_end_to_end_three_months_two_series() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_month_body()))
        .expect(1)
        .mount(&server)
        .await;

    let backend: HttpForecastBackend = HttpForecastBackend::new(&config_for(&server)).unwrap();
    let controller = DashboardController::new(backend, current_month());

    let ticket = controller
        .select_file(Some(create_test_csv("inventory.csv")))
        .await
        .unwrap()
        .unwrap();
    controller.load_preview(ticket).await.unwrap();
    controller.set_start_month(Some(month(2025, 1))).await.unwrap();
    controller.set_end_month(Some(month(2025, 3))).await.unwrap();

    let outcome: Outcome = controller.submit().await.unwrap();
    assert_eq!(outcome, Outcome::Applied);

    let state = controller.snapshot().await;
    assert_eq!(state.phase(), &Phase::Displaying);

    let report: DashboardReport =
        DashboardReport::from_state(&state, current_month(), ThemeMode::Light);
    let forecast = report.forecast.unwrap();
    assert_eq!(forecast.trend.len(), 3);
    assert_eq!(forecast.series.len(), 2);
    assert_eq!(forecast.series[0].product, "Alpha");
    assert_eq!(forecast.series[1].product, "Bravo");
    assert_eq!(forecast.trend[0].label, "Jan 2025");
    assert_eq!(forecast.trend[1].values, vec![Some(110.0), None]);
}
