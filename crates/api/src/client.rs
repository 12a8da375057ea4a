// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP transport to the forecasting service.

use reqwest::{StatusCode, Url};
use std::future::Future;
use std::time::Duration;
use stockcast::TransportError;
use tracing::{debug, info, warn};

use crate::error::ClientBuildError;
use crate::request::ForecastRequest;

/// Default forecasting service address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The service base URL; `/forecast` is appended.
    pub base_url: String,
    /// The whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Returns the forecast endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn forecast_url(&self) -> Result<Url, ClientBuildError> {
        let endpoint: String = format!("{}/forecast", self.base_url.trim_end_matches('/'));
        Url::parse(&endpoint).map_err(|e| ClientBuildError::InvalidEndpoint {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

/// A service that turns a forecast request into a raw response body.
pub trait ForecastBackend: Send + Sync {
    /// Sends a request and returns the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Status` for non-success responses,
    /// `TransportError::Timeout` when the timeout elapses, and
    /// `TransportError::NetworkUnavailable` for any other failure.
    fn generate(
        &self,
        request: ForecastRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// A `ForecastBackend` that posts multipart requests over HTTP.
#[derive(Debug, Clone)]
pub struct HttpForecastBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpForecastBackend {
    /// Creates a backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let endpoint: Url = config.forecast_url()?;
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        debug!(%endpoint, timeout_secs = config.timeout.as_secs(), "Forecast backend ready");

        Ok(Self { client, endpoint })
    }

    /// Returns the forecast endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Classifies a transport failure.
fn classify(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if let Some(status) = err.status() {
        TransportError::Status(status.as_u16())
    } else {
        TransportError::NetworkUnavailable(err.to_string())
    }
}

impl ForecastBackend for HttpForecastBackend {
    async fn generate(&self, request: ForecastRequest) -> Result<Vec<u8>, TransportError> {
        info!(
            endpoint = %self.endpoint,
            file = request.file_name(),
            bytes = request.bytes().len(),
            start_month = %request.start_month(),
            end_month = %request.end_month(),
            "Submitting forecast request"
        );

        let response: reqwest::Response = self
            .client
            .post(self.endpoint.clone())
            .multipart(request.into_multipart())
            .send()
            .await
            .map_err(|e| {
                let err: TransportError = classify(&e);
                warn!(error = %e, "Forecast request failed");
                err
            })?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Forecast service rejected the request");
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| classify(&e))?;
        debug!(bytes = body.len(), "Received forecast response");

        Ok(body.to_vec())
    }
}
