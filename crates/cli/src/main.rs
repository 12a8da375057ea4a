// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod render;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use stockcast_api::{
    ApiError, ClientConfig, DEFAULT_BASE_URL, DashboardController, DashboardReport,
    HttpForecastBackend, ThemeMode, read_inventory_file,
};
use stockcast_domain::ForecastMonth;
use tracing::{error, info};

/// Stockcast - inventory forecast dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Inventory CSV file to forecast from
    #[arg(short, long)]
    file: PathBuf,

    /// First forecast month (YYYY-MM); must be after the current month
    #[arg(long)]
    start_month: ForecastMonth,

    /// Last forecast month (YYYY-MM); at most five months after the start
    #[arg(long)]
    end_month: ForecastMonth,

    /// Base URL of the forecasting service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Chart theme
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    theme: Theme,

    /// Print the dashboard as JSON
    #[arg(long)]
    json: bool,

    /// Month to treat as the current month (YYYY-MM); defaults to today (UTC)
    #[arg(long)]
    current_month: Option<ForecastMonth>,
}

/// Chart theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Theme {
    Light,
    Dark,
}

impl From<Theme> for ThemeMode {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
        }
    }
}

/// Drives one forecast from file selection to display.
async fn run(
    controller: &DashboardController<HttpForecastBackend>,
    args: &Args,
) -> Result<(), ApiError> {
    let file = read_inventory_file(&args.file).await?;

    if let Some(ticket) = controller.select_file(Some(file)).await? {
        controller.load_preview(ticket).await?;
    }
    controller.set_start_month(Some(args.start_month)).await?;
    controller.set_end_month(Some(args.end_month)).await?;
    controller.submit().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing; stdout is reserved for the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let current_month: ForecastMonth = args
        .current_month
        .unwrap_or_else(ForecastMonth::current_utc);
    let config: ClientConfig = ClientConfig {
        base_url: args.endpoint.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    };

    info!(
        endpoint = %config.base_url,
        current_month = %current_month,
        "Initializing Stockcast"
    );

    let backend: HttpForecastBackend = HttpForecastBackend::new(&config)?;
    let controller: DashboardController<HttpForecastBackend> =
        DashboardController::new(backend, current_month);

    let rejected: Option<ApiError> = run(&controller, &args).await.err();

    let state = controller.snapshot().await;
    let report: DashboardReport =
        DashboardReport::from_state(&state, current_month, args.theme.into());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report)?);
    }

    if let Some(err) = rejected {
        error!(error = %err, "Forecast was not generated");
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }
    if let Some(banner) = state.banner() {
        eprintln!("{banner}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
