//! `bookingcal` - export ParentZone bookings to monthly iCalendar files
//!
//! # Usage
//!
//! ```bash
//! # Credentials from the environment or a .env file
//! BOOKINGCAL_USERNAME=me@example.com BOOKINGCAL_PASSWORD=... bookingcal --months 3
//!
//! # All-day style reminders at 07:00 instead of the booked window
//! bookingcal --mode reminder --reminder-time 07:00 --reminder-duration 30
//! ```
//!
//! Requires a WebDriver endpoint such as chromedriver (`--webdriver-url`,
//! default `http://localhost:9515`).

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use bookingcal_cli::{render_summary, Args, RunContext};
use bookingcal_domain::{BookingCalError, RunReport};
use bookingcal_infra::{config, init_tracing, LogFormat};
use clap::Parser;

/// Fatal before any browser session was requested.
const EXIT_CONFIG: u8 = 2;

#[allow(clippy::print_stdout, clippy::print_stderr)]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_tracing(LogFormat::from_json_flag(args.log_json)) {
        eprintln!("warning: {err}");
    }

    let started = Instant::now();
    match run(&args).await {
        Ok((report, output_dir)) => {
            println!("{}", render_summary(&report, Path::new(&output_dir), started.elapsed()));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            let is_config = matches!(err.downcast_ref::<BookingCalError>(), Some(BookingCalError::Config(_)));
            if is_config {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<(RunReport, String)> {
    config::load_dotenv();

    let mut config = config::load(args.config.clone()).context("failed to load configuration")?;
    args.apply(&mut config).context("invalid command-line option")?;
    config::validate(&config).context("invalid configuration")?;

    let context = RunContext::new(config).context("failed to set up the export pipeline")?;
    tracing::info!(
        months = context.config().scraper.month_budget,
        output_dir = %context.config().export.output_dir,
        mode = %context.config().export.shaping.mode,
        "run.started"
    );

    let report = context.execute().await.context("booking export failed")?;
    Ok((report, context.config().export.output_dir.clone()))
}
