//! Run context
//!
//! Owns the validated configuration and the wired pipeline. The browser
//! session is created inside [`RunContext::execute`] and closed exactly once
//! on every path out of it, including a panic in the pipeline.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use bookingcal_core::BookingExportService;
use bookingcal_domain::{BookingCalError, Config, Result, RunReport};
use bookingcal_infra::{
    BrowserOptions, FileExportSink, HttpClient, LoginFlow, ParentZonePage, WebDriverSession,
};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use tracing::{error, info, instrument, warn};

/// Upper bound for a single WebDriver command, page loads included.
const WEBDRIVER_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

pub struct RunContext {
    config: Config,
    login: LoginFlow,
    service: BookingExportService,
    started_at: DateTime<Utc>,
}

impl RunContext {
    /// Wire the pipeline. `config` must already be validated.
    ///
    /// # Errors
    /// `Config` when wait bounds or shaping settings are unusable.
    pub fn new(config: Config) -> Result<Self> {
        let started_at = Utc::now();
        let sink = Arc::new(FileExportSink::new(&config.export.output_dir));
        let service = BookingExportService::from_config(&config, sink, started_at)?;
        let login = LoginFlow::from_config(&config.scraper)?;
        Ok(Self { config, login, service, started_at })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run start time; also the `DTSTAMP` of every exported event.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Acquire the browser, sign in, export, release the browser.
    ///
    /// # Errors
    /// `Browser` if no session can be created, `Auth` or `Navigation` if the
    /// bookings page cannot be reached, `Internal` if the pipeline panicked.
    #[instrument(skip_all, fields(endpoint = %self.config.scraper.webdriver_url))]
    pub async fn execute(&self) -> Result<RunReport> {
        let http = HttpClient::builder().timeout(WEBDRIVER_COMMAND_TIMEOUT).build()?;
        let options = BrowserOptions::default().headless(self.config.scraper.headless);
        let session = Arc::new(
            WebDriverSession::start(http, &self.config.scraper.webdriver_url, &options).await?,
        );

        let outcome = AssertUnwindSafe(self.drive(Arc::clone(&session))).catch_unwind().await;

        if let Err(err) = session.close().await {
            warn!(error = %err, "run.session_close_failed");
        }

        match outcome {
            Ok(result) => result,
            Err(_) => {
                error!("run.pipeline_panicked");
                Err(BookingCalError::Internal("the export pipeline panicked".into()))
            }
        }
    }

    async fn drive(&self, session: Arc<WebDriverSession>) -> Result<RunReport> {
        self.login.sign_in(&session, &self.config.credentials).await?;
        self.login.open_bookings(&session).await?;

        let page = ParentZonePage::new(session);
        let report = self.service.run(&page).await;
        info!(
            months = report.months_visited.len(),
            events = report.events_written(),
            files = report.files.len(),
            "run.completed"
        );
        Ok(report)
    }
}
