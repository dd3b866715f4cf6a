//! Sign-in flow
//!
//! Fills the ParentZone login form and then opens the bookings page. The
//! password is sent to the browser and nowhere else; it is never logged.

use std::time::Duration;

use bookingcal_common::resilience::PollConfig;
use bookingcal_domain::{BookingCalError, CredentialsConfig, Result, ScraperConfig};
use tracing::{info, instrument, warn};

use super::protocol::{ElementRef, Locator};
use super::session::WebDriverSession;

const FORM_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct LoginFlow {
    login_url: String,
    bookings_url: String,
    form_wait: PollConfig,
    login_settle: Duration,
    bookings_settle: Duration,
}

impl LoginFlow {
    pub fn new(login_url: impl Into<String>, bookings_url: impl Into<String>, form_wait: PollConfig) -> Self {
        Self {
            login_url: login_url.into(),
            bookings_url: bookings_url.into(),
            form_wait,
            login_settle: Duration::ZERO,
            bookings_settle: Duration::ZERO,
        }
    }

    /// # Errors
    /// `Config` when the form wait bound is unusable.
    pub fn from_config(scraper: &ScraperConfig) -> Result<Self> {
        let form_wait = PollConfig::new(FORM_POLL_INTERVAL, Duration::from_secs(scraper.login_form_wait_secs))
            .map_err(|e| BookingCalError::Config(e.to_string()))?;

        Ok(Self::new(scraper.login_url.clone(), scraper.bookings_url.clone(), form_wait)
            .with_settle_delays(
                Duration::from_secs(scraper.login_settle_secs),
                Duration::from_secs(scraper.bookings_page_settle_secs),
            ))
    }

    /// Fixed pauses after submitting the form and after opening the bookings
    /// page.
    pub fn with_settle_delays(mut self, after_login: Duration, after_bookings: Duration) -> Self {
        self.login_settle = after_login;
        self.bookings_settle = after_bookings;
        self
    }

    /// Submit the login form.
    ///
    /// # Errors
    /// `Auth` if any form element is missing or a form command fails.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn sign_in(&self, session: &WebDriverSession, credentials: &CredentialsConfig) -> Result<()> {
        info!(url = %self.login_url, "login.started");
        session.navigate(&self.login_url).await.map_err(auth_error)?;

        let email = self.await_form(session).await?;
        session.clear(&email).await.map_err(auth_error)?;
        session.send_keys(&email, &credentials.username).await.map_err(auth_error)?;

        let password = required(session, &Locator::css(r#"[name="password"]"#), "password field").await?;
        session.clear(&password).await.map_err(auth_error)?;
        session.send_keys(&password, &credentials.password).await.map_err(auth_error)?;

        let submit = required(session, &Locator::xpath("//button[@type='submit']"), "submit button").await?;
        session.click(&submit).await.map_err(auth_error)?;

        tokio::time::sleep(self.login_settle).await;
        info!("login.submitted");
        Ok(())
    }

    /// Open the bookings calendar after signing in.
    ///
    /// # Errors
    /// `Navigation` if the browser rejects the page load.
    pub async fn open_bookings(&self, session: &WebDriverSession) -> Result<()> {
        session
            .navigate(&self.bookings_url)
            .await
            .map_err(|e| BookingCalError::Navigation(format!("could not open bookings page: {e}")))?;
        tokio::time::sleep(self.bookings_settle).await;
        info!(url = %self.bookings_url, "login.bookings_opened");
        Ok(())
    }

    async fn await_form(&self, session: &WebDriverSession) -> Result<ElementRef> {
        let locator = Locator::css(r#"[name="email"]"#);
        let mut poller = self.form_wait.start();
        loop {
            if let Some(field) = session.find_element(&locator).await.map_err(auth_error)? {
                return Ok(field);
            }
            if !poller.tick().await {
                break;
            }
        }

        warn!(attempts = poller.attempts(), "login.form_missing");
        Err(BookingCalError::Auth(format!(
            "login form did not appear: {}; check whether the email field name has changed",
            poller.timed_out()
        )))
    }
}

async fn required(session: &WebDriverSession, locator: &Locator, what: &str) -> Result<ElementRef> {
    session
        .find_element(locator)
        .await
        .map_err(auth_error)?
        .ok_or_else(|| BookingCalError::Auth(format!("{what} not found ({locator})")))
}

fn auth_error(err: BookingCalError) -> BookingCalError {
    match err {
        BookingCalError::Auth(_) => err,
        other => BookingCalError::Auth(format!("login failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::HttpClient;
    use crate::webdriver::protocol::{BrowserOptions, ELEMENT_KEY};

    fn ok(value: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "value": value }))
    }

    fn no_such_element() -> ResponseTemplate {
        ResponseTemplate::new(404).set_body_json(json!({
            "value": { "error": "no such element", "message": "Unable to locate element" }
        }))
    }

    fn credentials() -> CredentialsConfig {
        CredentialsConfig { username: "parent@example.com".into(), password: "hunter2".into() }
    }

    fn flow(server: &MockServer) -> LoginFlow {
        let wait = PollConfig::new(Duration::from_millis(20), Duration::from_millis(200)).expect("poll");
        LoginFlow::new(format!("{}/login", server.uri()), format!("{}/bookings", server.uri()), wait)
    }

    async fn session(server: &MockServer) -> WebDriverSession {
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ok(json!({ "sessionId": "s-1" })))
            .mount(server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/session/s-1"))
            .respond_with(ok(json!(null)))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/session/s-1/url"))
            .respond_with(ok(json!(null)))
            .mount(server)
            .await;

        WebDriverSession::start(HttpClient::new().expect("http"), &server.uri(), &BrowserOptions::default())
            .await
            .expect("session")
    }

    async fn element_for(server: &MockServer, locator: Locator, id: &str) {
        Mock::given(method("POST"))
            .and(path("/session/s-1/element"))
            .and(body_json(locator.to_json()))
            .respond_with(ok(json!({ ELEMENT_KEY: id })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn sign_in_fills_form_and_submits() {
        let server = MockServer::start().await;
        let session = session(&server).await;
        element_for(&server, Locator::css(r#"[name="email"]"#), "email").await;
        element_for(&server, Locator::css(r#"[name="password"]"#), "pw").await;
        element_for(&server, Locator::xpath("//button[@type='submit']"), "go").await;

        for id in ["email", "pw"] {
            Mock::given(method("POST"))
                .and(path(format!("/session/s-1/element/{id}/clear")))
                .respond_with(ok(json!(null)))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/session/s-1/element/email/value"))
            .and(body_json(json!({ "text": "parent@example.com" })))
            .respond_with(ok(json!(null)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/session/s-1/element/pw/value"))
            .and(body_json(json!({ "text": "hunter2" })))
            .respond_with(ok(json!(null)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/session/s-1/element/go/click"))
            .respond_with(ok(json!(null)))
            .expect(1)
            .mount(&server)
            .await;

        flow(&server).sign_in(&session, &credentials()).await.expect("sign in");
        flow(&server).open_bookings(&session).await.expect("bookings");
        session.close().await.ok();
    }

    #[tokio::test]
    async fn missing_form_is_an_auth_error() {
        let server = MockServer::start().await;
        let session = session(&server).await;
        Mock::given(method("POST"))
            .and(path("/session/s-1/element"))
            .respond_with(no_such_element())
            .mount(&server)
            .await;

        let err = flow(&server).sign_in(&session, &credentials()).await.expect_err("no form");
        assert!(matches!(err, BookingCalError::Auth(ref m) if m.contains("email field")));
        assert!(!err.to_string().contains("hunter2"));
        session.close().await.ok();
    }

    #[tokio::test]
    async fn missing_submit_button_is_an_auth_error() {
        let server = MockServer::start().await;
        let session = session(&server).await;
        element_for(&server, Locator::css(r#"[name="email"]"#), "email").await;
        element_for(&server, Locator::css(r#"[name="password"]"#), "pw").await;
        Mock::given(method("POST"))
            .and(path("/session/s-1/element"))
            .and(body_json(Locator::xpath("//button[@type='submit']").to_json()))
            .respond_with(no_such_element())
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(wiremock::matchers::path_regex(r"^/session/s-1/element/[a-z]+/(clear|value)$"))
            .respond_with(ok(json!(null)))
            .mount(&server)
            .await;

        let err = flow(&server).sign_in(&session, &credentials()).await.expect_err("no button");
        assert!(matches!(err, BookingCalError::Auth(ref m) if m.contains("submit button")));
        session.close().await.ok();
    }
}
