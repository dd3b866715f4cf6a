//! WebDriver session
//!
//! One browser session, acquired once per run. [`WebDriverSession::close`]
//! is idempotent so it can be called on every exit path; dropping an open
//! session logs a warning since `Drop` cannot run the async delete.

use std::sync::atomic::{AtomicBool, Ordering};

use bookingcal_domain::{BookingCalError, Result};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::protocol::{error_details, BrowserOptions, ElementRef, Locator};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// An open browser session on a WebDriver endpoint.
#[derive(Debug)]
pub struct WebDriverSession {
    http: HttpClient,
    base_url: String,
    session_id: String,
    closed: AtomicBool,
}

impl WebDriverSession {
    /// Create a browser session.
    ///
    /// # Errors
    /// `Browser` if the endpoint is unreachable or refuses the session.
    pub async fn start(http: HttpClient, endpoint: &str, options: &BrowserOptions) -> Result<Self> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        let response = http
            .send(http.request(Method::POST, format!("{base_url}/session")).json(&options.capabilities()))
            .await?;
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| BookingCalError::from(InfraError::from(e)))?;

        if !status.is_success() {
            let detail = error_details(&body)
                .map_or_else(|| format!("HTTP {status}"), |(error, message)| format!("{error}: {message}"));
            return Err(BookingCalError::Browser(format!("session not created: {detail}")));
        }

        let session_id = body["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| BookingCalError::Browser("session response missing sessionId".into()))?
            .to_string();

        info!(session_id = %session_id, headless = options.headless, "webdriver.session_created");
        Ok(Self { http, base_url, session_id, closed: AtomicBool::new(false) })
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Load `url` in the current window.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "webdriver.navigate");
        self.command(Method::POST, "url", Some(json!({ "url": url }))).await.map(drop)
    }

    /// First element matching `locator`, `None` if there is none.
    pub async fn find_element(&self, locator: &Locator) -> Result<Option<ElementRef>> {
        Self::optional(self.command(Method::POST, "element", Some(locator.to_json())).await)
    }

    pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        let value = self.command(Method::POST, "elements", Some(locator.to_json())).await?;
        Ok(Self::element_list(&value))
    }

    /// First descendant of `parent` matching `locator`.
    pub async fn find_child(&self, parent: &ElementRef, locator: &Locator) -> Result<Option<ElementRef>> {
        let path = format!("element/{}/element", parent.id());
        Self::optional(self.command(Method::POST, &path, Some(locator.to_json())).await)
    }

    pub async fn find_children(&self, parent: &ElementRef, locator: &Locator) -> Result<Vec<ElementRef>> {
        let path = format!("element/{}/elements", parent.id());
        let value = self.command(Method::POST, &path, Some(locator.to_json())).await?;
        Ok(Self::element_list(&value))
    }

    /// Rendered text of the element.
    pub async fn text(&self, element: &ElementRef) -> Result<String> {
        let value = self.command(Method::GET, &format!("element/{}/text", element.id()), None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn click(&self, element: &ElementRef) -> Result<()> {
        self.command(Method::POST, &format!("element/{}/click", element.id()), Some(json!({})))
            .await
            .map(drop)
    }

    pub async fn clear(&self, element: &ElementRef) -> Result<()> {
        self.command(Method::POST, &format!("element/{}/clear", element.id()), Some(json!({})))
            .await
            .map(drop)
    }

    /// Type `text` into the element. The text is never logged.
    pub async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.command(Method::POST, &format!("element/{}/value", element.id()), Some(json!({ "text": text })))
            .await
            .map(drop)
    }

    /// End the session. Later calls are no-ops.
    ///
    /// # Errors
    /// `Browser` if the endpoint rejects the delete; the session is still
    /// considered closed.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!(session_id = %self.session_id, "webdriver.close_skipped");
            return Ok(());
        }
        let url = format!("{}/session/{}", self.base_url, self.session_id);
        let response = self.http.send(self.http.request(Method::DELETE, url)).await?;
        if !response.status().is_success() {
            return Err(BookingCalError::Browser(format!(
                "session delete returned HTTP {}",
                response.status()
            )));
        }
        info!(session_id = %self.session_id, "webdriver.session_closed");
        Ok(())
    }

    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        if self.is_closed() {
            return Err(BookingCalError::Browser("session already closed".into()));
        }

        let url = format!("{}/session/{}/{path}", self.base_url, self.session_id);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();
        let mut payload: Value =
            response.json().await.map_err(|e| BookingCalError::from(InfraError::from(e)))?;

        if status.is_success() {
            return Ok(payload.get_mut("value").map(Value::take).unwrap_or(Value::Null));
        }

        Err(match error_details(&payload) {
            Some((error, message)) if error == "no such element" => {
                BookingCalError::NotFound(format!("{path}: {message}"))
            }
            Some((error, message)) => BookingCalError::Browser(format!("{path}: {error}: {message}")),
            None => BookingCalError::Browser(format!("{path}: HTTP {status}")),
        })
    }

    fn optional(result: Result<Value>) -> Result<Option<ElementRef>> {
        match result {
            Ok(value) => Ok(ElementRef::from_json(&value)),
            Err(BookingCalError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn element_list(value: &Value) -> Vec<ElementRef> {
        value.as_array().map(|items| items.iter().filter_map(ElementRef::from_json).collect()).unwrap_or_default()
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if !self.closed.load(Ordering::SeqCst) {
            warn!(session_id = %self.session_id, "webdriver.session_leaked");
        }
    }
}
