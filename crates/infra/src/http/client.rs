use std::time::Duration;

use bookingcal_domain::BookingCalError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with a per-request timeout and connect-failure retries.
///
/// Only failures where the request never reached the server are retried,
/// so non-idempotent commands such as clicks are never sent twice.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// `Browser` if the underlying client cannot be constructed.
    pub fn new() -> Result<Self, BookingCalError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request, retrying connection failures with backoff.
    ///
    /// # Errors
    /// The converted transport error once attempts are exhausted.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, BookingCalError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            let request = builder
                .try_clone()
                .ok_or_else(|| BookingCalError::Internal("request body cannot be cloned".into()))?
                .build()
                .map_err(|err| BookingCalError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "http.request");

            match self.client.execute(request).await {
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "http.response");
                    return Ok(response);
                }
                Err(err) if err.is_connect() && attempt < attempts => {
                    debug!(attempt, %method, %url, error = %err, "http.connect_failed");
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                }
                Err(err) => return Err(InfraError::from(err).into()),
            }
        }

        Err(BookingCalError::Internal("http client exhausted retries without a result".into()))
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        let shift = u32::try_from(attempt.saturating_sub(1).min(8)).unwrap_or(8);
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// `Browser` if reqwest rejects the configuration.
    pub fn build(self) -> Result<HttpClient, BookingCalError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| BookingCalError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(5))
            .max_attempts(3)
            .build()
            .expect("http client")
    }

    #[tokio::test]
    async fn server_errors_are_returned_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client();
        let response =
            client.send(client.request(Method::POST, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn connection_refused_surfaces_after_retries() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };

        let client = client();
        let err = client
            .send(client.request(Method::GET, format!("http://127.0.0.1:{port}/status")))
            .await
            .expect_err("connection should fail");

        assert!(matches!(err, BookingCalError::Browser(_)));
    }
}
