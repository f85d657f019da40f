//! HTTP client used to fetch content documents.

use std::time::{Duration, Instant};

use reqwest::{Client, Response, StatusCode};

pub const USER_AGENT: &str = concat!("showcase/", env!("CARGO_PKG_VERSION"));

/// Resolve the user agent: the default unless one is configured.
pub fn resolve_user_agent(config: Option<&str>) -> String {
    config.unwrap_or(USER_AGENT).to_string()
}

/// Thin wrapper over `reqwest::Client` with request logging.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with the default user agent and no timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_user_agent(None, None)
    }

    /// Create a client; `timeout` of `None` leaves requests unbounded.
    pub fn with_user_agent(
        timeout: Option<Duration>,
        user_agent_config: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let mut builder = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Make a single GET request. Non-2xx responses are returned, not errors.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        tracing::debug!(
            "GET {} -> {} in {}ms",
            url,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        Ok(HttpResponse {
            status: response.status(),
            response,
        })
    }
}

/// HTTP response wrapper.
pub struct HttpResponse {
    pub status: StatusCode,
    response: Response,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub async fn bytes(self) -> Result<Vec<u8>, reqwest::Error> {
        self.response.bytes().await.map(|b| b.to_vec())
    }
}
