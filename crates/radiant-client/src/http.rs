use crate::ports::{ApiRequest, ApiResponse, Method, Transport};
use radiant_core::error::{RadiantError, Result};
use std::time::Duration;

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose requests fail after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("radiant-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RadiantError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }
        if let Some(accept) = &request.accept {
            builder = builder.header(reqwest::header::ACCEPT, accept);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().map_err(|e| {
            RadiantError::Transport(format!(
                "{} {} failed: {}",
                request.method.as_str(),
                request.url,
                e
            ))
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| RadiantError::Transport(format!("Failed to read response body: {}", e)))?;

        tracing::debug!(method = request.method.as_str(), url = %request.url, status, "HTTP response");

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
