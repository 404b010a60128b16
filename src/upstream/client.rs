//! Outbound HTTP client with a fixed per-request deadline.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use thiserror::Error;

use crate::resilience::with_deadline;

/// User agent sent with check requests.
pub const CHECK_USER_AGENT: &str = concat!("endpoint-relay/", env!("CARGO_PKG_VERSION"));

/// User agent sent with favicon requests.
pub const ICON_USER_AGENT: &str = concat!(
    "endpoint-relay/",
    env!("CARGO_PKG_VERSION"),
    " (icon fetch)"
);

/// Why an outbound request produced no response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport timeout or the outer deadline fired.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, connect, TLS, redirect or protocol failure.
    #[error("{}", error_chain(.0))]
    Network(reqwest::Error),
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(deadline)
        } else {
            FetchError::Network(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}

/// `reqwest` errors keep the interesting part (refused, dns, tls) in sources.
fn error_chain(err: &reqwest::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// A `reqwest` client bound to one deadline and user agent.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    deadline: Duration,
}

impl UpstreamClient {
    pub fn new(deadline: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(deadline)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, deadline })
    }

    /// Issue a HEAD request. The response has no body to drain.
    pub async fn head(&self, url: &str) -> Result<Response, FetchError> {
        self.send(self.client.head(url)).await
    }

    /// Issue a GET request. The caller owns the body and must drop or
    /// consume it.
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.send(self.client.get(url)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        match with_deadline(self.deadline, request.send()).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(FetchError::from_reqwest(err, self.deadline)),
            Err(_) => Err(FetchError::Timeout(self.deadline)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        assert!(CHECK_USER_AGENT.starts_with("endpoint-relay/"));
        assert!(ICON_USER_AGENT.ends_with("(icon fetch)"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new(Duration::from_secs(2), CHECK_USER_AGENT).unwrap();
        let err = client.head(&format!("http://{}", addr)).await.unwrap_err();

        assert!(!err.is_timeout());
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_silent_upstream_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let deadline = Duration::from_millis(300);
        let client = UpstreamClient::new(deadline, CHECK_USER_AGENT).unwrap();
        let err = client.head(&format!("http://{}", addr)).await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout(d) if d == deadline));
    }
}
