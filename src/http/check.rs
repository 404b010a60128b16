//! `POST /check`: test an endpoint with a single HEAD request.

use std::time::Instant;

use axum::{body::Bytes, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::http::response::{CheckError, CheckResponse, CheckStatus};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::target::reconcile_target_url;
use crate::upstream::FetchError;

/// Body of a check request. Absent fields decode as empty/zero and are
/// rejected by [`CheckRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub port: i64,
}

impl CheckRequest {
    /// Return the port as `u16` if url and port are usable.
    pub fn validate(&self) -> Result<u16, CheckError> {
        if self.url.is_empty() {
            return Err(CheckError::MissingFields);
        }
        match u16::try_from(self.port) {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(CheckError::MissingFields),
        }
    }
}

/// Turn an outbound result into the status object sent to the caller.
pub fn classify(outcome: &Result<StatusCode, FetchError>) -> CheckResponse {
    match outcome {
        Err(FetchError::Timeout(_)) => {
            CheckResponse::new(CheckStatus::Timeout, "HEAD request timed out")
        }
        Err(err) => CheckResponse::new(CheckStatus::Error, format!("Network error: {}", err)),
        Ok(status) if status.is_success() => CheckResponse::new(
            CheckStatus::Ok,
            format!("Status code: {}", status.as_u16()),
        ),
        Ok(status) => CheckResponse::new(
            CheckStatus::Error,
            format!("Non-2xx status code: {}", status.as_u16()),
        ),
    }
}

pub async fn check(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<CheckResponse, CheckError> {
    let request: CheckRequest = serde_json::from_slice(&body).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejecting check: invalid JSON");
    })?;
    let port = request.validate()?;
    let target = reconcile_target_url(&request.url, port).inspect_err(|e| {
        tracing::debug!(url = %request.url, error = %e, "Rejecting check: invalid URL");
    })?;

    tracing::info!(url = %target, "Checking endpoint");
    let start = Instant::now();

    // The HEAD response carries no body; dropping it releases the connection.
    let outcome = state
        .check_client
        .head(&target)
        .await
        .map(|response| response.status());

    match &outcome {
        Ok(status) if status.is_success() => {
            tracing::info!(url = %target, status = status.as_u16(), "Check OK");
        }
        Ok(status) => {
            tracing::warn!(url = %target, status = status.as_u16(), "Check returned error status");
        }
        Err(FetchError::Timeout(deadline)) => {
            tracing::warn!(url = %target, deadline = ?deadline, "Check timed out");
        }
        Err(err) => {
            tracing::warn!(url = %target, error = %err, "Check failed");
        }
    }

    let response = classify(&outcome);
    metrics::record_check(response.status, start);
    Ok(response)
}

pub async fn method_not_allowed() -> CheckError {
    CheckError::MethodNotAllowed
}
