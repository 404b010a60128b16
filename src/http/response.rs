//! Response shapes and error-to-status mapping.
//!
//! # Responsibilities
//! - JSON status object returned by `/check`
//! - Map check input errors to 400/405 with `INVALID_REQUEST`
//! - Map icon failures to plain-text 400/404/405/408/502
//!
//! # Design Decisions
//! - Classified check outcomes (OK/ERROR/TIMEOUT) are always HTTP 200;
//!   only malformed input changes the HTTP status
//! - Icon errors have no JSON contract and map straight to status codes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::target::TargetError;
use crate::upstream::FetchError;

/// Classification carried in the `status` field of a check response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Ok,
    Error,
    Timeout,
    InvalidRequest,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Error => "ERROR",
            CheckStatus::Timeout => "TIMEOUT",
            CheckStatus::InvalidRequest => "INVALID_REQUEST",
        }
    }
}

/// Body of every `/check` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResponse {
    pub fn new(status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for CheckResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Malformed `/check` input.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Only POST method is allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing/invalid URL/Port")]
    MissingFields,

    #[error("Invalid URL format: {0}")]
    InvalidUrl(#[from] TargetError),
}

impl CheckError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let body = CheckResponse::new(CheckStatus::InvalidRequest, self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}

/// Failure of a `/get-icon` request.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("Only GET method is allowed")]
    MethodNotAllowed,

    #[error("Missing 'url' query parameter")]
    MissingUrl,

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] TargetError),

    #[error("Icon fetch timed out")]
    Timeout,

    #[error("Failed to fetch icon: {0}")]
    Upstream(FetchError),

    #[error("Favicon not found or invalid")]
    NotFound,
}

impl From<FetchError> for IconError {
    fn from(err: FetchError) -> Self {
        if err.is_timeout() {
            IconError::Timeout
        } else {
            IconError::Upstream(err)
        }
    }
}

impl IconError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IconError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            IconError::MissingUrl | IconError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            IconError::Timeout => StatusCode::REQUEST_TIMEOUT,
            IconError::Upstream(_) => StatusCode::BAD_GATEWAY,
            IconError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for IconError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
