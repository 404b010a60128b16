//! `GET /get-icon?url=…`: relay a site's `/favicon.ico`.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::http::response::IconError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::target::derive_favicon_url;
use crate::upstream::relay_stream;

/// Browsers may reuse a relayed icon for a day.
pub const ICON_CACHE_CONTROL: &str = "public, max-age=86400";

const ICON_CONTENT_TYPES: [&str; 2] = ["image/x-icon", "image/vnd.microsoft.icon"];

/// Whether an upstream content-type may be relayed as an icon.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || ICON_CONTENT_TYPES.contains(&content_type)
}

/// First `url` value of the query string.
fn url_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

pub async fn get_icon(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let response = match fetch_icon(&state, query.as_deref()).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };
    metrics::record_icon_fetch(response.status().as_u16(), start);
    response
}

async fn fetch_icon(state: &AppState, query: Option<&str>) -> Result<Response, IconError> {
    let base = query
        .and_then(url_param)
        .filter(|url| !url.is_empty())
        .ok_or(IconError::MissingUrl)?;
    let favicon = derive_favicon_url(&base).inspect_err(|e| {
        tracing::debug!(url = %base, error = %e, "Rejecting icon request: invalid URL");
    })?;

    tracing::info!(url = %favicon, "Fetching icon");

    let upstream = state.icon_client.get(&favicon).await.inspect_err(|e| {
        if e.is_timeout() {
            tracing::warn!(url = %favicon, "Icon fetch timed out");
        } else {
            tracing::warn!(url = %favicon, error = %e, "Icon fetch failed");
        }
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let image_type = content_type
        .filter(|value| value.to_str().map(is_image_content_type).unwrap_or(false))
        .filter(|_| status.is_success());

    // Dropping `upstream` on this path closes the unread body.
    let Some(content_type) = image_type else {
        tracing::warn!(
            url = %favicon,
            status = status.as_u16(),
            content_type = ?upstream.headers().get(header::CONTENT_TYPE),
            "No valid icon at target"
        );
        return Err(IconError::NotFound);
    };

    tracing::info!(url = %favicon, content_type = ?content_type, "Icon fetched");

    let body = Body::from_stream(relay_stream(upstream.bytes_stream(), favicon));
    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(ICON_CACHE_CONTROL),
    );
    Ok(response)
}

pub async fn method_not_allowed() -> IconError {
    IconError::MethodNotAllowed
}
