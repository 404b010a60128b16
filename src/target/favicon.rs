//! Favicon URL derivation.

use url::Url;

use super::{Scheme, TargetError};

const FAVICON_PATH: &str = "/favicon.ico";

/// Derive `scheme://host[:port]/favicon.ico` from a site URL.
///
/// Input without an explicit `http://` or `https://` prefix is treated as
/// https. Path, query, fragment and credentials of the input are discarded.
pub fn derive_favicon_url(base: &str) -> Result<String, TargetError> {
    let base = base.trim();
    let parsed = if base.starts_with("http://") || base.starts_with("https://") {
        Url::parse(base)?
    } else {
        Url::parse(&format!("https://{}", base))?
    };

    let scheme = Scheme::from_name(parsed.scheme())?;
    let host = parsed.host_str().ok_or(TargetError::MissingHost)?;

    let mut favicon = format!("{}://{}", scheme, host);
    if let Some(port) = parsed.port() {
        favicon.push(':');
        favicon.push_str(&port.to_string());
    }
    favicon.push_str(FAVICON_PATH);
    Ok(favicon)
}
