//! Target URL construction.
//!
//! # Data Flow
//! ```text
//! /check    {url, port} → reconcile.rs → "scheme://host[:port]/path?query"
//! /get-icon url         → favicon.rs   → "scheme://host[:port]/favicon.ico"
//! ```
//!
//! # Design Decisions
//! - `url` crate decides whether input is a valid absolute URL
//! - The authority is rewritten on the raw input so host case, path and
//!   query reach the target exactly as the caller typed them
//! - Only http and https are relayed

pub mod favicon;
pub mod reconcile;

use thiserror::Error;

pub use favicon::derive_favicon_url;
pub use reconcile::reconcile_target_url;

/// Errors produced while turning caller input into a target URL.
#[derive(Debug, Error)]
pub enum TargetError {
    /// Input is not a parsable absolute URL.
    #[error("{0}")]
    Parse(#[from] url::ParseError),

    /// Scheme other than http or https.
    #[error("unsupported scheme {0:?}")]
    UnsupportedScheme(String),

    /// URL has no `//host` part.
    #[error("missing host")]
    MissingHost,
}

/// Schemes the relay is willing to contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Map a (lowercase) scheme name, rejecting everything but http(s).
    pub fn from_name(name: &str) -> Result<Self, TargetError> {
        match name {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(TargetError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// 80 for http, 443 for https.
    pub fn standard_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn is_standard_port(&self, port: u16) -> bool {
        self.standard_port() == port
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
