//! Endpoint relay library.
//!
//! Lets browser dashboards check arbitrary HTTP(S) endpoints and fetch
//! their favicons without tripping over cross-origin restrictions.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod target;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
