//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, CORS, timeout)
//!     → check.rs  (POST /check:    validate → reconcile → HEAD → classify)
//!     → icon.rs   (GET /get-icon:  validate → derive → GET → stream)
//!     → response.rs (status object, error → HTTP status mapping)
//!     → Send to client
//! ```

pub mod check;
pub mod icon;
pub mod response;
pub mod server;

pub use response::{CheckError, CheckResponse, CheckStatus, IconError};
pub use server::{AppState, HttpServer};
