//! Outbound side of the relay.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (reqwest + deadline → Response | FetchError)
//!     → stream.rs (icon only: chunked passthrough of the body)
//! ```

pub mod client;
pub mod stream;

pub use client::{FetchError, UpstreamClient, CHECK_USER_AGENT, ICON_USER_AGENT};
pub use stream::{relay_stream, TransferIncomplete};
