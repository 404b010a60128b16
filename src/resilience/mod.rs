//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound request:
//!     → timeouts.rs (race against the per-route deadline)
//!     → on expiry the request future is dropped, releasing its connection
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: every outcome is classified once and reported

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineExceeded};
