//! Security policy applied to inbound requests.
//!
//! # Design Decisions
//! - No authentication or rate limiting; the relay is a local helper
//! - Permissive CORS is the whole browser-facing policy

pub mod cors;

pub use cors::cors_layer;
