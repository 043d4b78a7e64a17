//! Process lifecycle.
//!
//! # Design Decisions
//! - Shutdown is a broadcast so the server and tests share one mechanism
//! - In-flight requests finish before the server returns (axum graceful shutdown)

pub mod shutdown;

pub use shutdown::{wait_for_shutdown, Shutdown};
