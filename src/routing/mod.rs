//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query, body)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (segment-by-segment path match, captures)
//!     → params::binder (typed, validated parameters)
//!     → Return: Dispatched response or RouterError
//!
//! Route Compilation (at startup):
//!     Route[] in declaration order
//!     → Parse path patterns, compile parameter regexes
//!     → Detect fully and partially shadowed routes
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order); static routes go before placeholders

pub mod matcher;
pub mod route;
pub mod router;

pub use matcher::PathPattern;
pub use route::{BodySpec, Handler, Route};
pub use router::{CompiledRoute, Dispatched, Matched, Router, RouterOptions, Shadowed};
