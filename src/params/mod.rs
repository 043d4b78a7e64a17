//! Parameter binding subsystem.
//!
//! # Data Flow
//! ```text
//! matched route + path captures + query string
//!     → binder.rs (coerce raw strings, apply constraints, fill defaults)
//!     → Bound (name → ParamValue, decoded body)
//!     → handler
//! ```

pub mod binder;
pub mod spec;
pub mod value;

pub use binder::{Bound, CompiledParam, QueryPairs};
pub use spec::{Constraints, NumericBounds, ParamSource, ParamSpec, ParamType};
pub use value::ParamValue;
