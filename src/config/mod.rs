//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//!     → loader::override_bind_address (--bind), revalidated
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, override_bind_address, parse_config, ConfigError};
pub use schema::{
    ApiConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RoutingConfig, TimeoutConfig,
};
