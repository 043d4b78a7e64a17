//! Blog API: an ordered HTTP route table with typed, validated parameters.

pub mod blog;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod params;
pub mod routing;

pub use config::ApiConfig;
pub use error::{BuildError, RouterError, Violation};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Route, Router};
