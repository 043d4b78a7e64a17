//! The service's route table.
//!
//! Every handler returns a synthetic JSON placeholder built from its bound
//! parameters; nothing is persisted.

pub mod items;
pub mod models;
pub mod posts;

pub use models::Blog;

use crate::error::BuildError;
use crate::routing::{Route, Router, RouterOptions};

/// All routes, in declaration order.
pub fn routes() -> Vec<Route> {
    let mut routes = posts::routes();
    routes.extend(items::routes());
    routes
}

/// Compile the full route table.
pub fn router(options: RouterOptions) -> Result<Router, BuildError> {
    Router::with_options(routes(), options)
}
