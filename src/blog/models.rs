//! Request body models.

use serde::{Deserialize, Serialize};

/// Blog post payload accepted by the create endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Blog {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}
