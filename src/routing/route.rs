//! Route declarations.

use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::RouterError;
use crate::params::{Bound, ParamSpec};

/// Response-producing callback invoked with the bound parameters.
pub type Handler = Arc<dyn Fn(&Bound) -> Result<Value, RouterError> + Send + Sync>;

/// Expected request body shape.
#[derive(Clone, Copy)]
pub struct BodySpec {
    pub type_name: &'static str,
    decode: fn(&[u8]) -> Result<Value, serde_json::Error>,
}

impl BodySpec {
    pub fn json<T: DeserializeOwned + Serialize>() -> Self {
        Self {
            type_name: std::any::type_name::<T>()
                .rsplit("::")
                .next()
                .unwrap_or("body"),
            decode: decode_json::<T>,
        }
    }

    /// Decode `bytes` against the declared shape.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, RouterError> {
        if bytes.is_empty() {
            return Err(RouterError::BodyDecode {
                message: format!("missing {} body", self.type_name),
            });
        }
        (self.decode)(bytes).map_err(|e| RouterError::BodyDecode {
            message: e.to_string(),
        })
    }
}

impl fmt::Debug for BodySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodySpec")
            .field("type_name", &self.type_name)
            .finish()
    }
}

fn decode_json<T: DeserializeOwned + Serialize>(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    let typed: T = serde_json::from_slice(bytes)?;
    serde_json::to_value(typed)
}

/// A declared mapping from method + path pattern to a handler.
#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: String,
    /// Route identifier for logging/metrics.
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub body: Option<BodySpec>,
    pub handler: Handler,
}

impl Route {
    pub fn new<F>(method: Method, pattern: &str, name: &str, handler: F) -> Self
    where
        F: Fn(&Bound) -> Result<Value, RouterError> + Send + Sync + 'static,
    {
        Self {
            method,
            pattern: pattern.to_string(),
            name: name.to_string(),
            params: Vec::new(),
            body: None,
            handler: Arc::new(handler),
        }
    }

    pub fn get<F>(pattern: &str, name: &str, handler: F) -> Self
    where
        F: Fn(&Bound) -> Result<Value, RouterError> + Send + Sync + 'static,
    {
        Self::new(Method::GET, pattern, name, handler)
    }

    pub fn post<F>(pattern: &str, name: &str, handler: F) -> Self
    where
        F: Fn(&Bound) -> Result<Value, RouterError> + Send + Sync + 'static,
    {
        Self::new(Method::POST, pattern, name, handler)
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Require a JSON body that decodes as `T`.
    pub fn json_body<T: DeserializeOwned + Serialize>(mut self) -> Self {
        self.body = Some(BodySpec::json::<T>());
        self
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish()
    }
}
