//! Error types for route building and request dispatch.
//!
//! # Design Decisions
//! - `RouterError` is scoped to a single request and never fatal
//! - `BuildError` is raised once, while the route table is compiled
//! - Validation errors carry the external parameter name (alias if declared)

use std::fmt;

use thiserror::Error;

use crate::params::ParamSource;

/// Per-request dispatch failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    /// No declared route matches method + path.
    #[error("no route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// A parameter was supplied but failed a constraint.
    #[error("{location} parameter `{param}`: {violation}")]
    Validation {
        param: String,
        location: ParamSource,
        violation: Violation,
    },

    /// A required parameter was absent.
    #[error("{location} parameter `{param}` is required")]
    MissingRequiredParameter { param: String, location: ParamSource },

    /// The request body does not decode into the declared shape.
    #[error("invalid request body: {message}")]
    BodyDecode { message: String },
}

impl RouterError {
    /// Stable machine-readable error type, as reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::RouteNotFound { .. } => "not_found",
            RouterError::Validation { violation, .. } => violation.kind(),
            RouterError::MissingRequiredParameter { .. } => "missing",
            RouterError::BodyDecode { .. } => "json_invalid",
        }
    }
}

/// The constraint a parameter value violated.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    IntParsing,
    FloatParsing,
    BoolParsing,
    TooShort { min: usize },
    TooLong { max: usize },
    GreaterThan { bound: f64 },
    GreaterThanEqual { bound: f64 },
    LessThan { bound: f64 },
    LessThanEqual { bound: f64 },
    PatternMismatch { pattern: String },
    NotAllowed { allowed: Vec<String> },
}

impl Violation {
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::IntParsing => "int_parsing",
            Violation::FloatParsing => "float_parsing",
            Violation::BoolParsing => "bool_parsing",
            Violation::TooShort { .. } => "string_too_short",
            Violation::TooLong { .. } => "string_too_long",
            Violation::GreaterThan { .. } => "greater_than",
            Violation::GreaterThanEqual { .. } => "greater_than_equal",
            Violation::LessThan { .. } => "less_than",
            Violation::LessThanEqual { .. } => "less_than_equal",
            Violation::PatternMismatch { .. } => "string_pattern_mismatch",
            Violation::NotAllowed { .. } => "enum",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::IntParsing => write!(f, "Input should be a valid integer"),
            Violation::FloatParsing => write!(f, "Input should be a valid number"),
            Violation::BoolParsing => write!(f, "Input should be a valid boolean"),
            Violation::TooShort { min } => {
                write!(f, "String should have at least {} characters", min)
            }
            Violation::TooLong { max } => {
                write!(f, "String should have at most {} characters", max)
            }
            Violation::GreaterThan { bound } => write!(f, "Input should be greater than {}", bound),
            Violation::GreaterThanEqual { bound } => {
                write!(f, "Input should be greater than or equal to {}", bound)
            }
            Violation::LessThan { bound } => write!(f, "Input should be less than {}", bound),
            Violation::LessThanEqual { bound } => {
                write!(f, "Input should be less than or equal to {}", bound)
            }
            Violation::PatternMismatch { pattern } => {
                write!(f, "String should match pattern '{}'", pattern)
            }
            Violation::NotAllowed { allowed } => {
                write!(f, "Input should be one of: {}", allowed.join(", "))
            }
        }
    }
}

/// Route table compilation failure.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("route `{route}`: malformed path pattern: {reason}")]
    MalformedPattern { route: String, reason: String },

    #[error("route `{route}`: placeholder `{{{name}}}` has no path parameter")]
    UnboundPlaceholder { route: String, name: String },

    #[error("route `{route}`: path parameter `{name}` has no placeholder")]
    OrphanPathParameter { route: String, name: String },

    #[error("route `{route}`: parameter `{name}` has an invalid pattern: {error}")]
    InvalidPattern {
        route: String,
        name: String,
        #[source]
        error: regex::Error,
    },

    #[error("route `{route}` is unreachable: shadowed by earlier route `{by}`")]
    Shadowed { route: String, by: String },

    #[error("route `{route}` is partially shadowed: earlier route `{by}` takes some of its paths")]
    PartiallyShadowed { route: String, by: String },
}
