//! Parameter declarations.
//!
//! A `ParamSpec` is built with chained setters at route declaration time:
//!
//! ```
//! use blog_api::params::{ParamSpec, ParamType};
//!
//! let size = ParamSpec::query("size", ParamType::Float)
//!     .alias("item-size")
//!     .gt(0.0)
//!     .lt(10.5)
//!     .optional();
//! assert_eq!(size.external_name(), "item-size");
//! ```

use std::fmt;

use crate::params::ParamValue;

/// Where a parameter value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Path,
    Query,
}

impl ParamSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamSource::Path => "path",
            ParamSource::Query => "query",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar type a raw string is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Str => "str",
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Numeric comparison bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericBounds {
    pub gt: Option<f64>,
    pub ge: Option<f64>,
    pub lt: Option<f64>,
    pub le: Option<f64>,
}

/// Value constraints, checked in field order after type coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub bounds: NumericBounds,
    pub pattern: Option<String>,
    pub allowed: Option<Vec<String>>,
}

/// Declaration of a single path or query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub source: ParamSource,
    pub ty: ParamType,
    pub multiple: bool,
    pub required: bool,
    pub default: Option<ParamValue>,
    pub constraints: Constraints,
    pub alias: Option<String>,
    pub deprecated: bool,
    pub description: Option<String>,
}

impl ParamSpec {
    fn new(name: &str, source: ParamSource, ty: ParamType) -> Self {
        Self {
            name: name.to_string(),
            source,
            ty,
            multiple: false,
            required: true,
            default: None,
            constraints: Constraints::default(),
            alias: None,
            deprecated: false,
            description: None,
        }
    }

    /// A path parameter. Always required.
    pub fn path(name: &str, ty: ParamType) -> Self {
        Self::new(name, ParamSource::Path, ty)
    }

    /// A query parameter. Required until a default is given.
    pub fn query(name: &str, ty: ParamType) -> Self {
        Self::new(name, ParamSource::Query, ty)
    }

    /// Name the parameter is looked up by in the request.
    pub fn external_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Collect every occurrence of the query key into a list.
    pub fn list(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Use `value` when the parameter is absent.
    pub fn default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Bind `null` when the parameter is absent.
    pub fn optional(self) -> Self {
        self.default(ParamValue::Null)
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    pub fn gt(mut self, bound: f64) -> Self {
        self.constraints.bounds.gt = Some(bound);
        self
    }

    pub fn ge(mut self, bound: f64) -> Self {
        self.constraints.bounds.ge = Some(bound);
        self
    }

    pub fn lt(mut self, bound: f64) -> Self {
        self.constraints.bounds.lt = Some(bound);
        self
    }

    pub fn le(mut self, bound: f64) -> Self {
        self.constraints.bounds.le = Some(bound);
        self
    }

    /// Regex the value must contain a match for. Compiled when the router is built.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.constraints.pattern = Some(pattern.to_string());
        self
    }

    pub fn one_of(mut self, allowed: &[&str]) -> Self {
        self.constraints.allowed = Some(allowed.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Short human-readable summary, used by the route listing.
    pub fn summary(&self) -> String {
        let mut out = format!("{} {}: {}", self.source, self.external_name(), self.ty);
        if self.multiple {
            out.push_str("[]");
        }
        if let Some(default) = &self.default {
            out.push_str(&format!(" = {}", default));
        } else if self.required {
            out.push_str(" (required)");
        }
        let c = &self.constraints;
        if let Some(min) = c.min_length {
            out.push_str(&format!(" min_length={}", min));
        }
        if let Some(max) = c.max_length {
            out.push_str(&format!(" max_length={}", max));
        }
        for (op, bound) in [("gt", c.bounds.gt), ("ge", c.bounds.ge), ("lt", c.bounds.lt), ("le", c.bounds.le)] {
            if let Some(bound) = bound {
                out.push_str(&format!(" {}={}", op, bound));
            }
        }
        if let Some(pattern) = &c.pattern {
            out.push_str(&format!(" pattern={}", pattern));
        }
        if let Some(allowed) = &c.allowed {
            out.push_str(&format!(" one_of={}", allowed.join("|")));
        }
        if self.deprecated {
            out.push_str(" [deprecated]");
        }
        if let Some(description) = &self.description {
            out.push_str(&format!(" # {}", description));
        }
        out
    }
}
