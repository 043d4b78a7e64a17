//! Parameter binding and validation.
//!
//! # Responsibilities
//! - Coerce raw path segments and query values into typed `ParamValue`s
//! - Apply constraints: length, then numeric bounds, then pattern, then allowed values
//! - Fill defaults for absent optional parameters
//!
//! # Design Decisions
//! - The first failing constraint is the one reported
//! - Float bounds are strict: `ge` is checked as `gt`, `le` as `lt`
//! - Patterns are compiled once, when the route table is built

use std::collections::BTreeMap;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{RouterError, Violation};
use crate::params::{ParamSource, ParamSpec, ParamType, ParamValue};

/// A `ParamSpec` with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledParam {
    spec: ParamSpec,
    regex: Option<Regex>,
}

impl CompiledParam {
    pub fn compile(spec: ParamSpec) -> Result<Self, regex::Error> {
        let regex = spec.constraints.pattern.as_deref().map(Regex::new).transpose()?;
        Ok(Self { spec, regex })
    }

    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    /// Bind the raw occurrences of this parameter (empty when absent).
    pub fn bind(&self, raw: &[&str]) -> Result<ParamValue, RouterError> {
        if raw.is_empty() {
            return match &self.spec.default {
                Some(default) if !self.spec.required => Ok(default.clone()),
                _ => Err(RouterError::MissingRequiredParameter {
                    param: self.spec.external_name().to_string(),
                    location: self.spec.source,
                }),
            };
        }

        if self.spec.deprecated {
            tracing::warn!(param = %self.spec.external_name(), "Deprecated parameter used");
        }

        let result = if self.spec.multiple {
            raw.iter()
                .map(|value| self.bind_one(value))
                .collect::<Result<Vec<_>, _>>()
                .map(ParamValue::List)
        } else {
            // Last occurrence wins for scalars.
            self.bind_one(raw[raw.len() - 1])
        };

        result.map_err(|violation| RouterError::Validation {
            param: self.spec.external_name().to_string(),
            location: self.spec.source,
            violation,
        })
    }

    fn bind_one(&self, raw: &str) -> Result<ParamValue, Violation> {
        let value = coerce(self.spec.ty, raw)?;
        self.check(&value)?;
        Ok(value)
    }

    fn check(&self, value: &ParamValue) -> Result<(), Violation> {
        let c = &self.spec.constraints;

        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if let Some(min) = c.min_length {
                if len < min {
                    return Err(Violation::TooShort { min });
                }
            }
            if let Some(max) = c.max_length {
                if len > max {
                    return Err(Violation::TooLong { max });
                }
            }
        }

        if let Some(v) = numeric(value) {
            check_bounds(v, self.spec.ty == ParamType::Float, c)?;
        }

        if let (Some(regex), Some(s)) = (&self.regex, value.as_str()) {
            if !regex.is_match(s) {
                return Err(Violation::PatternMismatch {
                    pattern: regex.as_str().to_string(),
                });
            }
        }

        if let Some(allowed) = &c.allowed {
            let text = value.to_string();
            if !allowed.iter().any(|a| *a == text) {
                return Err(Violation::NotAllowed {
                    allowed: allowed.clone(),
                });
            }
        }

        Ok(())
    }
}

fn numeric(value: &ParamValue) -> Option<f64> {
    match value {
        ParamValue::Int(_) | ParamValue::Float(_) => value.as_float(),
        _ => None,
    }
}

fn check_bounds(v: f64, strict: bool, c: &crate::params::Constraints) -> Result<(), Violation> {
    let b = &c.bounds;
    if let Some(bound) = b.gt {
        if v <= bound {
            return Err(Violation::GreaterThan { bound });
        }
    }
    if let Some(bound) = b.ge {
        if strict && v <= bound {
            return Err(Violation::GreaterThan { bound });
        }
        if v < bound {
            return Err(Violation::GreaterThanEqual { bound });
        }
    }
    if let Some(bound) = b.lt {
        if v >= bound {
            return Err(Violation::LessThan { bound });
        }
    }
    if let Some(bound) = b.le {
        if strict && v >= bound {
            return Err(Violation::LessThan { bound });
        }
        if v > bound {
            return Err(Violation::LessThanEqual { bound });
        }
    }
    Ok(())
}

/// Coerce a raw string into the declared scalar type.
pub fn coerce(ty: ParamType, raw: &str) -> Result<ParamValue, Violation> {
    match ty {
        ParamType::Str => Ok(ParamValue::Str(raw.to_string())),
        ParamType::Int => raw
            .trim()
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| Violation::IntParsing),
        ParamType::Float => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(ParamValue::Float(v)),
            _ => Err(Violation::FloatParsing),
        },
        ParamType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(ParamValue::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(ParamValue::Bool(false)),
            _ => Err(Violation::BoolParsing),
        },
    }
}

/// Decoded query string, keeping every occurrence in order.
#[derive(Debug, Clone, Default)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Bind every declared parameter of a route, in declaration order.
///
/// `captures` holds the decoded placeholder values of the matched path.
pub fn bind_all(
    params: &[CompiledParam],
    captures: &[(String, String)],
    query: &QueryPairs,
) -> Result<BTreeMap<String, ParamValue>, RouterError> {
    let mut values = BTreeMap::new();
    for param in params {
        let spec = param.spec();
        let raw: Vec<&str> = match spec.source {
            ParamSource::Path => captures
                .iter()
                .filter(|(name, _)| *name == spec.name)
                .map(|(_, value)| value.as_str())
                .collect(),
            ParamSource::Query => query.get_all(spec.external_name()),
        };
        let value = param.bind(&raw)?;
        values.insert(spec.name.clone(), value);
    }
    Ok(values)
}

/// Parameters and body bound for one matched route.
#[derive(Debug, Clone)]
pub struct Bound {
    route: String,
    values: BTreeMap<String, ParamValue>,
    body: Option<serde_json::Value>,
}

static NULL: ParamValue = ParamValue::Null;

impl Bound {
    pub fn new(
        route: impl Into<String>,
        values: BTreeMap<String, ParamValue>,
        body: Option<serde_json::Value>,
    ) -> Self {
        Self {
            route: route.into(),
            values,
            body,
        }
    }

    /// Name of the matched route.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Bound value by internal name; `Null` for names the route does not declare.
    pub fn get(&self, name: &str) -> &ParamValue {
        self.values.get(name).unwrap_or(&NULL)
    }

    pub fn values(&self) -> &BTreeMap<String, ParamValue> {
        &self.values
    }

    /// Deserialize the decoded request body.
    pub fn body<T: DeserializeOwned>(&self) -> Result<T, RouterError> {
        let value = self.body.clone().ok_or_else(|| RouterError::BodyDecode {
            message: "route declares no request body".to_string(),
        })?;
        serde_json::from_value(value).map_err(|e| RouterError::BodyDecode {
            message: e.to_string(),
        })
    }
}
