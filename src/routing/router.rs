//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Compile declared routes (parse patterns, compile parameter regexes)
//! - Detect routes that an earlier route fully or partially shadows
//! - Look up the first matching route for a request and bind its parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; first path match wins
//! - A path match that fails binding is terminal, never re-dispatched
//! - Explicit RouteNotFound rather than silent default

use axum::http::Method;
use serde_json::Value;

use crate::error::{BuildError, RouterError};
use crate::params::{binder, Bound, CompiledParam, ParamSource, QueryPairs};
use crate::routing::matcher::PathPattern;
use crate::routing::route::Route;

/// Build-time behavior of the router.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterOptions {
    /// Fail the build instead of warning when a route is shadowed.
    pub reject_shadowed: bool,
}

/// A route that an earlier route takes paths from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    pub route: String,
    pub by: String,
    /// Only some of the route's paths are taken; the rest still reach it.
    pub partial: bool,
}

#[derive(Debug)]
pub struct CompiledRoute {
    route: Route,
    pattern: PathPattern,
    params: Vec<CompiledParam>,
}

impl CompiledRoute {
    fn compile(route: Route) -> Result<Self, BuildError> {
        let label = route_label(&route);
        let pattern =
            PathPattern::parse(&route.pattern).map_err(|reason| BuildError::MalformedPattern {
                route: label.clone(),
                reason,
            })?;

        for name in pattern.placeholders() {
            let bound = route
                .params
                .iter()
                .any(|p| p.source == ParamSource::Path && p.name == name);
            if !bound {
                return Err(BuildError::UnboundPlaceholder {
                    route: label,
                    name: name.to_string(),
                });
            }
        }

        let mut params = Vec::with_capacity(route.params.len());
        for spec in &route.params {
            if spec.source == ParamSource::Path && !pattern.placeholders().any(|n| n == spec.name) {
                return Err(BuildError::OrphanPathParameter {
                    route: label,
                    name: spec.name.clone(),
                });
            }
            let compiled =
                CompiledParam::compile(spec.clone()).map_err(|error| BuildError::InvalidPattern {
                    route: label.clone(),
                    name: spec.name.clone(),
                    error,
                })?;
            params.push(compiled);
        }

        Ok(Self {
            route,
            pattern,
            params,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn params(&self) -> &[CompiledParam] {
        &self.params
    }
}

/// A route whose method and path matched, before any parameter is bound.
#[derive(Debug)]
pub struct Matched<'a> {
    route: &'a CompiledRoute,
    captures: Vec<(String, String)>,
}

impl<'a> Matched<'a> {
    pub fn route(&self) -> &'a CompiledRoute {
        self.route
    }

    /// Route name, for logs and metrics.
    pub fn name(&self) -> &'a str {
        let route: &'a CompiledRoute = self.route;
        &route.route.name
    }

    /// Bind query, path captures and body. Any failure here is final for the request.
    pub fn bind(&self, query: Option<&str>, body: &[u8]) -> Result<Bound, RouterError> {
        let query = QueryPairs::parse(query);
        let values = binder::bind_all(&self.route.params, &self.captures, &query)?;
        let body = self
            .route
            .route
            .body
            .map(|spec| spec.decode(body))
            .transpose()?;
        Ok(Bound::new(self.name().to_string(), values, body))
    }

    /// Bind, then invoke the handler.
    pub fn invoke(&self, query: Option<&str>, body: &[u8]) -> Result<Dispatched, RouterError> {
        let bound = self.bind(query, body)?;
        let value = (self.route.route.handler)(&bound)?;
        Ok(Dispatched {
            route: self.name().to_string(),
            body: value,
        })
    }
}

/// The result of a successful dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub route: String,
    pub body: Value,
}

/// Ordered, immutable route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
    shadowed: Vec<Shadowed>,
}

impl Router {
    /// Compile `routes` in declaration order. Shadowed routes are logged, not rejected.
    pub fn new(routes: Vec<Route>) -> Result<Self, BuildError> {
        Self::with_options(routes, RouterOptions::default())
    }

    pub fn with_options(routes: Vec<Route>, options: RouterOptions) -> Result<Self, BuildError> {
        let routes = routes
            .into_iter()
            .map(CompiledRoute::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let shadowed = find_shadowed(&routes);
        for s in &shadowed {
            if options.reject_shadowed {
                let (route, by) = (s.route.clone(), s.by.clone());
                return Err(if s.partial {
                    BuildError::PartiallyShadowed { route, by }
                } else {
                    BuildError::Shadowed { route, by }
                });
            }
            if s.partial {
                tracing::warn!(route = %s.route, shadowed_by = %s.by, "Route is partially shadowed");
            } else {
                tracing::warn!(route = %s.route, shadowed_by = %s.by, "Route is unreachable");
            }
        }

        tracing::debug!(routes = routes.len(), "Route table compiled");
        Ok(Self { routes, shadowed })
    }

    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn shadowed(&self) -> &[Shadowed] {
        &self.shadowed
    }

    /// First route, in declaration order, whose method and path pattern match.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<Matched<'_>> {
        self.routes
            .iter()
            .filter(|compiled| compiled.route.method == *method)
            .find_map(|compiled| {
                compiled
                    .pattern
                    .matches(path)
                    .map(|captures| Matched { route: compiled, captures })
            })
    }

    /// Select the first route matching method + path and bind the request to it.
    pub fn resolve(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<(&CompiledRoute, Bound), RouterError> {
        let matched = self.lookup(method, path).ok_or_else(|| not_found(method, path))?;
        let bound = matched.bind(query, body)?;
        Ok((matched.route(), bound))
    }

    /// Resolve and invoke the handler.
    pub fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<Dispatched, RouterError> {
        self.lookup(method, path)
            .ok_or_else(|| not_found(method, path))?
            .invoke(query, body)
    }
}

pub(crate) fn not_found(method: &Method, path: &str) -> RouterError {
    RouterError::RouteNotFound {
        method: method.to_string(),
        path: path.to_string(),
    }
}

fn route_label(route: &Route) -> String {
    format!("{} {}", route.method, route.pattern)
}

/// For each route, the first earlier route with the same method that takes some of its paths.
fn find_shadowed(routes: &[CompiledRoute]) -> Vec<Shadowed> {
    let mut shadowed = Vec::new();
    for (j, later) in routes.iter().enumerate() {
        let earlier = routes[..j].iter().find(|earlier| {
            earlier.route.method == later.route.method && earlier.pattern.preempts(&later.pattern)
        });
        if let Some(earlier) = earlier {
            shadowed.push(Shadowed {
                route: route_label(&later.route),
                by: route_label(&earlier.route),
                partial: !earlier.pattern.covers(&later.pattern),
            });
        }
    }
    shadowed
}
