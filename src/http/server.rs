//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single dispatching fallback handler
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener and shut down gracefully
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::blog;
use crate::config::ApiConfig;
use crate::error::{BuildError, RouterError};
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::wait_for_shutdown;
use crate::observability::metrics;
use crate::routing::router::not_found;
use crate::routing::{Dispatched, Router as RouteTable, RouterOptions};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// HTTP server for the API.
pub struct HttpServer {
    app: Router,
}

impl HttpServer {
    /// Serve the built-in blog/items route table.
    pub fn new(config: ApiConfig) -> Result<Self, BuildError> {
        let routes = blog::router(RouterOptions {
            reject_shadowed: config.routing.reject_shadowed_routes,
        })?;
        Ok(Self::with_routes(config, routes))
    }

    /// Serve an arbitrary compiled route table.
    pub fn with_routes(config: ApiConfig, routes: RouteTable) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
        };
        Self {
            app: Self::build_app(&config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ApiConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(middleware)
    }

    /// The fully layered Axum app, for in-process use.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Run the server until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Dispatch every request through the route table.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let path = uri.path();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?uri.query(),
        "Dispatching request"
    );

    let (route, outcome) = dispatch_named(&state.routes, &method, &uri, &body);
    match outcome {
        Ok(hit) => {
            metrics::record_request(method.as_str(), 200, route, start);
            hit.into_response()
        }
        Err(err) => {
            match &err {
                RouterError::RouteNotFound { .. } => {
                    tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
                }
                RouterError::Validation { param, .. }
                | RouterError::MissingRequiredParameter { param, .. } => {
                    tracing::debug!(request_id = %request_id, route = %route, error = %err, "Parameter rejected");
                    metrics::record_validation_failure(param, err.kind());
                }
                RouterError::BodyDecode { .. } => {
                    tracing::debug!(request_id = %request_id, route = %route, error = %err, "Body rejected");
                    metrics::record_validation_failure("body", err.kind());
                }
            }
            metrics::record_request(method.as_str(), err.status().as_u16(), route, start);
            err.into_response()
        }
    }
}

/// Label used when no route matched.
const UNMATCHED_ROUTE: &str = "none";

/// Dispatch, keeping the matched route's name even when binding fails.
fn dispatch_named<'a>(
    routes: &'a RouteTable,
    method: &Method,
    uri: &Uri,
    body: &[u8],
) -> (&'a str, Result<Dispatched, RouterError>) {
    match routes.lookup(method, uri.path()) {
        Some(matched) => (matched.name(), matched.invoke(uri.query(), body)),
        None => (UNMATCHED_ROUTE, Err(not_found(method, uri.path()))),
    }
}
