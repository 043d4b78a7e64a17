//! Mapping dispatch results to HTTP responses.
//!
//! - Success: 200 with the handler's JSON value
//! - RouteNotFound: 404 `{"detail": "Not Found"}`
//! - Binding and body errors: 422 with a `detail` list of `{loc, msg, type}`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::RouterError;
use crate::routing::Dispatched;

impl IntoResponse for Dispatched {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.body)).into_response()
    }
}

impl RouterError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouterError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let body = match &self {
            RouterError::RouteNotFound { .. } => json!({ "detail": "Not Found" }),
            RouterError::Validation {
                param,
                location,
                violation,
            } => json!({
                "detail": [{
                    "loc": [location.as_str(), param],
                    "msg": violation.to_string(),
                    "type": kind,
                }]
            }),
            RouterError::MissingRequiredParameter { param, location } => json!({
                "detail": [{
                    "loc": [location.as_str(), param],
                    "msg": "Field required",
                    "type": kind,
                }]
            }),
            RouterError::BodyDecode { message } => json!({
                "detail": [{
                    "loc": ["body"],
                    "msg": message,
                    "type": kind,
                }]
            }),
        };
        (self.status(), Json(body)).into_response()
    }
}
