//! HTTP response types.
//!
//! Matrix endpoints answer in plain text. Errors are the message followed
//! by a newline with status 400.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MatrixError;
use crate::transform::Operation;

impl IntoResponse for MatrixError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            [(header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
            error_body(&self),
        )
            .into_response()
    }
}

/// Body written for a rejected request.
pub fn error_body(err: &MatrixError) -> String {
    format!("{}\n", err)
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Operation name → "POST /path"
    pub endpoints: BTreeMap<String, String>,
}

impl HealthResponse {
    pub fn current() -> Self {
        let mut endpoints: BTreeMap<String, String> = Operation::ALL
            .into_iter()
            .map(|op| (op.name().to_string(), format!("POST {}", op.path())))
            .collect();
        endpoints.insert("logs".into(), "GET /logs (SSE)".into());

        Self {
            status: "ok".into(),
            service: "matrixcsv".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            endpoints,
        }
    }
}
