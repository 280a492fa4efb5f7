//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, ApiError>`; every failure renders as
//! `{"detail": ...}` with the matching status code.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::gateway::GatewayError;

pub enum ApiError {
    /// Upstream, transport, or configuration failure from the gateway.
    Gateway(GatewayError),
    /// Malformed request rejected before any upstream call.
    Rejected { status: StatusCode, detail: String },
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self::Gateway(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        Self::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        Self::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Gateway(e) => {
                let status = StatusCode::from_u16(e.http_status())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                if status.is_server_error() {
                    tracing::error!(status = %status, error = %e, "Gateway error in API handler");
                } else {
                    tracing::debug!(status = %status, error = %e, "Upstream rejected request");
                }
                (status, e.detail())
            }
            Self::Rejected { status, detail } => (status, detail),
        };

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}
