//! Axum integration.
//!
//! [`RenderedDocument`] converts into a `200 OK` carrying the PDF bytes
//! with inline disposition; [`PdfResponse`] runs the whole send pipeline
//! on conversion, mapping failures to JSON error bodies. Async handlers
//! that should not block the runtime use
//! [`into_response_blocking`](PdfResponse::into_response_blocking).

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::SendError;
use crate::response::{PdfResponse, RenderedDocument};

/// JSON body returned when a send fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Map a pipeline failure to its status code and body.
    ///
    /// Configuration and hook failures are the server's fault (`500`);
    /// backend failures surface as a bad upstream (`502`).
    pub fn from_send_error(error: &SendError) -> (StatusCode, Self) {
        let (status, code) = match error {
            SendError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PDF_CONFIGURATION_ERROR")
            }
            SendError::Backend(_) => (StatusCode::BAD_GATEWAY, "PDF_BACKEND_ERROR"),
            SendError::Hook(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PDF_HOOK_ERROR"),
        };
        (
            status,
            Self {
                code,
                message: error.to_string(),
            },
        )
    }
}

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        let headers = [
            (header::CONTENT_TYPE, self.content_type().to_string()),
            (header::CONTENT_DISPOSITION, self.content_disposition()),
        ];
        (headers, self.bytes).into_response()
    }
}

impl IntoResponse for PdfResponse {
    /// Runs the send pipeline inline and converts the outcome.
    ///
    /// This blocks the calling thread for the duration of the render;
    /// inside async handlers prefer
    /// [`into_response_blocking`](PdfResponse::into_response_blocking).
    fn into_response(self) -> Response {
        match self.send() {
            Ok(document) => document.into_response(),
            Err(error) => {
                tracing::error!(error = %error, "PDF send failed");
                let (status, body) = ErrorResponse::from_send_error(&error);
                (status, Json(body)).into_response()
            }
        }
    }
}

impl PdfResponse {
    /// Renders on tokio's blocking pool and resolves to the final response.
    ///
    /// The pipeline itself stays one synchronous call; only the handoff
    /// is async.
    pub async fn into_response_blocking(self) -> Response {
        match tokio::task::spawn_blocking(move || self.into_response()).await {
            Ok(response) => response,
            Err(join_error) => {
                tracing::error!(error = %join_error, "PDF render task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        code: "PDF_INTERNAL_ERROR",
                        message: "PDF render task failed".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
