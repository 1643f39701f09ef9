use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Service-agnostic error variants shared by extractors and fallbacks.
///
/// Services define their own richer taxonomy; this one covers what shared
/// plumbing can reject on its own (missing session, unknown route).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Build the `{"kind", "message"}` JSON envelope every service responds with.
pub fn error_body(kind: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": kind,
        "message": message,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only 500s are logged here; TraceLayer already records status for 4xx.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = error_body(self.kind(), &self.to_string());
        (self.status(), axum::Json(body)).into_response()
    }
}
