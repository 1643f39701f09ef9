use axum::http::StatusCode;

/// `GET /healthz`: process is up. Readiness depends on each service's store and
/// lives with the service.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
