use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post, put},
};

use newsroom_core::error::AppError;
use newsroom_core::health::healthz;
use newsroom_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    article::{
        create_article, delete_article, get_article, list_articles, replace_article_tags,
        update_article,
    },
    auth::{
        get_profile, login, register, request_email_verification, request_password_reset,
        reset_password, verify_email, verify_password_reset_otp,
    },
    category::{create_category, delete_category, get_category, list_categories, update_category},
    comment::{create_comment, delete_comment, list_comments, update_comment},
    tag::{create_tag, delete_tag, get_tag, list_tags, update_tag},
};
use crate::state::AppState;

/// Upper bound for request bodies, sized for thumbnail uploads.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// `GET /readyz`: ready once the database answers.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(get_profile))
        .route("/email-verification/request", post(request_email_verification))
        .route("/email-verification/verify", post(verify_email))
        .route("/reset-password/request", post(request_password_reset))
        .route("/reset-password/verify", post(verify_password_reset_otp))
        .route("/reset-password", post(reset_password))
        // Articles
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{slug}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/articles/{slug}/tags", put(replace_article_tags))
        .route(
            "/articles/{slug}/comments",
            get(list_comments).post(create_comment),
        )
        // Comments
        .route("/comments/{id}", put(update_comment).delete(delete_comment))
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        // Tags
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/{id}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
