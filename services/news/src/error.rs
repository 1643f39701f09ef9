use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// News service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    #[error("validation failed")]
    Validation(ValidationErrors),
    #[error("invalid request: {0}")]
    InvalidForm(String),
    #[error("email is already verified")]
    EmailAlreadyVerified,
    #[error("otp is already verified")]
    OtpAlreadyVerified,
    #[error("otp is not verified")]
    OtpNotVerified,
    #[error("invalid file type, only images are allowed")]
    InvalidThumbnail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired otp code")]
    InvalidOrExpiredOtp,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("otp not found")]
    OtpNotFound,
    #[error("article not found")]
    ArticleNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("comment not found")]
    CommentNotFound,
    #[error("email is already registered")]
    EmailTaken,
    #[error("slug is already taken")]
    SlugTaken,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("failed to send email")]
    EmailDelivery(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl NewsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidForm(_) => "INVALID_FORM",
            Self::EmailAlreadyVerified => "EMAIL_ALREADY_VERIFIED",
            Self::OtpAlreadyVerified => "OTP_ALREADY_VERIFIED",
            Self::OtpNotVerified => "OTP_NOT_VERIFIED",
            Self::InvalidThumbnail => "INVALID_THUMBNAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOrExpiredOtp => "INVALID_OR_EXPIRED_OTP",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::ArticleNotFound => "ARTICLE_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::SlugTaken => "SLUG_TAKEN",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::EmailDelivery(_) => "EMAIL_DELIVERY",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidForm(_)
            | Self::EmailAlreadyVerified
            | Self::OtpAlreadyVerified
            | Self::OtpNotVerified
            | Self::InvalidThumbnail => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidOrExpiredOtp | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::OtpNotFound
            | Self::ArticleNotFound
            | Self::CategoryNotFound
            | Self::TagNotFound
            | Self::CommentNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::SlugTaken | Self::TagAlreadyExists => StatusCode::CONFLICT,
            Self::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NewsServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Only 500/502 are logged; TraceLayer already records status for everything.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::EmailDelivery(e) => {
                tracing::error!(error = ?e, kind = "EMAIL_DELIVERY", "email delivery failed")
            }
            _ => {}
        }
        let mut body = newsroom_core::error::error_body(self.kind(), &self.to_string());
        if let Self::Validation(ref errors) = self {
            body["fields"] = serde_json::json!(field_messages(errors));
        }
        (status, axum::Json(body)).into_response()
    }
}

/// Flatten validator output into `{field: [message, ...]}` with human-readable messages.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(list) = kind {
            let messages = list.iter().map(|e| describe(field, e)).collect();
            out.insert(field.to_string(), messages);
        }
    }
    out
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let param = |name: &str| error.params.get(name).and_then(|v| v.as_u64());
    match error.code.as_ref() {
        "length" => {
            let len = error
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .map(|s| s.chars().count() as u64);
            match (len, param("min"), param("max")) {
                (Some(0), Some(_), _) => format!("{field} is required"),
                (Some(len), Some(min), _) if len < min => {
                    format!("{field} must be at least {min} characters long")
                }
                (Some(len), _, Some(max)) if len > max => {
                    format!("{field} must be at most {max} characters long")
                }
                (None, Some(min), None) => format!("{field} must be at least {min} characters long"),
                (None, None, Some(max)) => format!("{field} must be at most {max} characters long"),
                (None, Some(min), Some(max)) => {
                    format!("{field} must be between {min} and {max} characters long")
                }
                _ => format!("{field} is invalid"),
            }
        }
        "email" => format!("{field} must be a valid email"),
        // The other field's value is never echoed; DTOs attach a message naming it.
        "must_match" => format!("{field} does not match"),
        _ => format!("{field} is invalid"),
    }
}
