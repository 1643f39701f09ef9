//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use uuid::Uuid;

use newsroom_core::error::AppError;

use crate::token::SessionIssuer;

/// Identity proven by a valid `Authorization: Bearer <token>` header.
///
/// Extraction fails with 401 before the handler runs if the header is missing,
/// uses another scheme, or carries a token that does not validate.
/// Ownership checks (403) are done by use cases after extraction.
#[derive(Debug, Clone, Copy)]
pub struct BearerIdentity {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    Arc<SessionIssuer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Read everything synchronously so the returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let issuer = Arc::<SessionIssuer>::from_ref(state);
        let token = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_owned());

        async move {
            let token = token.ok_or(AppError::Unauthorized)?;
            let user_id = issuer.validate(&token).map_err(|e| {
                tracing::debug!(error = %e, "rejected bearer token");
                AppError::Unauthorized
            })?;
            Ok(Self { user_id })
        }
    }
}
