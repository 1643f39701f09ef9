use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use newsroom_auth_types::identity::BearerIdentity;

use crate::error::NewsServiceError;
use crate::handlers::dto::{MessageResponse, UserResponse};
use crate::handlers::extract::ValidatedJson;
use crate::state::AppState;
use crate::usecase::auth::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::usecase::email_verification::{
    ConfirmEmailVerificationInput, ConfirmEmailVerificationUseCase,
    RequestEmailVerificationUseCase,
};
use crate::usecase::password_reset::{
    ConfirmPasswordResetOtpInput, ConfirmPasswordResetOtpUseCase, RequestPasswordResetUseCase,
    ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /register ───────────────────────────────────────────────────────────

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(
        length(min = 8),
        must_match(
            other = "password",
            message = "password_confirmation must match password"
        )
    )]
    pub password_confirmation: String,
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), NewsServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        hasher: state.hasher,
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds since epoch.
    pub expires_at: u64,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, NewsServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher,
        session: state.session.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: output.session.token,
        token_type: "Bearer",
        expires_at: output.session.expires_at,
        user: output.user.into(),
    }))
}

// ── GET /profile ─────────────────────────────────────────────────────────────

pub async fn get_profile(
    identity: BearerIdentity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, NewsServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── OTP requests ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct OtpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub otp: String,
}

// POST /email-verification/request
pub async fn request_email_verification(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<EmailRequest>,
) -> Result<Json<MessageResponse>, NewsServiceError> {
    let usecase = RequestEmailVerificationUseCase {
        users: state.user_repo(),
        ledger: state.otp_ledger(),
        mailer: state.mailer.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(Json(MessageResponse {
        message: "verification email sent",
    }))
}

// POST /email-verification/verify
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<OtpRequest>,
) -> Result<Json<MessageResponse>, NewsServiceError> {
    let usecase = ConfirmEmailVerificationUseCase {
        users: state.user_repo(),
        ledger: state.otp_ledger(),
    };
    usecase
        .execute(ConfirmEmailVerificationInput {
            email: body.email,
            otp: body.otp,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "email verified",
    }))
}

// POST /reset-password/request
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<EmailRequest>,
) -> Result<Json<MessageResponse>, NewsServiceError> {
    let usecase = RequestPasswordResetUseCase {
        users: state.user_repo(),
        ledger: state.otp_ledger(),
        mailer: state.mailer.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(Json(MessageResponse {
        message: "password reset email sent",
    }))
}

// POST /reset-password/verify
pub async fn verify_password_reset_otp(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<OtpRequest>,
) -> Result<Json<MessageResponse>, NewsServiceError> {
    let usecase = ConfirmPasswordResetOtpUseCase {
        users: state.user_repo(),
        ledger: state.otp_ledger(),
    };
    usecase
        .execute(ConfirmPasswordResetOtpInput {
            email: body.email,
            otp: body.otp,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "otp verified",
    }))
}

// ── POST /reset-password ─────────────────────────────────────────────────────

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub new_password: String,
    #[validate(
        length(min = 8),
        must_match(
            other = "new_password",
            message = "new_password_confirmation must match new_password"
        )
    )]
    pub new_password_confirmation: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, NewsServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        hasher: state.hasher,
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "password reset",
    }))
}
