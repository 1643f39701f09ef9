use chrono::Duration;

use crate::domain::repository::{
    Mailer, OtpGenerator, OtpRepository, PasswordHasher, UserRepository,
};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpPurpose, OutgoingEmail};
use crate::error::NewsServiceError;
use crate::usecase::otp::OtpLedger;

// ── RequestPasswordReset ─────────────────────────────────────────────────────

pub struct RequestPasswordResetUseCase<U, O, G, M>
where
    U: UserRepository,
    O: OtpRepository,
    G: OtpGenerator,
    M: Mailer,
{
    pub users: U,
    pub ledger: OtpLedger<O, G>,
    pub mailer: M,
}

impl<U, O, G, M> RequestPasswordResetUseCase<U, O, G, M>
where
    U: UserRepository,
    O: OtpRepository,
    G: OtpGenerator,
    M: Mailer,
{
    pub async fn execute(&self, email: &str) -> Result<(), NewsServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(NewsServiceError::UserNotFound)?;

        let otp = self
            .ledger
            .issue(
                user.id,
                OtpPurpose::PasswordReset,
                OTP_LEN,
                Duration::seconds(OTP_TTL_SECS),
            )
            .await?;

        self.mailer
            .send(
                &user.email,
                &OutgoingEmail::PasswordReset {
                    name: user.name,
                    otp,
                },
            )
            .await
    }
}

// ── ConfirmPasswordResetOtp ──────────────────────────────────────────────────

pub struct ConfirmPasswordResetOtpInput {
    pub email: String,
    pub otp: String,
}

pub struct ConfirmPasswordResetOtpUseCase<U, O, G>
where
    U: UserRepository,
    O: OtpRepository,
    G: OtpGenerator,
{
    pub users: U,
    pub ledger: OtpLedger<O, G>,
}

impl<U, O, G> ConfirmPasswordResetOtpUseCase<U, O, G>
where
    U: UserRepository,
    O: OtpRepository,
    G: OtpGenerator,
{
    pub async fn execute(
        &self,
        input: ConfirmPasswordResetOtpInput,
    ) -> Result<(), NewsServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(NewsServiceError::UserNotFound)?;

        self.ledger
            .confirm(user.id, OtpPurpose::PasswordReset, &input.otp)
            .await?;

        tracing::debug!(user_id = %user.id, "password reset otp confirmed");
        Ok(())
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U, O, H>
where
    U: UserRepository,
    O: OtpRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub otps: O,
    pub hasher: H,
}

impl<U, O, H> ResetPasswordUseCase<U, O, H>
where
    U: UserRepository,
    O: OtpRepository,
    H: PasswordHasher,
{
    /// Requires a confirmed reset OTP. The OTP row is deleted once the new hash
    /// is stored, so one confirmation allows exactly one reset.
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), NewsServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(NewsServiceError::UserNotFound)?;

        let otp = self
            .otps
            .find(user.id, OtpPurpose::PasswordReset)
            .await?
            .ok_or(NewsServiceError::OtpNotFound)?;
        if !otp.is_verified {
            return Err(NewsServiceError::OtpNotVerified);
        }

        let password_hash = self.hasher.hash(&input.new_password).await?;
        self.users.update_password(user.id, &password_hash).await?;
        self.otps.delete(otp.id).await?;

        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }
}
