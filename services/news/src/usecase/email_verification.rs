use chrono::Duration;

use crate::domain::repository::{Mailer, OtpGenerator, OtpRepository, UserRepository};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpPurpose, OutgoingEmail};
use crate::error::NewsServiceError;
use crate::usecase::otp::OtpLedger;

// ── RequestEmailVerification ─────────────────────────────────────────────────

pub struct RequestEmailVerificationUseCase<U, O, G, M>
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

impl<U, O, G, M> RequestEmailVerificationUseCase<U, O, G, M>
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
        if user.is_verified {
            return Err(NewsServiceError::EmailAlreadyVerified);
        }

        let otp = self
            .ledger
            .issue(
                user.id,
                OtpPurpose::EmailVerification,
                OTP_LEN,
                Duration::seconds(OTP_TTL_SECS),
            )
            .await?;

        self.mailer
            .send(
                &user.email,
                &OutgoingEmail::Verification {
                    name: user.name,
                    otp,
                },
            )
            .await
    }
}

// ── ConfirmEmailVerification ─────────────────────────────────────────────────

pub struct ConfirmEmailVerificationInput {
    pub email: String,
    pub otp: String,
}

pub struct ConfirmEmailVerificationUseCase<U, O, G>
where
    U: UserRepository,
    O: OtpRepository,
    G: OtpGenerator,
{
    pub users: U,
    pub ledger: OtpLedger<O, G>,
}

impl<U, O, G> ConfirmEmailVerificationUseCase<U, O, G>
where
    U: UserRepository,
    O: OtpRepository,
    G: OtpGenerator,
{
    /// Flip the user to verified, then discard the OTP row.
    ///
    /// A failed delete after a successful flip is logged and swallowed: the user
    /// stays verified and the orphaned row can no longer be used.
    pub async fn execute(
        &self,
        input: ConfirmEmailVerificationInput,
    ) -> Result<(), NewsServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(NewsServiceError::UserNotFound)?;
        if user.is_verified {
            return Err(NewsServiceError::EmailAlreadyVerified);
        }

        let otp = self
            .ledger
            .confirm(user.id, OtpPurpose::EmailVerification, &input.otp)
            .await
            .map_err(|e| match e {
                NewsServiceError::OtpNotFound => NewsServiceError::InvalidOrExpiredOtp,
                other => other,
            })?;

        self.users.mark_verified(user.id).await?;
        if let Err(e) = self.ledger.otps.delete(otp.id).await {
            tracing::warn!(user_id = %user.id, error = ?e, "failed to delete confirmed otp");
        }

        tracing::info!(user_id = %user.id, "email verified");
        Ok(())
    }
}
