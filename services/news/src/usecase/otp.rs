use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{OtpGenerator, OtpRepository};
use crate::domain::types::{OtpCode, OtpPurpose};
use crate::error::NewsServiceError;

/// Uniform decimal digits from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDigits;

impl OtpGenerator for RandomDigits {
    fn generate(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}

/// Issues and confirms OTP codes, one row per (user, purpose).
pub struct OtpLedger<O, G>
where
    O: OtpRepository,
    G: OtpGenerator,
{
    pub otps: O,
    pub generator: G,
}

impl<O, G> OtpLedger<O, G>
where
    O: OtpRepository,
    G: OtpGenerator,
{
    /// Generate a fresh code and store it, overwriting any existing row for the
    /// same (user, purpose). The previous code stops confirming. Returns the
    /// plaintext code.
    pub async fn issue(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
        len: usize,
        ttl: Duration,
    ) -> Result<String, NewsServiceError> {
        let code = self.generator.generate(len);
        let expires_at = Utc::now() + ttl;

        match self.otps.find(user_id, purpose).await? {
            Some(mut existing) => {
                existing.otp = code.clone();
                existing.expires_at = expires_at;
                existing.is_verified = false;
                self.otps.update(&existing).await?;
            }
            None => {
                self.otps
                    .insert(&OtpCode {
                        id: Uuid::now_v7(),
                        user_id,
                        purpose,
                        otp: code.clone(),
                        expires_at,
                        is_verified: false,
                    })
                    .await?;
            }
        }

        tracing::debug!(%user_id, purpose = purpose.as_str(), "otp issued");
        Ok(code)
    }

    /// Check `candidate` against the stored code.
    ///
    /// - no row: [`NewsServiceError::OtpNotFound`]
    /// - reset row already confirmed: [`NewsServiceError::OtpAlreadyVerified`]
    /// - wrong code or past expiry: [`NewsServiceError::InvalidOrExpiredOtp`]
    ///
    /// A confirmed password-reset row is marked verified. Email-verification rows
    /// are left for the caller to delete.
    pub async fn confirm(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
        candidate: &str,
    ) -> Result<OtpCode, NewsServiceError> {
        let mut otp = self
            .otps
            .find(user_id, purpose)
            .await?
            .ok_or(NewsServiceError::OtpNotFound)?;

        if purpose == OtpPurpose::PasswordReset && otp.is_verified {
            return Err(NewsServiceError::OtpAlreadyVerified);
        }
        if !otp.accepts(candidate, Utc::now()) {
            return Err(NewsServiceError::InvalidOrExpiredOtp);
        }

        if purpose == OtpPurpose::PasswordReset {
            self.otps.mark_verified(otp.id).await?;
            otp.is_verified = true;
        }
        Ok(otp)
    }
}
