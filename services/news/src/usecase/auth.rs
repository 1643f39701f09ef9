use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use newsroom_auth_types::token::{SessionIssuer, SessionToken};

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::User;
use crate::error::NewsServiceError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub hasher: H,
}

impl<U, H> RegisterUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<User, NewsServiceError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(NewsServiceError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        // Unique index still guards the race between the lookup and the insert.
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub session: SessionToken,
}

pub struct LoginUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub hasher: H,
    pub session: Arc<SessionIssuer>,
}

impl<U, H> LoginUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Unknown email and wrong password both fail with
    /// [`NewsServiceError::InvalidCredentials`].
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, NewsServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(NewsServiceError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(&input.password, &user.password_hash)
            .await?
        {
            return Err(NewsServiceError::InvalidCredentials);
        }

        let session = self
            .session
            .mint(user.id)
            .map_err(|e| NewsServiceError::Internal(e.into()))?;

        tracing::debug!(user_id = %user.id, "session issued");
        Ok(LoginOutput { user, session })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    /// A token whose user no longer exists is treated as unauthenticated.
    pub async fn execute(&self, user_id: Uuid) -> Result<User, NewsServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(NewsServiceError::Unauthorized)
    }
}
