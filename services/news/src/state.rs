use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use newsroom_auth_types::token::SessionIssuer;

use crate::infra::db::{
    DbArticleRepository, DbCategoryRepository, DbCommentRepository, DbOtpRepository,
    DbTagRepository, DbUserRepository,
};
use crate::infra::mailer::SmtpMailer;
use crate::infra::password::BcryptHasher;
use crate::infra::storage::LocalThumbnailStore;
use crate::usecase::otp::{OtpLedger, RandomDigits};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session: Arc<SessionIssuer>,
    pub mailer: SmtpMailer,
    pub thumbnails: LocalThumbnailStore,
    pub hasher: BcryptHasher,
}

impl FromRef<AppState> for Arc<SessionIssuer> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.session)
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_ledger(&self) -> OtpLedger<DbOtpRepository, RandomDigits> {
        OtpLedger {
            otps: self.otp_repo(),
            generator: RandomDigits,
        }
    }

    pub fn article_repo(&self) -> DbArticleRepository {
        DbArticleRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }
}
