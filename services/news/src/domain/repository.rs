#![allow(async_fn_in_trait)]

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::types::{
    Article, ArticleView, Category, Comment, OtpCode, OtpPurpose, OutgoingEmail, Tag, User,
};
use crate::error::NewsServiceError;

/// Credential store.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, NewsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, NewsServiceError>;
    async fn count(&self) -> Result<u64, NewsServiceError>;

    /// Insert a user. A duplicate email yields [`NewsServiceError::EmailTaken`].
    async fn create(&self, user: &User) -> Result<(), NewsServiceError>;

    async fn mark_verified(&self, id: Uuid) -> Result<(), NewsServiceError>;
    async fn update_password(&self, id: Uuid, password_hash: &str)
    -> Result<(), NewsServiceError>;
}

/// Persistence for OTP rows. At most one row exists per (user, purpose); callers
/// look the row up and overwrite it rather than inserting a second one.
pub trait OtpRepository: Send + Sync {
    async fn find(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, NewsServiceError>;

    async fn insert(&self, otp: &OtpCode) -> Result<(), NewsServiceError>;

    /// Overwrite code, expiry and verified flag of an existing row.
    async fn update(&self, otp: &OtpCode) -> Result<(), NewsServiceError>;

    async fn mark_verified(&self, id: Uuid) -> Result<(), NewsServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), NewsServiceError>;
}

/// Articles and their tag associations.
///
/// The `*_with_tags` methods and [`reconcile_tags`](Self::reconcile_tags) run in a
/// single transaction each: missing tags are created conflict-tolerantly, the
/// article's association set becomes exactly the requested names, and any failure
/// rolls everything back. Returned tags follow first-seen order of `tag_names`.
pub trait ArticleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ArticleView>, NewsServiceError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ArticleView>, NewsServiceError>;

    /// Insert the article and link `tag_names`. A duplicate slug yields
    /// [`NewsServiceError::SlugTaken`].
    async fn create_with_tags(
        &self,
        article: &Article,
        tag_names: &[String],
    ) -> Result<Vec<Tag>, NewsServiceError>;

    /// Update the article row. `Some(names)` reconciles tags to exactly `names`;
    /// `None` leaves associations untouched. Returns the resulting tag set.
    async fn update_with_tags(
        &self,
        article: &Article,
        tag_names: Option<&[String]>,
    ) -> Result<Vec<Tag>, NewsServiceError>;

    /// Make the tag set of `article_id` equal to `tag_names`.
    /// Fails with [`NewsServiceError::ArticleNotFound`] if the article is gone.
    async fn reconcile_tags(
        &self,
        article_id: Uuid,
        tag_names: &[String],
    ) -> Result<Vec<Tag>, NewsServiceError>;

    /// Delete the article; comments and tag links cascade.
    async fn delete(&self, id: Uuid) -> Result<(), NewsServiceError>;
}

pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, NewsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, NewsServiceError>;

    /// Duplicate names yield [`NewsServiceError::TagAlreadyExists`].
    async fn create(&self, tag: &Tag) -> Result<(), NewsServiceError>;
    async fn update(&self, tag: &Tag) -> Result<(), NewsServiceError>;

    /// Returns `false` if no tag had that id.
    async fn delete(&self, id: Uuid) -> Result<bool, NewsServiceError>;
}

pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, NewsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, NewsServiceError>;
    async fn create(&self, category: &Category) -> Result<(), NewsServiceError>;
    async fn update(&self, category: &Category) -> Result<(), NewsServiceError>;

    /// Returns `false` if no category had that id.
    async fn delete(&self, id: Uuid) -> Result<bool, NewsServiceError>;
}

pub trait CommentRepository: Send + Sync {
    /// Oldest first.
    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, NewsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, NewsServiceError>;
    async fn create(&self, comment: &Comment) -> Result<(), NewsServiceError>;
    async fn update(&self, comment: &Comment) -> Result<(), NewsServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), NewsServiceError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, NewsServiceError>;
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, NewsServiceError>;
}

/// Source of OTP digits.
pub trait OtpGenerator: Send + Sync {
    fn generate(&self, len: usize) -> String;
}

/// Outbound email. Failures map to [`NewsServiceError::EmailDelivery`].
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, email: &OutgoingEmail) -> Result<(), NewsServiceError>;
}

/// Storage for uploaded thumbnail images.
pub trait ThumbnailStore: Send + Sync {
    /// Persist `bytes` under a fresh name keeping `extension`; returns the stored path.
    async fn save(&self, extension: &str, bytes: Bytes) -> Result<String, NewsServiceError>;

    /// Remove a previously stored file. A missing file is not an error.
    async fn remove(&self, path: &str) -> Result<(), NewsServiceError>;
}
