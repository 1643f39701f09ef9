use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Confirmed ownership of `email`. Set only by email OTP confirmation.
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workflow an OTP row belongs to. One row per (user, purpose).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    EmailVerification,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmailVerification => "email_verification",
            Self::PasswordReset => "password_reset",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email_verification" => Some(Self::EmailVerification),
            "password_reset" => Some(Self::PasswordReset),
            _ => None,
        }
    }
}

/// One-time numeric code bound to a user and a purpose.
#[derive(Debug, Clone)]
pub struct OtpCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub purpose: OtpPurpose,
    pub otp: String,
    pub expires_at: DateTime<Utc>,
    /// The code has been confirmed correct. Distinct from [`User::is_verified`].
    pub is_verified: bool,
}

impl OtpCode {
    /// Code matches and has not expired. Both failures are reported the same way.
    pub fn accepts(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        self.otp == candidate && now <= self.expires_at
    }
}

/// OTP length in digits.
pub const OTP_LEN: usize = 4;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 10 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Stored path of the thumbnail image.
    pub thumbnail: String,
    pub content: String,
    pub category_id: Uuid,
    pub author_id: Uuid,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public identity of an article's author.
#[derive(Debug, Clone)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

/// Article joined with its author, category and tags (tags sorted by name).
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub article: Article,
    pub author: Author,
    pub category: Category,
    pub tags: Vec<Tag>,
}

/// Thumbnail file extensions accepted on upload.
pub const THUMBNAIL_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Lower-cased extension of `file_name` if it is an accepted image type.
pub fn thumbnail_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    THUMBNAIL_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Transactional emails sent during OTP workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingEmail {
    Verification { name: String, otp: String },
    PasswordReset { name: String, otp: String },
}

impl OutgoingEmail {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Verification { .. } => "Verify your email",
            Self::PasswordReset { .. } => "Reset your password",
        }
    }
}

/// Longest tag name accepted, in characters. Matches the `tags.name` column.
pub const TAG_NAME_MAX_CHARS: usize = 50;

/// Most tag names one article write may carry.
pub const TAGS_PER_ARTICLE_MAX: usize = 50;

/// Deduplicate tag names preserving first-seen order. Surrounding whitespace is
/// trimmed and empty names are dropped.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref().trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_owned());
        }
    }
    out
}
