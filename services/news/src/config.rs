use std::path::PathBuf;

use anyhow::Context as _;

/// SMTP settings. Without `host` the mailer logs and drops emails.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Env var: `MAIL_HOST`.
    pub host: Option<String>,
    /// Env var: `MAIL_PORT` (default 587).
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. `News <no-reply@example.com>`. Env var: `MAIL_FROM`.
    pub from: String,
}

/// News service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3000). Env var: `NEWS_PORT`.
    pub news_port: u16,
    /// Directory for uploaded thumbnails. Env var: `UPLOAD_DIR`.
    pub upload_dir: PathBuf,
    /// bcrypt work factor. Env var: `BCRYPT_COST`.
    pub bcrypt_cost: u32,
    pub mail: MailConfig,
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match optional(name) {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} has an invalid value: {v}")),
        None => Ok(default),
    }
}

impl NewsConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mail = MailConfig {
            host: optional("MAIL_HOST"),
            port: parsed("MAIL_PORT", 587)?,
            username: optional("MAIL_USERNAME"),
            password: optional("MAIL_PASSWORD"),
            from: optional("MAIL_FROM").unwrap_or_else(|| "News <no-reply@localhost>".to_owned()),
        };
        if mail.host.is_some() && optional("MAIL_FROM").is_none() {
            anyhow::bail!("MAIL_FROM must be set when MAIL_HOST is configured");
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            news_port: parsed("NEWS_PORT", 3000)?,
            upload_dir: optional("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./public/uploads/thumbnails")),
            bcrypt_cost: parsed("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            mail,
        })
    }
}
