//! sea-orm entities for the news service.

pub mod article_tags;
pub mod articles;
pub mod categories;
pub mod comments;
pub mod otp_codes;
pub mod tags;
pub mod users;
