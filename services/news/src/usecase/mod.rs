pub mod article;
pub mod auth;
pub mod category;
pub mod comment;
pub mod email_verification;
pub mod otp;
pub mod password_reset;
pub mod tag;
pub mod seed;
