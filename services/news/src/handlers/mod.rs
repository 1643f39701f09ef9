pub mod article;
pub mod auth;
pub mod category;
pub mod comment;
pub mod dto;
pub mod extract;
pub mod tag;
