//! Session types shared across Newsroom services.
//!
//! Provides the HS256 session issuer/validator and the `BearerIdentity` extractor.

pub mod identity;
pub mod token;
