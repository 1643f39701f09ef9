//! Shared HTTP plumbing for Newsroom services.
//!
//! Error envelope, liveness check, request-id/trace layers, tracing init and
//! timestamp serialization.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
