//! WindAMS Application - Credential use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (identity provider, clock)
//! - Token caching and signing-key resolution
//! - The per-environment credential facade

pub mod auth;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{CredentialFacade, LockGranularity, SigningKeyResolver, TokenCache};
pub use ports::{Clock, TokenProvider};
