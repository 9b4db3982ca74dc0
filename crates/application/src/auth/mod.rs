//! Credential subsystem core.
//!
//! This module provides:
//! - A shared token cache owning the check-then-fetch protocol
//! - JWKS resolution into RSA verification keys
//! - A per-environment facade consumed by the REST clients

mod facade;
mod key_resolver;
mod token_cache;

pub use facade::CredentialFacade;
pub use key_resolver::SigningKeyResolver;
pub use token_cache::{LockGranularity, TokenCache};
