//! WindAMS Domain - Credential types
//!
//! This crate defines provider configuration, tokens, signing keys and the
//! error taxonomy shared by the credential subsystem.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod environment;
pub mod error;

pub use auth::{
    AccessToken, KeyType, ProviderConfig, ProviderEndpoints, ProviderKind, RsaKeyMaterial,
    SigningKey, SigningKeySet,
};
pub use environment::EnvironmentConfig;
pub use error::{CredentialError, CredentialResult};
