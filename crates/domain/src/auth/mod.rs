//! Credential domain types

mod endpoints;
mod signing_key;
mod types;

pub use endpoints::ProviderEndpoints;
pub use signing_key::{KeyType, RsaKeyMaterial, SigningKey, SigningKeySet};
pub use types::{AccessToken, ProviderConfig, ProviderKind};
