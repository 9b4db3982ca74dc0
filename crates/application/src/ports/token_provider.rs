//! Token provider port
//!
//! Defines the capability set an identity provider must offer to the
//! credential subsystem.

use async_trait::async_trait;

use windams_domain::{AccessToken, CredentialResult, ProviderConfig, ProviderKind};

/// An identity provider able to issue client-credentials tokens and publish
/// its signing keys.
///
/// Implementations are immutable after construction and shared between
/// tasks, so they need no internal synchronization.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The configuration this provider was built from.
    fn config(&self) -> &ProviderConfig;

    /// Performs a client-credentials grant for `resource`.
    ///
    /// # Arguments
    /// * `resource` - The resource or audience the token is requested for
    ///
    /// # Errors
    /// - `CredentialError::Auth` when the provider rejects the request
    /// - `CredentialError::Transport` when the endpoint cannot be reached
    /// - `CredentialError::Protocol` when the success body cannot be decoded
    async fn query_access_token(&self, resource: &str) -> CredentialResult<AccessToken>;

    /// Downloads the provider's raw key-discovery (JWKS) document.
    ///
    /// # Errors
    /// - `CredentialError::Auth` on a non-200 status
    /// - `CredentialError::Transport` when the endpoint cannot be reached
    async fn fetch_well_known(&self) -> CredentialResult<Vec<u8>>;

    /// The provider kind.
    fn kind(&self) -> ProviderKind {
        self.config().kind()
    }

    /// True when the configuration carries a client secret.
    fn is_server_to_server(&self) -> bool {
        self.config().is_server_to_server()
    }
}
