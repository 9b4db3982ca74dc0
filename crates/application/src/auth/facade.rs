//! Per-environment entry point to the credential subsystem.
//!
//! A facade binds one provider configuration, and the provider built from
//! it, to a named environment. REST clients use it to get the bearer token
//! for the environment's service and the keys that service signs with.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use windams_domain::{
    CredentialError, CredentialResult, ProviderConfig, ProviderKind, SigningKeySet,
};

use super::key_resolver::SigningKeyResolver;
use super::token_cache::TokenCache;
use crate::ports::TokenProvider;

/// Credential operations for one logical environment.
#[derive(Clone)]
pub struct CredentialFacade {
    environment: String,
    config: ProviderConfig,
    service_resource: String,
    provider: Option<Arc<dyn TokenProvider>>,
    cache: Arc<TokenCache>,
}

impl CredentialFacade {
    /// Bind a provider to an environment.
    ///
    /// The configuration is taken from the provider so the two cannot
    /// disagree.
    pub fn new(
        environment: impl Into<String>,
        service_resource: impl Into<String>,
        provider: Arc<dyn TokenProvider>,
        cache: Arc<TokenCache>,
    ) -> Self {
        Self {
            environment: environment.into(),
            config: provider.config().clone(),
            service_resource: service_resource.into(),
            provider: Some(provider),
            cache,
        }
    }

    /// A facade for an environment whose provider could not be resolved.
    ///
    /// Token requests fail with `CredentialError::Config`; signing-key
    /// requests return an empty set.
    pub fn without_provider(
        environment: impl Into<String>,
        service_resource: impl Into<String>,
        config: ProviderConfig,
        cache: Arc<TokenCache>,
    ) -> Self {
        Self {
            environment: environment.into(),
            config,
            service_resource: service_resource.into(),
            provider: None,
            cache,
        }
    }

    /// Bearer token for this environment's service resource.
    ///
    /// # Errors
    ///
    /// `CredentialError::Config` without touching the network if no provider
    /// is bound; otherwise whatever the cache or provider reports.
    pub async fn obtain_access_token(&self) -> CredentialResult<String> {
        self.obtain_access_token_for(&self.service_resource).await
    }

    /// Bearer token for an arbitrary resource through the shared cache.
    ///
    /// # Errors
    ///
    /// Same as [`Self::obtain_access_token`].
    pub async fn obtain_access_token_for(&self, resource: &str) -> CredentialResult<String> {
        let provider = self.require_provider()?;
        self.cache
            .obtain_access_token(provider.as_ref(), resource)
            .await
    }

    /// The provider's signing keys, by `kid`.
    ///
    /// # Errors
    ///
    /// Errors from fetching or parsing the key-discovery document. An
    /// environment without a provider yields an empty set, not an error.
    pub async fn obtain_signing_keys(&self) -> CredentialResult<SigningKeySet> {
        let Some(provider) = &self.provider else {
            debug!(environment = %self.environment, "no provider bound, returning empty key set");
            return Ok(SigningKeySet::new());
        };

        let raw = provider.fetch_well_known().await?;
        let keys = SigningKeyResolver::resolve(&raw)?;
        debug!(
            environment = %self.environment,
            count = keys.len(),
            "resolved signing keys"
        );
        Ok(keys)
    }

    /// True when the bound configuration carries a client secret.
    #[must_use]
    pub const fn is_server_to_server(&self) -> bool {
        self.config.is_server_to_server()
    }

    /// Always the negation of [`Self::is_server_to_server`].
    #[must_use]
    pub const fn is_user_authenticated(&self) -> bool {
        !self.is_server_to_server()
    }

    /// The environment name.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The resource string tokens are requested for by default.
    #[must_use]
    pub fn service_resource(&self) -> &str {
        &self.service_resource
    }

    /// The configured provider kind.
    #[must_use]
    pub const fn provider_kind(&self) -> ProviderKind {
        self.config.kind()
    }

    /// Whether a provider is bound.
    #[must_use]
    pub const fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    fn require_provider(&self) -> CredentialResult<&Arc<dyn TokenProvider>> {
        self.provider.as_ref().ok_or_else(|| {
            CredentialError::config(format!(
                "no access token provider available for environment '{}'",
                self.environment
            ))
        })
    }
}

impl fmt::Debug for CredentialFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialFacade")
            .field("environment", &self.environment)
            .field("config", &self.config)
            .field("service_resource", &self.service_resource)
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}
