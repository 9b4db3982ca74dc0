//! Identity provider adapters.
//!
//! This module provides the Azure AD and Auth0 implementations of the
//! `TokenProvider` port, the tagged `IdentityProvider` that selects between
//! them, and the wiring that turns an environment record into a
//! `CredentialFacade`.

mod auth0;
mod azure_ad;
mod decoding;
mod exchange;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use windams_application::{CredentialFacade, TokenCache, TokenProvider};
use windams_domain::{
    AccessToken, CredentialError, CredentialResult, EnvironmentConfig, ProviderConfig,
    ProviderEndpoints, ProviderKind,
};

pub use auth0::Auth0Provider;
pub use azure_ad::AzureAdProvider;
pub use decoding::decoding_key;

/// One of the supported identity providers.
#[derive(Debug, Clone)]
pub enum IdentityProvider {
    /// Azure Active Directory.
    AzureAd(AzureAdProvider),
    /// Auth0.
    Auth0(Auth0Provider),
}

impl IdentityProvider {
    /// Select and build the provider for a configuration.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Config` for `ProviderKind::Other` or when
    /// the endpoints cannot be derived from the tenant.
    pub fn from_config(config: ProviderConfig) -> CredentialResult<Self> {
        match config.kind() {
            ProviderKind::AzureAd => AzureAdProvider::new(config).map(Self::AzureAd),
            ProviderKind::Auth0 => Auth0Provider::new(config).map(Self::Auth0),
            ProviderKind::Other => Err(CredentialError::config(
                "unrecognized access token provider; expected a name containing 'aad' or 'auth0'",
            )),
        }
    }

    /// Replace the token and key endpoints.
    #[must_use]
    pub fn with_endpoints(self, endpoints: ProviderEndpoints) -> Self {
        match self {
            Self::AzureAd(p) => Self::AzureAd(p.with_endpoints(endpoints)),
            Self::Auth0(p) => Self::Auth0(p.with_endpoints(endpoints)),
        }
    }

    /// Use a caller-supplied HTTP client.
    #[must_use]
    pub fn with_http_client(self, http_client: reqwest::Client) -> Self {
        match self {
            Self::AzureAd(p) => Self::AzureAd(p.with_http_client(http_client)),
            Self::Auth0(p) => Self::Auth0(p.with_http_client(http_client)),
        }
    }

    /// The endpoints in use.
    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        match self {
            Self::AzureAd(p) => p.endpoints(),
            Self::Auth0(p) => p.endpoints(),
        }
    }
}

#[async_trait]
impl TokenProvider for IdentityProvider {
    fn config(&self) -> &ProviderConfig {
        match self {
            Self::AzureAd(p) => p.config(),
            Self::Auth0(p) => p.config(),
        }
    }

    async fn query_access_token(&self, resource: &str) -> CredentialResult<AccessToken> {
        match self {
            Self::AzureAd(p) => p.query_access_token(resource).await,
            Self::Auth0(p) => p.query_access_token(resource).await,
        }
    }

    async fn fetch_well_known(&self) -> CredentialResult<Vec<u8>> {
        match self {
            Self::AzureAd(p) => p.fetch_well_known().await,
            Self::Auth0(p) => p.fetch_well_known().await,
        }
    }
}

/// Build the facade for an environment, failing fast on a bad provider.
///
/// # Errors
///
/// Returns `CredentialError::Config` if no provider can be built.
pub fn try_credential_facade(
    environment: &EnvironmentConfig,
    cache: Arc<TokenCache>,
) -> CredentialResult<CredentialFacade> {
    let provider = IdentityProvider::from_config(environment.provider_config())?;
    Ok(CredentialFacade::new(
        environment.name.clone(),
        environment.service_app_id.clone(),
        Arc::new(provider),
        cache,
    ))
}

/// Build the facade for an environment.
///
/// An environment whose provider cannot be built still gets a facade: token
/// requests on it fail with `CredentialError::Config` and its signing-key set
/// is empty.
pub fn credential_facade(
    environment: &EnvironmentConfig,
    cache: Arc<TokenCache>,
) -> CredentialFacade {
    let config = environment.provider_config();
    match IdentityProvider::from_config(config.clone()) {
        Ok(provider) => CredentialFacade::new(
            environment.name.clone(),
            environment.service_app_id.clone(),
            Arc::new(provider),
            cache,
        ),
        Err(e) => {
            warn!(
                environment = %environment.name,
                provider = %environment.access_token_provider,
                error = %e,
                "no access token provider configured"
            );
            CredentialFacade::without_provider(
                environment.name.clone(),
                environment.service_app_id.clone(),
                config,
                cache,
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::adapters::SystemClock;

    fn environment(provider: &str, tenant: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            name: "dev".to_string(),
            service_uri: "https://windams.example.com".to_string(),
            client_id: "client".to_string(),
            client_secret: Some("secret".to_string()),
            tenant_id: tenant.to_string(),
            service_app_id: "api://windams".to_string(),
            access_token_provider: provider.to_string(),
        }
    }

    fn cache() -> Arc<TokenCache> {
        Arc::new(TokenCache::new(Arc::new(SystemClock::new())))
    }

    #[test]
    fn test_from_config_selects_variant() {
        let aad = IdentityProvider::from_config(environment("AAD", "t").provider_config()).unwrap();
        assert!(matches!(aad, IdentityProvider::AzureAd(_)));
        assert_eq!(aad.kind(), ProviderKind::AzureAd);

        let auth0 = IdentityProvider::from_config(
            environment("auth0", "example.auth0.com").provider_config(),
        )
        .unwrap();
        assert!(matches!(auth0, IdentityProvider::Auth0(_)));
    }

    #[test]
    fn test_from_config_rejects_unknown_kind() {
        let err = IdentityProvider::from_config(environment("okta", "t").provider_config())
            .unwrap_err();
        assert!(matches!(err, CredentialError::Config { .. }));
    }

    #[test]
    fn test_with_endpoints_overrides() {
        let endpoints =
            ProviderEndpoints::new("http://127.0.0.1:1/token", "http://127.0.0.1:1/keys").unwrap();
        let provider = IdentityProvider::from_config(environment("aad", "t").provider_config())
            .unwrap()
            .with_endpoints(endpoints.clone());
        assert_eq!(provider.endpoints(), &endpoints);
    }

    #[tokio::test]
    async fn test_lenient_facade_for_unknown_kind() {
        let facade = credential_facade(&environment("okta", "t"), cache());

        assert!(!facade.has_provider());
        assert!(facade.is_server_to_server());
        let err = facade.obtain_access_token().await.unwrap_err();
        assert!(matches!(err, CredentialError::Config { .. }));
        assert!(facade.obtain_signing_keys().await.unwrap().is_empty());
    }

    #[test]
    fn test_strict_facade_for_unknown_kind() {
        let result = try_credential_facade(&environment("", "t"), cache());
        assert!(matches!(result, Err(CredentialError::Config { .. })));

        let facade = try_credential_facade(&environment("aad", "t"), cache()).unwrap();
        assert_eq!(facade.environment(), "dev");
        assert_eq!(facade.service_resource(), "api://windams");
        assert_eq!(facade.provider_kind(), ProviderKind::AzureAd);
    }
}
