//! Auth0 token provider.

use async_trait::async_trait;
use serde::Serialize;
use windams_application::TokenProvider;
use windams_domain::{
    AccessToken, CredentialError, CredentialResult, ProviderConfig, ProviderEndpoints,
    ProviderKind,
};

use super::exchange::{default_http_client, exchange, fetch_document};

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
    audience: &'a str,
    grant_type: &'static str,
}

/// Client-credentials grant against an Auth0 tenant.
///
/// The tenant id is the tenant's domain, e.g. `example.auth0.com`. Requests
/// are JSON and name the target with `audience`.
#[derive(Debug, Clone)]
pub struct Auth0Provider {
    config: ProviderConfig,
    endpoints: ProviderEndpoints,
    http_client: reqwest::Client,
}

impl Auth0Provider {
    /// Create a provider for an Auth0 configuration.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Config` if the configuration is for another
    /// provider kind or its tenant does not produce valid endpoints.
    pub fn new(config: ProviderConfig) -> CredentialResult<Self> {
        if config.kind() != ProviderKind::Auth0 {
            return Err(CredentialError::config(format!(
                "expected an Auth0 configuration, got {}",
                config.kind()
            )));
        }
        let endpoints = ProviderEndpoints::for_config(&config)?;
        Ok(Self {
            config,
            endpoints,
            http_client: default_http_client(),
        })
    }

    /// Replace the token and key endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Use a caller-supplied HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// The endpoints in use.
    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    fn token_request<'a>(&'a self, audience: &'a str) -> TokenRequest<'a> {
        TokenRequest {
            client_id: self.config.client_id(),
            client_secret: self.config.client_secret(),
            audience,
            grant_type: "client_credentials",
        }
    }
}

#[async_trait]
impl TokenProvider for Auth0Provider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn query_access_token(&self, resource: &str) -> CredentialResult<AccessToken> {
        let request = self
            .http_client
            .post(self.endpoints.token_url().as_str())
            .json(&self.token_request(resource));

        exchange(request, ProviderKind::Auth0, resource).await
    }

    async fn fetch_well_known(&self) -> CredentialResult<Vec<u8>> {
        fetch_document(&self.http_client, self.endpoints.keys_url().as_str()).await
    }
}
