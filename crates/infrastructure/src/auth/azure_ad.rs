//! Azure Active Directory token provider.

use async_trait::async_trait;
use windams_application::TokenProvider;
use windams_domain::{
    AccessToken, CredentialError, CredentialResult, ProviderConfig, ProviderEndpoints,
    ProviderKind,
};

use super::exchange::{FORM_CONTENT_TYPE, default_http_client, exchange, fetch_document};

/// Client-credentials grant against the AAD v1 token endpoint.
///
/// Requests are form-encoded and name the target with `resource`. Signing
/// keys come from the common discovery endpoint shared by all tenants.
#[derive(Debug, Clone)]
pub struct AzureAdProvider {
    config: ProviderConfig,
    endpoints: ProviderEndpoints,
    http_client: reqwest::Client,
}

impl AzureAdProvider {
    /// Create a provider for an Azure AD configuration.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Config` if the configuration is for another
    /// provider kind or its tenant does not produce valid endpoints.
    pub fn new(config: ProviderConfig) -> CredentialResult<Self> {
        if config.kind() != ProviderKind::AzureAd {
            return Err(CredentialError::config(format!(
                "expected an Azure AD configuration, got {}",
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

    fn form_body(&self, resource: &str) -> CredentialResult<String> {
        let mut params = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id()),
        ];
        if let Some(secret) = self.config.client_secret() {
            params.push(("client_secret", secret));
        }
        params.push(("resource", resource));

        serde_urlencoded::to_string(&params)
            .map_err(|e| CredentialError::protocol(format!("failed to encode form: {e}")))
    }
}

#[async_trait]
impl TokenProvider for AzureAdProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn query_access_token(&self, resource: &str) -> CredentialResult<AccessToken> {
        let body = self.form_body(resource)?;
        let request = self
            .http_client
            .post(self.endpoints.token_url().as_str())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body);

        exchange(request, ProviderKind::AzureAd, resource).await
    }

    async fn fetch_well_known(&self) -> CredentialResult<Vec<u8>> {
        fetch_document(&self.http_client, self.endpoints.keys_url().as_str()).await
    }
}
