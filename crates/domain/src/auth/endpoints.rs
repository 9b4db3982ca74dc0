//! Token and key-discovery endpoints per provider kind

use url::Url;

use super::types::{ProviderConfig, ProviderKind};
use crate::error::{CredentialError, CredentialResult};

const AZURE_AD_TOKEN_URL: &str = "https://login.microsoftonline.com/{tenant}/oauth2/token";
const AZURE_AD_KEYS_URL: &str = "https://login.windows.net/common/discovery/Keys";
const AUTH0_TOKEN_URL: &str = "https://{tenant}/oauth/token";
const AUTH0_KEYS_URL: &str = "https://{tenant}/.well-known/jwks.json";

/// Where a provider issues tokens and publishes its signing keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    token_url: Url,
    keys_url: Url,
}

impl ProviderEndpoints {
    /// Builds endpoints from explicit URLs.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Config` if either URL does not parse.
    pub fn new(token_url: &str, keys_url: &str) -> CredentialResult<Self> {
        Ok(Self {
            token_url: parse(token_url)?,
            keys_url: parse(keys_url)?,
        })
    }

    /// Expands the built-in templates for a configuration.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Config` for `ProviderKind::Other`, an empty
    /// tenant, or a tenant that does not produce a valid URL.
    pub fn for_config(config: &ProviderConfig) -> CredentialResult<Self> {
        let (token_template, keys_template) = match config.kind() {
            ProviderKind::AzureAd => (AZURE_AD_TOKEN_URL, AZURE_AD_KEYS_URL),
            ProviderKind::Auth0 => (AUTH0_TOKEN_URL, AUTH0_KEYS_URL),
            ProviderKind::Other => {
                return Err(CredentialError::config(
                    "no endpoints are known for an unrecognized provider kind",
                ));
            }
        };

        let tenant = config.tenant_id().trim();
        if tenant.is_empty() {
            return Err(CredentialError::config(format!(
                "tenant id is required for the {} provider",
                config.kind()
            )));
        }

        Self::new(
            &token_template.replace("{tenant}", tenant),
            &keys_template.replace("{tenant}", tenant),
        )
    }

    /// The OAuth2 token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// The JWKS discovery endpoint.
    #[must_use]
    pub const fn keys_url(&self) -> &Url {
        &self.keys_url
    }
}

fn parse(raw: &str) -> CredentialResult<Url> {
    Url::parse(raw).map_err(|e| CredentialError::config(format!("invalid endpoint URL '{raw}': {e}")))
}
