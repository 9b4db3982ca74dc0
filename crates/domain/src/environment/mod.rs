//! Environment configuration consumed by the credential subsystem
//!
//! Records are produced by whatever loads the deployment's environment list;
//! field names follow the camelCase keys used in those documents.

use serde::{Deserialize, Serialize};

use crate::auth::{ProviderConfig, ProviderKind};

/// Settings for one logical WindAMS environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Environment name, e.g. `dev` or `prod`.
    pub name: String,
    /// Base URI of the REST service.
    #[serde(rename = "serviceURI", default)]
    pub service_uri: String,
    /// OAuth2 client id.
    #[serde(default)]
    pub client_id: String,
    /// OAuth2 client secret; absent for user-delegated environments.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// AAD tenant id or Auth0 domain.
    #[serde(default)]
    pub tenant_id: String,
    /// Resource identifier the service's tokens are issued for.
    #[serde(default)]
    pub service_app_id: String,
    /// Provider selector, e.g. `aad` or `auth0`.
    #[serde(default)]
    pub access_token_provider: String,
}

impl EnvironmentConfig {
    /// The provider kind named by `access_token_provider`.
    #[must_use]
    pub fn provider_kind(&self) -> ProviderKind {
        ProviderKind::from_name(&self.access_token_provider)
    }

    /// Builds the immutable provider configuration for this environment.
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(
            self.provider_kind(),
            self.client_id.clone(),
            self.tenant_id.clone(),
            self.client_secret.clone(),
        )
    }

    /// Service URI without trailing slashes.
    #[must_use]
    pub fn service_base(&self) -> &str {
        self.service_uri.trim_end_matches('/')
    }
}
