//! Identity provider configuration and access token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The family of identity provider an environment authenticates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Azure Active Directory (v1 token endpoint).
    AzureAd,
    /// Auth0 tenant.
    Auth0,
    /// Anything not recognized. Has no endpoints.
    #[default]
    Other,
}

impl ProviderKind {
    /// Selects a kind from a configured provider name.
    ///
    /// Matching is a case-insensitive substring test: names containing
    /// `auth0` select Auth0, names containing `aad` select Azure AD, and
    /// everything else maps to `Other`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("auth0") {
            Self::Auth0
        } else if name.contains("aad") {
            Self::AzureAd
        } else {
            Self::Other
        }
    }

    /// Returns true for kinds that have a provider implementation.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AzureAd => "azure_ad",
            Self::Auth0 => "auth0",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable identity-provider configuration for one environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    kind: ProviderKind,
    client_id: String,
    tenant_id: String,
    client_secret: Option<String>,
}

impl ProviderConfig {
    /// Creates a provider configuration.
    ///
    /// An empty secret is treated the same as no secret, which marks the
    /// configuration as user-delegated.
    pub fn new(
        kind: ProviderKind,
        client_id: impl Into<String>,
        tenant_id: impl Into<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            kind,
            client_id: client_id.into(),
            tenant_id: tenant_id.into(),
            client_secret: client_secret.filter(|s| !s.is_empty()),
        }
    }

    /// The provider kind.
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// The OAuth2 client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The tenant: an AAD tenant id or an Auth0 domain.
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// The client secret, if this is a service-principal configuration.
    #[must_use]
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// True when a client secret is configured.
    #[must_use]
    pub const fn is_server_to_server(&self) -> bool {
        self.client_secret.is_some()
    }

    /// Logical complement of [`Self::is_server_to_server`].
    #[must_use]
    pub const fn is_user_authenticated(&self) -> bool {
        !self.is_server_to_server()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("client_id", &self.client_id)
            .field("tenant_id", &self.tenant_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// An access token issued for a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token string.
    pub token: String,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// When the token stops being usable.
    pub expires_at: DateTime<Utc>,
    /// The resource or audience the token was issued for.
    pub resource: String,
}

impl AccessToken {
    /// Creates a token.
    pub fn new(
        token: impl Into<String>,
        token_type: impl Into<String>,
        expires_at: DateTime<Utc>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
            expires_at,
            resource: resource.into(),
        }
    }

    /// Expired at the expiry instant itself, not one tick after.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whole seconds left before expiry; negative once expired.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }

    /// Returns the Authorization header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}
