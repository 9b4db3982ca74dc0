//! Shared wire handling for client-credentials grants and key discovery.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;
use windams_domain::{AccessToken, CredentialError, CredentialResult, ProviderKind};

/// Content-Type for form-urlencoded data.
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Token endpoint success body.
///
/// Azure AD's v1 endpoint sends the time fields as numeric strings, Auth0
/// as numbers; both are accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default, deserialize_with = "flexible_seconds")]
    expires_in: Option<i64>,
    #[serde(default, deserialize_with = "flexible_seconds")]
    expires_on: Option<i64>,
    #[serde(default)]
    resource: Option<String>,
}

impl TokenResponse {
    /// Absolute expiry prefers `expires_on`, then `expires_in` from `now`.
    /// A response with neither is treated as already expired so it is
    /// never reused.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Protocol` when either time field does not
    /// fit a representable instant.
    pub(crate) fn into_access_token(
        self,
        requested: &str,
        now: DateTime<Utc>,
    ) -> CredentialResult<AccessToken> {
        let expires_at = match (self.expires_on, self.expires_in) {
            (Some(secs), _) => DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                CredentialError::protocol(format!("expires_on out of range: {secs}"))
            })?,
            (None, Some(secs)) => Duration::try_seconds(secs)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .ok_or_else(|| {
                    CredentialError::protocol(format!("expires_in out of range: {secs}"))
                })?,
            (None, None) => now,
        };

        Ok(AccessToken::new(
            self.access_token,
            self.token_type,
            expires_at,
            self.resource
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| requested.to_string()),
        ))
    }
}

/// Token endpoint error body.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_codes: Vec<i64>,
    #[serde(default)]
    trace_id: Option<String>,
    #[serde(default)]
    correlation_id: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Number(i64),
    Text(String),
}

fn flexible_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Seconds>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Seconds::Number(secs)) => Ok(Some(secs)),
        Some(Seconds::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A redirect-free client shared by all requests of one provider.
pub(crate) fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Send a prepared token request and interpret the response.
pub(crate) async fn exchange(
    request: reqwest::RequestBuilder,
    kind: ProviderKind,
    resource: &str,
) -> CredentialResult<AccessToken> {
    let response = request
        .send()
        .await
        .map_err(|e: reqwest::Error| CredentialError::transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e: reqwest::Error| CredentialError::transport(e.to_string()))?;

    if !status.is_success() {
        return Err(rejection(kind, resource, status.as_u16(), &body));
    }

    let token: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
        warn!(provider = %kind, resource, error = %e, "malformed token response");
        CredentialError::protocol(format!(
            "malformed token response for resource {resource}: {e}"
        ))
    })?;

    token
        .into_access_token(resource, Utc::now())
        .inspect_err(|e| warn!(provider = %kind, resource, error = %e, "unusable token expiry"))
}

/// Unauthenticated GET of a key-discovery document.
pub(crate) async fn fetch_document(
    client: &reqwest::Client,
    url: &str,
) -> CredentialResult<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e: reqwest::Error| CredentialError::transport(e.to_string()))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(CredentialError::Auth {
            code: "signing_keys_unavailable".to_string(),
            description: format!("unable to obtain signing keys, got response code {status}"),
            status: Some(status.as_u16()),
        });
    }

    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e: reqwest::Error| CredentialError::transport(e.to_string()))
}

fn rejection(kind: ProviderKind, resource: &str, status: u16, body: &[u8]) -> CredentialError {
    if let Ok(error) = serde_json::from_slice::<TokenErrorResponse>(body) {
        let description = error.error_description.unwrap_or_default();
        warn!(
            provider = %kind,
            resource,
            status,
            code = %error.error,
            error_codes = ?error.error_codes,
            trace_id = ?error.trace_id,
            correlation_id = ?error.correlation_id,
            "token request rejected: {description}"
        );
        return CredentialError::Auth {
            code: error.error,
            description,
            status: Some(status),
        };
    }

    let text = String::from_utf8_lossy(body).into_owned();
    warn!(provider = %kind, resource, status, "token request failed with unstructured body");
    CredentialError::Auth {
        code: "unexpected_response".to_string(),
        description: text,
        status: Some(status),
    }
}
