//! Credential error types

use thiserror::Error;

/// Errors raised while acquiring tokens or signing keys.
///
/// None of these are retried inside the credential subsystem; callers
/// decide whether to try again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No provider can be resolved, or a facade has none bound.
    #[error("configuration error: {message}")]
    Config {
        /// Error description.
        message: String,
    },

    /// The provider endpoint could not be reached.
    #[error("transport error: {message}")]
    Transport {
        /// Error description.
        message: String,
    },

    /// The provider rejected the request.
    #[error("authentication failed ({code}): {description}")]
    Auth {
        /// Provider error code, e.g. `invalid_client`.
        code: String,
        /// Provider error description.
        description: String,
        /// HTTP status returned by the provider, if any.
        status: Option<u16>,
    },

    /// A provider response did not have the expected shape.
    #[error("protocol error: {message}")]
    Protocol {
        /// Error description.
        message: String,
    },
}

impl CredentialError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns the provider error code for `Auth` errors.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Only transport failures can succeed when repeated unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Result type alias for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;
