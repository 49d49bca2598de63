//! Gateway-level error taxonomy.
//!
//! Module-level errors ([`OAuthError`](crate::oauth::OAuthError),
//! [`MarketError`](crate::market::MarketError),
//! [`SessionError`](crate::session::SessionError)) convert into this
//! top-level taxonomy, which is what every gateway operation returns.
//! The variants distinguish "fix configuration" from "retry the handshake"
//! from "retry the call"; nothing is retried internally.

use thiserror::Error;

use crate::config::ConfigError;
use crate::market::MarketError;
use crate::oauth::OAuthError;
use crate::session::SessionError;

/// Errors surfaced by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credentials missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The provider rejected an OAuth handshake step.
    #[error("authentication provider error: {detail}")]
    AuthProvider {
        /// What the provider reported.
        detail: String,
    },

    /// `authenticate` was called with no pending request token.
    #[error("no pending handshake; call get_auth_url first")]
    NoPendingHandshake,

    /// A data operation was called before the handshake completed.
    #[error("not authenticated; complete the OAuth handshake first")]
    NotAuthenticated,

    /// The provider returned a non-success HTTP status on a data call.
    ///
    /// Daily access-token expiry is not special-cased; an expired token
    /// surfaces here as a 401-class status and the caller re-runs the
    /// handshake.
    #[error("provider returned HTTP {status}: {body}")]
    ProviderHttp {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A provider call exceeded the configured timeout.
    #[error("provider request timed out")]
    ProviderTimeout,

    /// Transport-level failure before any HTTP status was received.
    #[error("network error: {detail}")]
    Network {
        /// Underlying transport error.
        detail: String,
    },

    /// The provider returned a success status with an unparsable body.
    #[error("invalid provider response: {detail}")]
    InvalidResponse {
        /// What failed to parse.
        detail: String,
    },
}

impl From<SessionError> for GatewayError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoPendingHandshake => Self::NoPendingHandshake,
            SessionError::NotAuthenticated => Self::NotAuthenticated,
        }
    }
}

impl From<OAuthError> for GatewayError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::Timeout => Self::ProviderTimeout,
            OAuthError::Rejected { .. } | OAuthError::MalformedResponse(_) | OAuthError::Network(_) => {
                Self::AuthProvider {
                    detail: err.to_string(),
                }
            }
        }
    }
}

impl From<MarketError> for GatewayError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::Http { status, body } => Self::ProviderHttp { status, body },
            MarketError::Timeout => Self::ProviderTimeout,
            MarketError::Network(detail) => Self::Network { detail },
            MarketError::Json(detail) => Self::InvalidResponse { detail },
        }
    }
}
