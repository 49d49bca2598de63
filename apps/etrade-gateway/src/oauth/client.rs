//! Three-legged OAuth handshake against the provider's token endpoints.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;

use super::signer::OAuth1Signer;
use crate::config::{Credentials, Environment};
use crate::session::{AuthorizedSession, RequestTokenPair};

/// Out-of-band callback indicator: the operator relays the verifier by hand.
const OOB_CALLBACK: &str = "oob";

/// Provider OAuth endpoint set.
///
/// The defaults are the fixed E*TRADE endpoints; both environments use the
/// production token service. Overridable so tests can stand in a local
/// server for the provider.
#[derive(Debug, Clone)]
pub struct OAuthEndpoints {
    /// Request-token exchange URL (handshake step 1).
    pub request_token_url: String,
    /// Access-token exchange URL (handshake step 3).
    pub access_token_url: String,
    /// Authorization page the operator visits (handshake step 2).
    pub authorize_url: String,
}

impl Default for OAuthEndpoints {
    fn default() -> Self {
        Self {
            request_token_url: "https://api.etrade.com/oauth/request_token".to_string(),
            access_token_url: "https://api.etrade.com/oauth/access_token".to_string(),
            authorize_url: "https://us.etrade.com/e/t/etws/authorize".to_string(),
        }
    }
}

impl OAuthEndpoints {
    /// Build an endpoint set rooted at a single base URL.
    #[must_use]
    pub fn rooted_at(base_url: &str) -> Self {
        Self {
            request_token_url: format!("{base_url}/oauth/request_token"),
            access_token_url: format!("{base_url}/oauth/access_token"),
            authorize_url: format!("{base_url}/e/t/etws/authorize"),
        }
    }
}

/// OAuth handshake errors.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The provider rejected a handshake step.
    #[error("provider rejected the handshake: HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The token response was missing expected fields.
    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    /// The exchange exceeded the configured timeout.
    #[error("handshake request timed out")]
    Timeout,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),
}

/// Client for the provider's three-legged OAuth handshake.
///
/// Stateless except for the token pairs it returns to its caller; session
/// state lives in [`crate::session::SessionStore`].
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    signer: OAuth1Signer,
    endpoints: OAuthEndpoints,
}

impl OAuthClient {
    /// Create a client with the default provider endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self, OAuthError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OAuthError::Network(e.to_string()))?;

        Ok(Self {
            http,
            signer: OAuth1Signer::new(
                credentials.consumer_key(),
                credentials.consumer_secret(),
            ),
            endpoints: OAuthEndpoints::default(),
        })
    }

    /// Replace the provider endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: OAuthEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Perform the request-token exchange (handshake step 1).
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Rejected`] if the provider refuses the consumer
    /// credentials, [`OAuthError::Timeout`] / [`OAuthError::Network`] on
    /// transport failure.
    pub async fn begin_handshake(&self) -> Result<RequestTokenPair, OAuthError> {
        let url = &self.endpoints.request_token_url;
        let header = self.signer.authorization_header(
            "GET",
            url,
            &[],
            None,
            &[("oauth_callback", OOB_CALLBACK)],
        );

        let body = self.token_exchange(url, header).await?;
        let fields = parse_token_response(&body)?;

        tracing::debug!("request token obtained");
        Ok(RequestTokenPair {
            token: take_field(&fields, "oauth_token")?,
            secret: take_field(&fields, "oauth_token_secret")?,
        })
    }

    /// Format the authorization URL the operator must visit.
    ///
    /// Pure string formatting; performs no I/O.
    #[must_use]
    pub fn authorize_url(&self, request_token: &str) -> String {
        format!(
            "{}?key={}&token={}",
            self.endpoints.authorize_url,
            self.signer.consumer_key(),
            request_token
        )
    }

    /// Exchange the pending request token and verifier for an access token
    /// (handshake step 3).
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Rejected`] if the verifier is invalid or the
    /// token pair no longer matches what the provider issued.
    pub async fn complete_handshake(
        &self,
        pair: &RequestTokenPair,
        verifier: &str,
        environment: Environment,
        base_url: &str,
    ) -> Result<AuthorizedSession, OAuthError> {
        let url = &self.endpoints.access_token_url;
        let header = self.signer.authorization_header(
            "GET",
            url,
            &[],
            Some((&pair.token, &pair.secret)),
            &[("oauth_verifier", verifier)],
        );

        let body = self.token_exchange(url, header).await?;
        let fields = parse_token_response(&body)?;

        tracing::info!(environment = %environment, "access token obtained");
        Ok(AuthorizedSession {
            access_token: take_field(&fields, "oauth_token")?,
            access_token_secret: take_field(&fields, "oauth_token_secret")?,
            base_url: base_url.to_string(),
            environment,
        })
    }

    async fn token_exchange(&self, url: &str, header: String) -> Result<String, OAuthError> {
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, header)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(OAuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn map_transport_error(err: reqwest::Error) -> OAuthError {
    if err.is_timeout() {
        OAuthError::Timeout
    } else {
        OAuthError::Network(err.to_string())
    }
}

/// Parse a form-encoded token response body into its fields.
fn parse_token_response(body: &str) -> Result<HashMap<String, String>, OAuthError> {
    let mut fields = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| OAuthError::MalformedResponse(format!("bad pair: {pair}")))?;
        let key = urlencoding::decode(key)
            .map_err(|e| OAuthError::MalformedResponse(e.to_string()))?;
        let value = urlencoding::decode(value)
            .map_err(|e| OAuthError::MalformedResponse(e.to_string()))?;
        fields.insert(key.into_owned(), value.into_owned());
    }
    Ok(fields)
}

fn take_field(fields: &HashMap<String, String>, key: &str) -> Result<String, OAuthError> {
    fields
        .get(key)
        .cloned()
        .ok_or_else(|| OAuthError::MalformedResponse(format!("missing {key}")))
}
