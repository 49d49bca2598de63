//! HTTP client for the provider's market data resources.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;

use super::types::{
    OptionChainsRequest, OptionExpiryRequest, ProductLookupRequest, QuoteRequest,
};
use crate::config::Credentials;
use crate::oauth::{OAuth1Signer, percent_encode};
use crate::session::AuthorizedSession;

/// Market data call errors.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The provider returned a non-success HTTP status.
    #[error("provider returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The call exceeded the configured timeout.
    #[error("market data request timed out")]
    Timeout,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The provider returned a success status with an unparsable body.
    #[error("JSON parsing error: {0}")]
    Json(String),
}

/// Client for the provider's market data API.
///
/// Holds no authentication state of its own: every call takes the current
/// [`AuthorizedSession`] and signs the request with it. Parameter bundles
/// translate one-to-one into query pairs; absent fields never reach the
/// wire.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: Client,
    signer: OAuth1Signer,
}

impl MarketDataClient {
    /// Create a market data client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self {
            http,
            signer: OAuth1Signer::new(
                credentials.consumer_key(),
                credentials.consumer_secret(),
            ),
        })
    }

    /// Get quotes for one or more symbols.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Http`] on any non-success status, including
    /// the 401-class responses an expired daily access token produces.
    pub async fn get_quote(
        &self,
        session: &AuthorizedSession,
        request: &QuoteRequest,
    ) -> Result<serde_json::Value, MarketError> {
        let url = format!(
            "{}/v1/market/quote/{}.json",
            session.base_url, request.symbols
        );
        tracing::debug!(symbols = %request.symbols, "fetching quotes");
        self.signed_get(session, &url, &request.query_pairs()).await
    }

    /// Look up products by symbol or company name.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Http`] on any non-success status.
    pub async fn lookup_product(
        &self,
        session: &AuthorizedSession,
        request: &ProductLookupRequest,
    ) -> Result<serde_json::Value, MarketError> {
        let url = format!(
            "{}/v1/market/lookup/{}.json",
            session.base_url, request.search
        );
        tracing::debug!(search = %request.search, "looking up products");
        self.signed_get(session, &url, &request.query_pairs()).await
    }

    /// Get option chains for an underlying symbol.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Http`] on any non-success status.
    pub async fn get_option_chains(
        &self,
        session: &AuthorizedSession,
        request: &OptionChainsRequest,
    ) -> Result<serde_json::Value, MarketError> {
        let url = format!("{}/v1/market/optionchains.json", session.base_url);
        tracing::debug!(symbol = %request.symbol, "fetching option chains");
        self.signed_get(session, &url, &request.query_pairs()).await
    }

    /// Get option expiration dates for an underlying symbol.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Http`] on any non-success status.
    pub async fn get_option_expiry_dates(
        &self,
        session: &AuthorizedSession,
        request: &OptionExpiryRequest,
    ) -> Result<serde_json::Value, MarketError> {
        let url = format!("{}/v1/market/optionexpiredate.json", session.base_url);
        tracing::debug!(symbol = %request.symbol, "fetching option expiry dates");
        self.signed_get(session, &url, &request.query_pairs()).await
    }

    async fn signed_get(
        &self,
        session: &AuthorizedSession,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<serde_json::Value, MarketError> {
        let header = self.signer.authorization_header(
            "GET",
            url,
            query,
            Some((&session.access_token, &session.access_token_secret)),
            &[],
        );

        let full_url = if query.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{}", encode_query(query))
        };

        let response = self
            .http
            .get(&full_url)
            .header(AUTHORIZATION, header)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(MarketError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| MarketError::Json(e.to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> MarketError {
    if err.is_timeout() {
        MarketError::Timeout
    } else {
        MarketError::Network(err.to_string())
    }
}

/// Encode query pairs the same way the signature base string sees them.
fn encode_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
