//! Operation dispatcher: the externally invokable gateway operations.
//!
//! `MarketGateway` is the injected context object that owns configuration,
//! the OAuth client, the session store, and the market data client. The
//! authentication lifecycle is a three-state machine:
//!
//! ```text
//! Unauthenticated --get_auth_url--> PendingHandshake --authenticate--> Authenticated
//! ```
//!
//! `get_auth_url` is re-entrant from any state and restarts the handshake;
//! an existing authorized session stays usable until a later `authenticate`
//! succeeds and overwrites it. Data operations are legal only in
//! `Authenticated` and never change state, even on provider errors.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::market::{
    MarketDataClient, OptionChainsRequest, OptionExpiryRequest, ProductLookupRequest,
    QuoteRequest,
};
use crate::oauth::{OAuthClient, OAuthEndpoints};
use crate::session::SessionStore;

/// Dispatcher for the gateway's named operations.
#[derive(Debug)]
pub struct MarketGateway {
    config: GatewayConfig,
    oauth: OAuthClient,
    market: MarketDataClient,
    sessions: SessionStore,
}

impl MarketGateway {
    /// Create a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP clients cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let oauth = OAuthClient::new(&config.credentials, config.timeout)?;
        let market = MarketDataClient::new(&config.credentials, config.timeout)?;

        Ok(Self {
            config,
            oauth,
            market,
            sessions: SessionStore::new(),
        })
    }

    /// Replace the OAuth provider endpoints.
    #[must_use]
    pub fn with_oauth_endpoints(mut self, endpoints: OAuthEndpoints) -> Self {
        self.oauth = self.oauth.with_endpoints(endpoints);
        self
    }

    /// Start (or restart) the OAuth handshake and return the authorization
    /// URL the operator must visit.
    ///
    /// Any previously pending request token is discarded; an existing
    /// authorized session is left intact.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AuthProvider`] if the provider rejects the
    /// consumer credentials.
    pub async fn get_auth_url(&self) -> Result<String, GatewayError> {
        let pair = self.oauth.begin_handshake().await?;
        let url = self.oauth.authorize_url(&pair.token);
        self.sessions.begin(pair);
        tracing::info!(environment = %self.config.environment, "handshake started");
        Ok(url)
    }

    /// Complete the handshake with the verifier the operator obtained from
    /// the authorization page.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NoPendingHandshake`] if no handshake is in
    /// flight, or [`GatewayError::AuthProvider`] if the provider rejects
    /// the verifier.
    pub async fn authenticate(&self, verifier: &str) -> Result<String, GatewayError> {
        let pair = self.sessions.pending()?;
        let session = self
            .oauth
            .complete_handshake(
                &pair,
                verifier,
                self.config.environment,
                self.config.base_url(),
            )
            .await?;

        let confirmation = format!(
            "Authenticated against the {} environment at {}",
            session.environment, session.base_url
        );
        self.sessions.complete(session);
        tracing::info!(environment = %self.config.environment, "handshake completed");
        Ok(confirmation)
    }

    /// Get quotes for one or more symbols.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotAuthenticated`] before a completed
    /// handshake, [`GatewayError::ProviderHttp`] on provider errors.
    pub async fn get_quote(
        &self,
        request: &QuoteRequest,
    ) -> Result<serde_json::Value, GatewayError> {
        let session = self.sessions.authorized()?;
        Ok(self.market.get_quote(&session, request).await?)
    }

    /// Look up products by symbol or company name.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotAuthenticated`] before a completed
    /// handshake, [`GatewayError::ProviderHttp`] on provider errors.
    pub async fn lookup_product(
        &self,
        request: &ProductLookupRequest,
    ) -> Result<serde_json::Value, GatewayError> {
        let session = self.sessions.authorized()?;
        Ok(self.market.lookup_product(&session, request).await?)
    }

    /// Get option chains for an underlying symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotAuthenticated`] before a completed
    /// handshake, [`GatewayError::ProviderHttp`] on provider errors.
    pub async fn get_option_chains(
        &self,
        request: &OptionChainsRequest,
    ) -> Result<serde_json::Value, GatewayError> {
        let session = self.sessions.authorized()?;
        Ok(self.market.get_option_chains(&session, request).await?)
    }

    /// Get option expiration dates for an underlying symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotAuthenticated`] before a completed
    /// handshake, [`GatewayError::ProviderHttp`] on provider errors.
    pub async fn get_option_expiry_dates(
        &self,
        request: &OptionExpiryRequest,
    ) -> Result<serde_json::Value, GatewayError> {
        let session = self.sessions.authorized()?;
        Ok(self.market.get_option_expiry_dates(&session, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Environment};

    fn gateway() -> MarketGateway {
        let credentials =
            Credentials::new("consumer-key".to_string(), "consumer-secret".to_string());
        MarketGateway::new(GatewayConfig::new(credentials, Environment::Sandbox)).unwrap()
    }

    #[tokio::test]
    async fn authenticate_without_handshake_fails() {
        let gateway = gateway();
        let err = gateway.authenticate("123-456").await.unwrap_err();
        assert!(matches!(err, GatewayError::NoPendingHandshake));
    }

    #[tokio::test]
    async fn data_operations_require_authentication() {
        let gateway = gateway();

        let err = gateway
            .get_quote(&QuoteRequest::new("AAPL"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthenticated));

        let err = gateway
            .lookup_product(&ProductLookupRequest::new("AAPL"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthenticated));

        let err = gateway
            .get_option_chains(&OptionChainsRequest::new("AAPL"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthenticated));

        let err = gateway
            .get_option_expiry_dates(&OptionExpiryRequest::new("AAPL"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthenticated));
    }
}
