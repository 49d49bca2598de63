// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)
)]

//! E*TRADE Market Data Gateway
//!
//! Exposes the E*TRADE market data REST API through a small set of named
//! operations, gated by a three-legged OAuth 1.0 handshake.
//!
//! # Authentication lifecycle
//!
//! The process holds one logical session, driven through three states:
//!
//! 1. [`MarketGateway::get_auth_url`] exchanges the consumer credentials
//!    for a request token and returns the authorization URL the operator
//!    visits in a browser.
//! 2. The operator copies the verification code from the authorization
//!    page into [`MarketGateway::authenticate`], which trades the pending
//!    request token for a long-lived access token.
//! 3. Data operations ([`MarketGateway::get_quote`],
//!    [`MarketGateway::lookup_product`],
//!    [`MarketGateway::get_option_chains`],
//!    [`MarketGateway::get_option_expiry_dates`]) sign each call with the
//!    access token. They fail with
//!    [`GatewayError::NotAuthenticated`] until the handshake completes.
//!
//! Access tokens expire at the provider's fixed daily boundary; the expiry
//! is not tracked here and surfaces as an HTTP error on a data call, after
//! which the caller re-runs the handshake.
//!
//! # Example
//!
//! ```ignore
//! use etrade_gateway::{GatewayConfig, MarketGateway, QuoteRequest};
//!
//! let gateway = MarketGateway::new(GatewayConfig::from_env()?)?;
//! let url = gateway.get_auth_url().await?;
//! println!("visit: {url}");
//! gateway.authenticate("12345").await?;
//! let quotes = gateway.get_quote(&QuoteRequest::new("AAPL")).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loaded from environment variables.
pub mod config;

/// Gateway-level error taxonomy.
pub mod error;

/// Operation dispatcher.
pub mod gateway;

/// Market data client and request bundles.
pub mod market;

/// OAuth handshake client and request signing.
pub mod oauth;

/// Process-wide session state.
pub mod session;

pub use config::{ConfigError, Credentials, Environment, GatewayConfig};
pub use error::GatewayError;
pub use gateway::MarketGateway;
pub use market::{
    MarketDataClient, MarketError, OptionChainsRequest, OptionExpiryRequest,
    ProductLookupRequest, QuoteRequest,
};
pub use oauth::{OAuth1Signer, OAuthClient, OAuthEndpoints, OAuthError};
pub use session::{AuthorizedSession, RequestTokenPair, SessionError, SessionStore};
