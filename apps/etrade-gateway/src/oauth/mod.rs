//! OAuth 1.0 handshake client and request signing.
//!
//! The provider gates every market data resource behind a three-legged
//! handshake: a request token is exchanged, the operator authorizes it in a
//! browser, and the resulting verifier is traded for a long-lived access
//! token. This module owns the protocol mechanics; the lifecycle state
//! lives in [`crate::session`].

mod client;
mod signer;

pub use client::{OAuthClient, OAuthEndpoints, OAuthError};
pub use signer::OAuth1Signer;

pub(crate) use signer::percent_encode;
