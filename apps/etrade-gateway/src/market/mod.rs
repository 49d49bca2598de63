//! Market data client and request parameter bundles.
//!
//! Translates validated parameter bundles into signed GET requests against
//! the provider's quote, lookup, and option chain resources. No
//! authentication logic lives here; callers supply the current
//! [`AuthorizedSession`](crate::session::AuthorizedSession).

mod client;
mod types;

pub use client::{MarketDataClient, MarketError};
pub use types::{OptionChainsRequest, OptionExpiryRequest, ProductLookupRequest, QuoteRequest};
