//! Request parameter bundles for the market data operations.
//!
//! Optional fields are `Option<T>` and boolean toggles default to off; a
//! field that was never set produces no query pair at all. The provider
//! distinguishes "parameter omitted" from "parameter set to a default", so
//! absence at the call site must mean absence on the wire.

use serde::{Deserialize, Serialize};

/// Parameters for a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Comma-separated list of ticker symbols (e.g. `"AAPL,MSFT"`).
    pub symbols: String,
    /// Ask the provider to include the next earnings date.
    #[serde(default)]
    pub require_earnings_date: bool,
    /// Skip the provider's mini-options check.
    #[serde(default)]
    pub skip_mini_options_check: bool,
}

impl QuoteRequest {
    /// Create a quote request for one or more symbols.
    #[must_use]
    pub fn new(symbols: impl Into<String>) -> Self {
        Self {
            symbols: symbols.into(),
            require_earnings_date: false,
            skip_mini_options_check: false,
        }
    }

    /// Request the next earnings date in the response.
    #[must_use]
    pub const fn with_earnings_date(mut self, value: bool) -> Self {
        self.require_earnings_date = value;
        self
    }

    /// Skip the mini-options check.
    #[must_use]
    pub const fn with_skip_mini_options_check(mut self, value: bool) -> Self {
        self.skip_mini_options_check = value;
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.require_earnings_date {
            pairs.push(("requireEarningsDate", "true".to_string()));
        }
        if self.skip_mini_options_check {
            pairs.push(("skipMiniOptionsCheck", "true".to_string()));
        }
        pairs
    }
}

/// Parameters for a product lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLookupRequest {
    /// Full or partial symbol to search for.
    pub search: String,
    /// Full or partial company name filter.
    #[serde(default)]
    pub company: Option<String>,
    /// Security type filter (`EQ`, `MF`, `OPTN`).
    #[serde(default)]
    pub security_type: Option<String>,
}

impl ProductLookupRequest {
    /// Create a lookup request for a search string.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            company: None,
            security_type: None,
        }
    }

    /// Filter by company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Filter by security type.
    #[must_use]
    pub fn with_security_type(mut self, security_type: impl Into<String>) -> Self {
        self.security_type = Some(security_type.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(company) = &self.company {
            pairs.push(("company", company.clone()));
        }
        if let Some(security_type) = &self.security_type {
            pairs.push(("type", security_type.clone()));
        }
        pairs
    }
}

/// Parameters for an option chains request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChainsRequest {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiration year (4-digit).
    #[serde(default)]
    pub expiry_year: Option<u16>,
    /// Expiration month (1-12).
    #[serde(default)]
    pub expiry_month: Option<u8>,
    /// Expiration day (1-31).
    #[serde(default)]
    pub expiry_day: Option<u8>,
    /// Return strikes near this price.
    #[serde(default)]
    pub strike_price_near: Option<f64>,
    /// Number of strikes to return.
    #[serde(default)]
    pub no_of_strikes: Option<u32>,
    /// Include weekly options.
    #[serde(default)]
    pub include_weekly: bool,
    /// Skip adjusted options.
    #[serde(default)]
    pub skip_adjusted: bool,
    /// Option category (`STANDARD`, `ALL`, `MINI`).
    #[serde(default)]
    pub option_category: Option<String>,
    /// Chain type (`CALL`, `PUT`, `CALLPUT`).
    #[serde(default)]
    pub chain_type: Option<String>,
    /// Price type (`ATNM`, `ALL`).
    #[serde(default)]
    pub price_type: Option<String>,
}

impl OptionChainsRequest {
    /// Create an option chains request for an underlying symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            expiry_year: None,
            expiry_month: None,
            expiry_day: None,
            strike_price_near: None,
            no_of_strikes: None,
            include_weekly: false,
            skip_adjusted: false,
            option_category: None,
            chain_type: None,
            price_type: None,
        }
    }

    /// Set the expiration year.
    #[must_use]
    pub const fn with_expiry_year(mut self, year: u16) -> Self {
        self.expiry_year = Some(year);
        self
    }

    /// Set the expiration month.
    #[must_use]
    pub const fn with_expiry_month(mut self, month: u8) -> Self {
        self.expiry_month = Some(month);
        self
    }

    /// Set the expiration day.
    #[must_use]
    pub const fn with_expiry_day(mut self, day: u8) -> Self {
        self.expiry_day = Some(day);
        self
    }

    /// Return strikes near this price.
    #[must_use]
    pub const fn with_strike_price_near(mut self, price: f64) -> Self {
        self.strike_price_near = Some(price);
        self
    }

    /// Set the number of strikes to return.
    #[must_use]
    pub const fn with_no_of_strikes(mut self, count: u32) -> Self {
        self.no_of_strikes = Some(count);
        self
    }

    /// Include weekly options.
    #[must_use]
    pub const fn with_weekly(mut self, value: bool) -> Self {
        self.include_weekly = value;
        self
    }

    /// Skip adjusted options.
    #[must_use]
    pub const fn with_skip_adjusted(mut self, value: bool) -> Self {
        self.skip_adjusted = value;
        self
    }

    /// Set the option category.
    #[must_use]
    pub fn with_option_category(mut self, category: impl Into<String>) -> Self {
        self.option_category = Some(category.into());
        self
    }

    /// Set the chain type.
    #[must_use]
    pub fn with_chain_type(mut self, chain_type: impl Into<String>) -> Self {
        self.chain_type = Some(chain_type.into());
        self
    }

    /// Set the price type.
    #[must_use]
    pub fn with_price_type(mut self, price_type: impl Into<String>) -> Self {
        self.price_type = Some(price_type.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("symbol", self.symbol.clone())];
        if let Some(year) = self.expiry_year {
            pairs.push(("expiryYear", year.to_string()));
        }
        if let Some(month) = self.expiry_month {
            pairs.push(("expiryMonth", month.to_string()));
        }
        if let Some(day) = self.expiry_day {
            pairs.push(("expiryDay", day.to_string()));
        }
        if let Some(price) = self.strike_price_near {
            pairs.push(("strikePriceNear", price.to_string()));
        }
        if let Some(count) = self.no_of_strikes {
            pairs.push(("noOfStrikes", count.to_string()));
        }
        if self.include_weekly {
            pairs.push(("includeWeekly", "true".to_string()));
        }
        if self.skip_adjusted {
            pairs.push(("skipAdjusted", "true".to_string()));
        }
        if let Some(category) = &self.option_category {
            pairs.push(("optionCategory", category.clone()));
        }
        if let Some(chain_type) = &self.chain_type {
            pairs.push(("chainType", chain_type.clone()));
        }
        if let Some(price_type) = &self.price_type {
            pairs.push(("priceType", price_type.clone()));
        }
        pairs
    }
}

/// Parameters for an option expiry dates request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionExpiryRequest {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiry type filter (`WEEKLY`, `MONTHLY`, `QUARTERLY`, `ALL`).
    #[serde(default)]
    pub expiry_type: Option<String>,
}

impl OptionExpiryRequest {
    /// Create an expiry dates request for an underlying symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            expiry_type: None,
        }
    }

    /// Filter by expiry type.
    #[must_use]
    pub fn with_expiry_type(mut self, expiry_type: impl Into<String>) -> Self {
        self.expiry_type = Some(expiry_type.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("symbol", self.symbol.clone())];
        if let Some(expiry_type) = &self.expiry_type {
            pairs.push(("expiryType", expiry_type.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_flags_off_produce_no_pairs() {
        let request = QuoteRequest::new("AAPL");
        assert!(request.query_pairs().is_empty());
    }

    #[test]
    fn quote_flags_on_produce_true_pairs() {
        let request = QuoteRequest::new("AAPL")
            .with_earnings_date(true)
            .with_skip_mini_options_check(true);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("requireEarningsDate", "true".to_string()),
                ("skipMiniOptionsCheck", "true".to_string()),
            ]
        );
    }

    #[test]
    fn lookup_omits_absent_filters() {
        let request = ProductLookupRequest::new("AAPL");
        assert!(request.query_pairs().is_empty());
    }

    #[test]
    fn lookup_includes_present_filters() {
        let request = ProductLookupRequest::new("AAPL")
            .with_company("Apple Inc")
            .with_security_type("EQ");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("company", "Apple Inc".to_string()),
                ("type", "EQ".to_string()),
            ]
        );
    }

    #[test]
    fn chains_default_sends_only_symbol() {
        let request = OptionChainsRequest::new("AAPL");
        assert_eq!(request.query_pairs(), vec![("symbol", "AAPL".to_string())]);
    }

    #[test]
    fn chains_includes_only_supplied_refinements() {
        let request = OptionChainsRequest::new("AAPL")
            .with_expiry_year(2026)
            .with_no_of_strikes(10)
            .with_weekly(true)
            .with_chain_type("CALLPUT");
        let pairs = request.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("symbol", "AAPL".to_string()),
                ("expiryYear", "2026".to_string()),
                ("noOfStrikes", "10".to_string()),
                ("includeWeekly", "true".to_string()),
                ("chainType", "CALLPUT".to_string()),
            ]
        );
        assert!(!pairs.iter().any(|(key, _)| *key == "expiryMonth"));
        assert!(!pairs.iter().any(|(key, _)| *key == "strikePriceNear"));
    }

    #[test]
    fn expiry_dates_default_sends_only_symbol() {
        let request = OptionExpiryRequest::new("AAPL");
        assert_eq!(request.query_pairs(), vec![("symbol", "AAPL".to_string())]);
    }

    #[test]
    fn chains_request_deserializes_with_omitted_fields_absent() {
        let request: OptionChainsRequest =
            serde_json::from_str(r#"{"symbol": "AAPL", "no_of_strikes": 10}"#).unwrap();
        assert_eq!(request.symbol, "AAPL");
        assert_eq!(request.no_of_strikes, Some(10));
        assert_eq!(request.expiry_year, None);
        assert!(!request.include_weekly);
    }

    #[test]
    fn expiry_dates_includes_expiry_type_when_set() {
        let request = OptionExpiryRequest::new("AAPL").with_expiry_type("MONTHLY");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("symbol", "AAPL".to_string()),
                ("expiryType", "MONTHLY".to_string()),
            ]
        );
    }
}
