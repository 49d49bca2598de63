//! Gateway configuration, loaded from environment variables.

use std::time::Duration;

/// E*TRADE API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Sandbox environment (simulated data).
    #[default]
    Sandbox,
    /// Production environment (live market data).
    Production,
}

impl Environment {
    /// Parse environment from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Sandbox,
        }
    }

    /// Get the default API base URL for this environment.
    #[must_use]
    pub const fn api_base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://apisb.etrade.com",
            Self::Production => "https://api.etrade.com",
        }
    }

    /// Check if this is the production environment.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Get the environment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// E*TRADE consumer credentials.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(consumer_key: String, consumer_secret: String) -> Self {
        Self {
            consumer_key,
            consumer_secret,
        }
    }

    /// Get the consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Get the consumer secret.
    #[must_use]
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

/// Default HTTP request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Consumer credentials.
    pub credentials: Credentials,
    /// API environment.
    pub environment: Environment,
    /// HTTP request timeout for all provider calls.
    pub timeout: Duration,
    base_url: String,
}

impl GatewayConfig {
    /// Create a configuration with the environment's default base URL.
    #[must_use]
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            timeout: DEFAULT_TIMEOUT,
            base_url: environment.api_base_url().to_string(),
        }
    }

    /// Override the market data API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the market data API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ETRADE_CONSUMER_KEY` or `ETRADE_CONSUMER_SECRET`
    /// is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let consumer_key = require_env("ETRADE_CONSUMER_KEY")?;
        let consumer_secret = require_env("ETRADE_CONSUMER_SECRET")?;

        let environment = std::env::var("ETRADE_ENVIRONMENT")
            .map(|s| Environment::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let base_url = match environment {
            Environment::Production => std::env::var("ETRADE_PROD_BASE_URL"),
            Environment::Sandbox => std::env::var("ETRADE_SANDBOX_BASE_URL"),
        }
        .unwrap_or_else(|_| environment.api_base_url().to_string());

        let timeout = parse_env_duration_secs("ETRADE_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT);

        Ok(Self {
            credentials: Credentials::new(consumer_key, consumer_secret),
            environment,
            timeout,
            base_url,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    let value =
        std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing() {
        assert_eq!(
            Environment::from_str_case_insensitive("production"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_case_insensitive("PRODUCTION"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_case_insensitive("sandbox"),
            Environment::Sandbox
        );
        assert_eq!(
            Environment::from_str_case_insensitive("unknown"),
            Environment::Sandbox
        );
    }

    #[test]
    fn environment_base_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://api.etrade.com"
        );
        assert_eq!(
            Environment::Sandbox.api_base_url(),
            "https://apisb.etrade.com"
        );
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Sandbox), "sandbox");
        assert_eq!(format!("{}", Environment::Production), "production");
    }

    #[test]
    fn credentials_redacted_debug() {
        let creds = Credentials::new("key123".to_string(), "secret456".to_string());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("key123"));
        assert!(!debug.contains("secret456"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn config_defaults() {
        let config = Credentials::new("key".to_string(), "secret".to_string());
        let config = GatewayConfig::new(config, Environment::Sandbox);
        assert_eq!(config.base_url(), "https://apisb.etrade.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_base_url_override() {
        let creds = Credentials::new("key".to_string(), "secret".to_string());
        let config = GatewayConfig::new(creds, Environment::Sandbox)
            .with_base_url("http://localhost:9999");
        assert_eq!(config.base_url(), "http://localhost:9999");
    }

    #[test]
    fn config_with_timeout() {
        let creds = Credentials::new("key".to_string(), "secret".to_string());
        let config =
            GatewayConfig::new(creds, Environment::Sandbox).with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
