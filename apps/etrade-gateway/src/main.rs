//! E*TRADE Gateway Binary
//!
//! Runs the interactive OAuth handshake: prints the authorization URL,
//! reads the verification code from stdin, and completes the exchange.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin etrade-gateway
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `ETRADE_CONSUMER_KEY`: E*TRADE consumer key
//! - `ETRADE_CONSUMER_SECRET`: E*TRADE consumer secret
//!
//! ## Optional
//! - `ETRADE_ENVIRONMENT`: sandbox | production (default: sandbox)
//! - `ETRADE_SANDBOX_BASE_URL`: sandbox API base URL override
//! - `ETRADE_PROD_BASE_URL`: production API base URL override
//! - `ETRADE_HTTP_TIMEOUT_SECS`: HTTP timeout in seconds (default: 30)
//! - `RUST_LOG`: Log level (default: info)

use std::io::Write as _;

use anyhow::Context;
use etrade_gateway::{GatewayConfig, MarketGateway};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let config = GatewayConfig::from_env().context("loading E*TRADE configuration")?;
    tracing::info!(
        environment = %config.environment,
        base_url = %config.base_url(),
        "configuration loaded"
    );

    let gateway = MarketGateway::new(config)?;

    let authorize_url = gateway.get_auth_url().await?;
    println!("Visit this URL and authorize the application:\n");
    println!("    {authorize_url}\n");

    print!("Enter the verification code: ");
    std::io::stdout().flush()?;

    let mut verifier = String::new();
    std::io::stdin().read_line(&mut verifier)?;
    let verifier = verifier.trim();

    let confirmation = gateway.authenticate(verifier).await?;
    println!("\n{confirmation}");
    println!("Note: access tokens expire at midnight US Eastern time.");

    Ok(())
}

/// Initialize tracing with an env-filtered console subscriber.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
