//! CLI entry point: scan one address and print the report as JSON.

use eyre::{eyre, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sei_sentinel::models::ScannerConfig;
use sei_sentinel::scanner::TokenScanner;
use sei_sentinel::utils::constants::{APP_NAME, APP_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let mut args = std::env::args().skip(1);
    let address = args
        .next()
        .ok_or_else(|| eyre!("usage: sei_sentinel <address> [deadline-secs]"))?;

    let deadline = match args.next() {
        Some(arg) => {
            let secs: u64 = arg
                .parse()
                .map_err(|_| eyre!("deadline must be a number of seconds"))?;
            Some(std::time::Duration::from_secs(secs))
        }
        None => None,
    };

    info!("🚀 {} v{} starting", APP_NAME, APP_VERSION);

    let scanner = TokenScanner::new(ScannerConfig::default()).map_err(|e| eyre!("{e}"))?;
    let report = scanner
        .scan(&address, None, deadline)
        .await
        .map_err(|e| eyre!("{e}"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
