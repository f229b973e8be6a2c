mod config;
mod error;

use config::Config;
use error::Result;
use mcp::Server;
use taxbot::{QueryClient, TaxQuestionTool};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SERVER_NAME: &str = "taxbot";

#[tokio::main]
async fn main() {
    // Stdout is the MCP channel; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` overrides; the default must stay at `info` so the startup
/// banner is always emitted.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    info!("taxbot MCP server running on stdio");
    info!("forwarding queries to {}", config.base_url);

    let client = QueryClient::new(config.base_url, config.api_key);
    let tool = TaxQuestionTool::new(client);

    Server::new(SERVER_NAME, env!("CARGO_PKG_VERSION"), tool)
        .serve_stdio()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_banner_visible_without_rust_log() {
        // SAFETY: no other test in this binary reads or writes the
        // environment.
        unsafe { std::env::remove_var("RUST_LOG") };
        assert_eq!(log_filter().to_string(), "info");
    }
}
