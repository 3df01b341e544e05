//! Console gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p modbot-console < conversation.txt
//! ```
//!
//! Configuration is loaded from environment variables.

use modbot_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Console gateway failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        reports = %config.storage.report_ledger_path.display(),
        directory = %config.console.directory_path.display(),
        "Starting console gateway"
    );

    modbot_console::run(config).await?;

    Ok(())
}
