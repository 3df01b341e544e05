//! # modbot-console
//!
//! Console gateway for running the moderation engine locally. A JSON
//! platform directory stands in for the chat platform; conversations are
//! typed on stdin as `<user id>: <text>`.

pub mod directory;
pub mod gateway;

use std::sync::Arc;
use tracing::info;

use modbot_common::{AppConfig, AppError};
use modbot_service::{ServiceContextBuilder, SessionRouter};

pub use directory::DirectoryTransport;
pub use gateway::{ConsoleGateway, GatewayError};

/// Wire the stores, directory and router together
pub async fn build_gateway(config: &AppConfig) -> Result<ConsoleGateway, AppError> {
    let directory = Arc::new(DirectoryTransport::load(&config.console.directory_path).await?);
    let (reports, credibility) = modbot_store::open_stores(&config.storage);

    let ctx = ServiceContextBuilder::new()
        .report_repo(Arc::new(reports))
        .credibility_repo(Arc::new(credibility))
        .transport(directory.clone())
        .moderation(config.moderation.clone())
        .build()?;

    let router = Arc::new(SessionRouter::new(ctx, config.conversation.clone()));
    Ok(ConsoleGateway::new(router, directory))
}

/// Run the console gateway on stdin and stdout until input closes
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let gateway = build_gateway(&config).await?;

    info!(
        intake = %config.conversation.intake_keyword,
        review = %config.conversation.review_keyword,
        "Console gateway ready"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    gateway
        .run(stdin, tokio::io::stdout())
        .await
        .map_err(|e| AppError::Transport(e.to_string()))
}
