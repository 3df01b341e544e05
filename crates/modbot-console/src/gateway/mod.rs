//! Console gateway
//!
//! Reads `<user id>: <text>` lines, routes each to the session router as a
//! message from that user, and writes replies and queued direct messages.

mod error;
mod line;

pub use error::{GatewayError, GatewayResult};
pub use line::InboundLine;

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use modbot_service::SessionRouter;

use crate::directory::DirectoryTransport;

/// Drives the router from a line-oriented stream
pub struct ConsoleGateway {
    router: Arc<SessionRouter>,
    directory: Arc<DirectoryTransport>,
}

impl ConsoleGateway {
    pub fn new(router: Arc<SessionRouter>, directory: Arc<DirectoryTransport>) -> Self {
        Self { router, directory }
    }

    pub fn router(&self) -> &SessionRouter {
        &self.router
    }

    /// Handle one input line and return the output lines
    pub async fn handle_line(&self, raw: &str) -> GatewayResult<Vec<String>> {
        let line = InboundLine::parse(raw)?;
        let author = self
            .directory
            .user(line.author_id)
            .cloned()
            .ok_or(GatewayError::UnknownUser(line.author_id))?;

        debug!(author = %author.id, "Inbound line");
        let replies = self.router.handle_inbound(&author, &line.text).await;

        let mut out: Vec<String> = replies
            .iter()
            .flat_map(|reply| reply.lines())
            .map(|l| format!("-> {}: {l}", author.id))
            .collect();
        out.extend(
            self.directory
                .drain_outbox()
                .into_iter()
                .map(|dm| format!("[dm -> {}] {}", dm.recipient, dm.content)),
        );
        Ok(out)
    }

    /// Process lines until end of input
    ///
    /// Bad lines are reported on the output and skipped.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> GatewayResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut handled = 0usize;

        while let Some(raw) = lines.next_line().await? {
            if raw.trim().is_empty() {
                continue;
            }

            let out = match self.handle_line(&raw).await {
                Ok(out) => out,
                Err(e) => {
                    warn!(error = %e, "Rejected input line");
                    vec![format!("!! {e}")]
                }
            };
            for line in out {
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            writer.flush().await?;
            handled += 1;
        }

        info!(
            lines = handled,
            open_sessions = self.router.active_sessions(),
            "Input closed"
        );
        Ok(())
    }
}
