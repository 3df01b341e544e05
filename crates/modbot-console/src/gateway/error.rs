//! Gateway error types

use modbot_core::Snowflake;
use thiserror::Error;

/// Gateway error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Line is not `<user id>: <text>`
    #[error("Invalid input line: {0}")]
    InvalidLine(String),

    /// Author is not in the platform directory
    #[error("Unknown user {0}")]
    UnknownUser(Snowflake),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
