//! Input line parsing

use modbot_core::Snowflake;

use super::error::{GatewayError, GatewayResult};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundLine {
    pub author_id: Snowflake,
    pub text: String,
}

impl InboundLine {
    /// Parse `<user id>: <text>`
    pub fn parse(raw: &str) -> GatewayResult<Self> {
        let (id, text) = raw
            .split_once(':')
            .ok_or_else(|| GatewayError::InvalidLine(raw.to_string()))?;
        let author_id =
            Snowflake::parse(id).map_err(|_| GatewayError::InvalidLine(raw.to_string()))?;

        Ok(Self {
            author_id,
            text: text.trim().to_string(),
        })
    }
}
