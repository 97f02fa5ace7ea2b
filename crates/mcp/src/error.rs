// Tool execution errors

use crate::protocol::JsonRpcError;
use sumble_sdk::SumbleError;

/// Everything that can go wrong between receiving `tools/call` and getting
/// an upstream response. Each variant ends up as a JSON-RPC internal error;
/// none of them terminate the session.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error("{tool} requires one of domain, organization_id or slug")]
    MissingOrganization { tool: &'static str },

    #[error(transparent)]
    Upstream(#[from] SumbleError),
}

impl ToolError {
    pub fn invalid(tool: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            message: message.into(),
        }
    }

    /// True when the error was raised before any upstream request was sent.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Upstream(_))
    }
}

impl From<&ToolError> for JsonRpcError {
    fn from(err: &ToolError) -> Self {
        JsonRpcError::internal_error(err.to_string())
    }
}
