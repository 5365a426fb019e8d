//! Tool trait for exposing data capabilities to LLM agents

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tradeflow_data::DataError;

/// Errors surfaced by tool execution.
///
/// Provider failures never appear here: the data layer renders them into
/// the returned text. Tools fail only on malformed parameters or on the
/// few data-layer errors that legitimately propagate (unknown capability,
/// platform unavailable).
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool input did not match the declared schema
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Data-layer error that propagates past the presentation boundary
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result type alias for tool execution
pub type ToolResult = std::result::Result<Value, ToolError>;

/// A capability exposed to LLM agents.
///
/// Each tool declares a unique name, a description the model uses to pick
/// it, and a JSON Schema for its input. `execute` receives the model's
/// arguments and returns the payload the model reads back.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the given parameters
    async fn execute(&self, params: Value) -> ToolResult;

    /// Unique tool name
    fn name(&self) -> &str;

    /// Description shown to the model
    fn description(&self) -> &str;

    /// JSON Schema describing the expected parameters
    fn input_schema(&self) -> Value;
}
