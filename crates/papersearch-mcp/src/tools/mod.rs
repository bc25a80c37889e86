//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates input parameters
//! 2. Queries the paper source
//! 3. Formats results as text

mod papersearch;

pub use papersearch::PaperSearchTool;

use std::sync::Arc;

use crate::error::ToolResult;
use crate::search::PaperSource;

/// Tool execution context.
#[derive(Clone)]
pub struct ToolContext {
    /// Paper source (the arXiv client in production).
    pub source: Arc<dyn PaperSource>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(source: Arc<dyn PaperSource>) -> Self {
        Self { source }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "papersearch").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(PaperSearchTool)]
}
