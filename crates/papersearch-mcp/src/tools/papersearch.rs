//! The `papersearch` tool: recent arXiv papers ranked by keyword relevance.

use chrono::Utc;
use serde_json::json;

use super::{McpTool, ToolContext};
use crate::config::search;
use crate::error::ToolResult;
use crate::formatters;
use crate::models::SearchRequest;

/// arXiv paper search tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaperSearchTool;

#[async_trait::async_trait]
impl McpTool for PaperSearchTool {
    fn name(&self) -> &'static str {
        "papersearch"
    }

    fn description(&self) -> &'static str {
        "Search recent arXiv papers. Pass a topic (default 'moe'), an arXiv ID \
         (e.g. 2103.03404) for a direct lookup, an optional category and keywords. \
         Results are ranked by keyword relevance in title and abstract."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "days": {
                    "type": "integer",
                    "description": "Only papers published in the last N days (ignored when keywords are given)",
                    "default": search::ADVERTISED_DAYS
                },
                "queryType": {
                    "type": "string",
                    "description": "Topic or arXiv query (default 'moe', 'moe inference' for the MoE \
                                    deployment preset), or an arXiv ID such as 2103.03404",
                    "default": search::DEFAULT_QUERY_TYPE
                },
                "maxResults": {
                    "type": "integer",
                    "description": "Maximum number of papers to return",
                    "default": search::DEFAULT_MAX_RESULTS
                },
                "field": {
                    "type": "string",
                    "description": "arXiv category (e.g. 'cs.LG')",
                    "default": null
                },
                "keywords": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Keywords to look for in title or abstract",
                    "default": null
                },
                "showScore": {
                    "type": "boolean",
                    "description": "Include the relevance score of each paper",
                    "default": false
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        // Clients may send `null` arguments
        let input = if input.is_null() { json!({}) } else { input };
        let request: SearchRequest = serde_json::from_value(input)?;
        let request = request.normalized()?;

        tracing::info!(
            query_type = %request.query_type,
            days = request.days,
            max_results = request.max_results,
            field = ?request.field,
            keywords = request.keywords().len(),
            "Searching papers"
        );

        let papers =
            crate::search::search_papers(ctx.source.as_ref(), &request, Utc::now()).await?;

        tracing::info!(results = papers.len(), "Paper search complete");
        Ok(formatters::format_papers(&papers, request.show_score))
    }
}
