//! arXiv Paper Search MCP Server
//!
//! A Model Context Protocol (MCP) server exposing a single `papersearch` tool
//! over the arXiv export API. The tool builds an arXiv query from a topic,
//! category and keywords (or looks up a paper by identifier), ranks the
//! candidates by keyword relevance within a recency window, and renders them
//! as plain text for an LLM agent.
//!
//! # Example
//!
//! ```no_run
//! use papersearch_mcp::{client::ArxivClient, config::Config, server::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ArxivClient::new(config)?;
//!
//!     McpServer::new(client).run_stdio().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod search;
pub mod server;
pub mod tools;

pub use client::ArxivClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
