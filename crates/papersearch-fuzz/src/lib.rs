//! Fuzzing library for papersearch-mcp.
//!
//! This crate provides fuzzing targets for the Atom feed parser, tool
//! argument decoding and query construction.
//!
//! # Usage
//!
//! ```bash
//! cd crates/papersearch-fuzz
//! cargo +nightly fuzz run fuzz_feed_parse -- -max_total_time=60
//! ```

pub use papersearch_mcp::client::parse_feed;
pub use papersearch_mcp::models;
pub use papersearch_mcp::search::query;
