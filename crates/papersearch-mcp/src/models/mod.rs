//! Data models for arXiv papers and tool parameters.

mod paper;
mod request;

pub use paper::{Paper, PaperRecord};
pub use request::SearchRequest;
