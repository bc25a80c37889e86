//! Output formatters for tool results.

mod text;

pub use text::{BLOCK_DELIMITER, NO_RESULTS, format_paper, format_papers};
