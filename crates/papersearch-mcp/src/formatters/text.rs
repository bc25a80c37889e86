//! Plain-text output formatting.

use crate::models::PaperRecord;

/// Returned when there is nothing to show.
pub const NO_RESULTS: &str = "No relevant papers found in the requested time window.";

/// Closes every paper block.
pub const BLOCK_DELIMITER: &str = "---";

/// Format a list of papers as numbered text blocks.
#[must_use]
pub fn format_papers(papers: &[PaperRecord], show_score: bool) -> String {
    if papers.is_empty() {
        return NO_RESULTS.to_string();
    }

    papers
        .iter()
        .enumerate()
        .map(|(i, paper)| format_paper(paper, i + 1, show_score))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a single paper block.
#[must_use]
pub fn format_paper(paper: &PaperRecord, index: usize, show_score: bool) -> String {
    let mut lines = vec![format!("{index}. {}", paper.title)];

    if show_score {
        lines.push(format!("Relevance: {:.2}", paper.relevance_score));
    }

    lines.push(format!("Authors: {}", paper.author_names()));
    lines.push(format!("Published: {}", paper.published_date.format("%Y-%m-%d")));
    lines.push(format!("Categories: {}", paper.categories.join(", ")));
    lines.push(format!("URL: {}", paper.url));
    lines.push(format!("Summary: {}", paper.summary));
    lines.push(BLOCK_DELIMITER.to_string());

    lines.join("\n")
}
