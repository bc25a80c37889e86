//! Formatter tests for the plain-text tool output.
//!
//! Tests output correctness, edge cases, and special character handling.

use chrono::NaiveDate;

use papersearch_mcp::formatters::{self, BLOCK_DELIMITER, NO_RESULTS};
use papersearch_mcp::models::PaperRecord;

// =============================================================================
// Helper Functions
// =============================================================================

fn make_record(title: &str, score: f64) -> PaperRecord {
    PaperRecord {
        title: title.to_string(),
        authors: vec!["Noam Shazeer".to_string(), "Azalia Mirhoseini".to_string()],
        summary: "We introduce a Sparsely-Gated Mixture-of-Experts layer.".to_string(),
        url: "http://arxiv.org/pdf/1701.06538v1".to_string(),
        published_date: NaiveDate::from_ymd_opt(2017, 1, 23).unwrap(),
        categories: vec!["cs.LG".to_string(), "cs.CL".to_string(), "stat.ML".to_string()],
        relevance_score: score,
    }
}

// =============================================================================
// Paper Formatting Tests
// =============================================================================

#[test]
fn test_format_two_papers() {
    let papers = vec![
        make_record("Outrageously Large Neural Networks", 1.0),
        PaperRecord {
            authors: vec!["Solo Author".to_string()],
            categories: vec!["cs.AI".to_string()],
            ..make_record("Switch Transformers", 0.5)
        },
    ];

    let output = formatters::format_papers(&papers, false);

    insta::assert_snapshot!(output, @r"
    1. Outrageously Large Neural Networks
    Authors: Noam Shazeer, Azalia Mirhoseini
    Published: 2017-01-23
    Categories: cs.LG, cs.CL, stat.ML
    URL: http://arxiv.org/pdf/1701.06538v1
    Summary: We introduce a Sparsely-Gated Mixture-of-Experts layer.
    ---

    2. Switch Transformers
    Authors: Solo Author
    Published: 2017-01-23
    Categories: cs.AI
    URL: http://arxiv.org/pdf/1701.06538v1
    Summary: We introduce a Sparsely-Gated Mixture-of-Experts layer.
    ---
    ");
}

#[test]
fn test_format_with_scores() {
    let papers = vec![make_record("A", 1.0), make_record("B", 1.0 / 3.0), make_record("C", 0.0)];
    let output = formatters::format_papers(&papers, true);

    let scores: Vec<_> = output.lines().filter(|l| l.starts_with("Relevance: ")).collect();
    assert_eq!(scores, vec!["Relevance: 1.00", "Relevance: 0.33", "Relevance: 0.00"]);
}

#[test]
fn test_score_line_hidden_by_default() {
    let output = formatters::format_papers(&[make_record("A", 0.25)], false);
    assert!(!output.contains("Relevance"));
}

#[test]
fn test_empty_list_is_sentinel() {
    assert_eq!(formatters::format_papers(&[], false), NO_RESULTS);
}

#[test]
fn test_every_block_closed_by_delimiter() {
    let papers: Vec<_> = (0..4).map(|i| make_record(&format!("Paper {i}"), 1.0)).collect();
    let output = formatters::format_papers(&papers, false);

    let blocks: Vec<_> = output.split("\n\n").collect();
    assert_eq!(blocks.len(), 4);
    for (i, block) in blocks.iter().enumerate() {
        assert!(block.starts_with(&format!("{}. Paper {i}\n", i + 1)));
        assert!(block.ends_with(BLOCK_DELIMITER));
    }
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_no_authors_or_categories() {
    let record = PaperRecord { authors: vec![], categories: vec![], ..make_record("Bare", 1.0) };
    let output = formatters::format_paper(&record, 1, false);

    assert!(output.contains("\nAuthors: \n"));
    assert!(output.contains("\nCategories: \n"));
}

#[test]
fn test_special_characters_pass_through() {
    let record = PaperRecord {
        title: "Ünïcödé & <Markup> *stars*".to_string(),
        summary: "Math: $O(n^2)$ | pipes".to_string(),
        ..make_record("x", 1.0)
    };
    let output = formatters::format_paper(&record, 12, false);

    assert!(output.starts_with("12. Ünïcödé & <Markup> *stars*\n"));
    assert!(output.contains("Summary: Math: $O(n^2)$ | pipes\n"));
}
