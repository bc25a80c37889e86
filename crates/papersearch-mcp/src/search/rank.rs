//! Relevance scoring, recency windowing and ordering of candidate papers.
//!
//! # Scoring
//!
//! Each keyword contributes 2 when it occurs (case-insensitively) in the title
//! and 1 when it occurs in the summary. The sum is divided by `3 × |keywords|`.
//! The denominator spans the whole keyword set, so a paper that matches one of
//! five keywords perfectly still scores only 0.2. This is intended behavior.
//!
//! Without keywords every paper scores 1.0.

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::search;
use crate::models::{Paper, PaperRecord};

const TITLE_WEIGHT: usize = 2;
const SUMMARY_WEIGHT: usize = 1;

/// Number of candidates to request from the source for `max_results` results.
#[must_use]
pub fn candidate_count(max_results: usize) -> usize {
    max_results.saturating_mul(search::OVERFETCH_FACTOR).max(search::MIN_CANDIDATES)
}

/// Keyword relevance of a title/summary pair, in [0, 1].
#[must_use]
pub fn relevance_score(title: &str, summary: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 1.0;
    }

    let title = title.to_lowercase();
    let summary = summary.to_lowercase();

    let mut weight = 0;
    let mut total = 0;
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if title.contains(&keyword) {
            weight += TITLE_WEIGHT;
        }
        if summary.contains(&keyword) {
            weight += SUMMARY_WEIGHT;
        }
        total += TITLE_WEIGHT + SUMMARY_WEIGHT;
    }

    if total == 0 { 0.0 } else { weight as f64 / total as f64 }
}

/// Earliest publication time kept for a `days` window.
///
/// `None` when the window reaches past the representable range, i.e. keep everything.
#[must_use]
pub fn recency_cutoff(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
}

/// Score, window, sort and truncate candidate papers.
///
/// The recency window only applies when `keywords` is empty. Results are
/// ordered by score, then publication date, both descending; papers tied on
/// both keep the source order.
#[must_use]
pub fn rank<I>(
    papers: I,
    keywords: &[String],
    days: u32,
    max_results: usize,
    now: DateTime<Utc>,
) -> Vec<PaperRecord>
where
    I: IntoIterator<Item = Paper>,
{
    let cutoff = if keywords.is_empty() { recency_cutoff(now, days) } else { None };

    let mut ranked: Vec<PaperRecord> = papers
        .into_iter()
        .filter(|paper| cutoff.is_none_or(|cutoff| paper.published >= cutoff))
        .map(|paper| {
            let score = relevance_score(&paper.title, &paper.summary, keywords);
            PaperRecord::scored(paper, score)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.relevance_score
            .total_cmp(&a.relevance_score)
            .then_with(|| b.published_date.cmp(&a.published_date))
    });
    ranked.truncate(max_results);

    tracing::debug!(kept = ranked.len(), ?cutoff, "Ranked candidate papers");
    ranked
}
