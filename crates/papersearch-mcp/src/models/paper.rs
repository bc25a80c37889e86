//! Paper records as delivered by the arXiv feed and as returned to callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A raw paper from the retrieval source, before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Entry id as given by the feed (e.g., "http://arxiv.org/abs/2103.03404v1").
    pub id: String,

    /// Paper title with whitespace collapsed.
    pub title: String,

    /// Author names in feed order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Abstract.
    #[serde(default)]
    pub summary: String,

    /// Direct PDF link.
    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Abstract page link.
    #[serde(default)]
    pub abs_url: Option<String>,

    /// First-version publication timestamp.
    pub published: DateTime<Utc>,

    /// Category terms in feed order (e.g., "cs.LG").
    #[serde(default)]
    pub categories: Vec<String>,

    /// Primary category term.
    #[serde(default)]
    pub primary_category: Option<String>,
}

impl Paper {
    /// Best link for the paper: PDF, then abstract page, then the entry id.
    #[must_use]
    pub fn url(&self) -> &str {
        self.pdf_url.as_deref().or(self.abs_url.as_deref()).unwrap_or(&self.id)
    }

    /// Calendar date of first publication.
    #[must_use]
    pub fn published_date(&self) -> NaiveDate {
        self.published.date_naive()
    }
}

/// A paper enriched with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// Paper title.
    pub title: String,

    /// Author names in feed order.
    pub authors: Vec<String>,

    /// Abstract.
    pub summary: String,

    /// Link to the paper.
    pub url: String,

    /// Calendar date of first publication.
    pub published_date: NaiveDate,

    /// Category terms.
    pub categories: Vec<String>,

    /// Keyword relevance in [0, 1].
    pub relevance_score: f64,
}

impl PaperRecord {
    /// Score assigned to papers fetched by exact identifier.
    pub const EXACT_MATCH_SCORE: f64 = 1.0;

    /// Build a record from a raw paper and its score.
    #[must_use]
    pub fn scored(paper: Paper, relevance_score: f64) -> Self {
        let url = paper.url().to_string();
        let published_date = paper.published_date();
        Self {
            title: paper.title,
            authors: paper.authors,
            summary: paper.summary,
            url,
            published_date,
            categories: paper.categories,
            relevance_score,
        }
    }

    /// Build a record for an identifier lookup hit.
    #[must_use]
    pub fn exact_match(paper: Paper) -> Self {
        Self::scored(paper, Self::EXACT_MATCH_SCORE)
    }

    /// Author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }
}
