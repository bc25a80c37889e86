//! Parameters of the `papersearch` tool.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::config::search;
use crate::error::{ToolError, ToolResult};

/// Input for the paper search tool.
///
/// Field names are camelCase; the snake_case spellings (`query_type`,
/// `max_results`, `show_score`) are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Recency window in days (ignored when keywords are given).
    #[serde(default = "default_days", deserialize_with = "whole_number")]
    pub days: u32,

    /// Free-text topic, the `moe inference` sentinel, or an arXiv identifier.
    #[serde(default = "default_query_type", alias = "query_type")]
    pub query_type: String,

    /// Maximum papers to return.
    #[serde(
        default = "default_max_results",
        alias = "max_results",
        deserialize_with = "whole_number"
    )]
    pub max_results: usize,

    /// arXiv category filter (e.g., "cs.LG").
    #[serde(default)]
    pub field: Option<String>,

    /// Keywords matched against title and abstract.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    /// Include the relevance score in the rendered output.
    #[serde(default, alias = "show_score")]
    pub show_score: bool,
}

fn default_days() -> u32 {
    search::DEFAULT_DAYS
}

fn default_query_type() -> String {
    search::DEFAULT_QUERY_TYPE.to_string()
}

fn default_max_results() -> usize {
    search::DEFAULT_MAX_RESULTS
}

/// Accept any JSON number with no fractional part (`7` and `7.0` alike).
#[allow(clippy::float_cmp, clippy::cast_sign_loss)]
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let whole = number.as_u64().or_else(|| {
        number
            .as_f64()
            .filter(|f| *f >= 0.0 && f.trunc() == *f && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    });

    let whole = whole.ok_or_else(|| {
        de::Error::custom(format!("expected a non-negative whole number, got {number}"))
    })?;
    T::try_from(whole).map_err(|_| de::Error::custom(format!("{number} is out of range")))
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            days: default_days(),
            query_type: default_query_type(),
            max_results: default_max_results(),
            field: None,
            keywords: None,
            show_score: false,
        }
    }
}

impl SearchRequest {
    /// Validate and normalize: blank `field` becomes `None`, blank keywords are dropped.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `maxResults` is 0.
    pub fn normalized(mut self) -> ToolResult<Self> {
        if self.max_results == 0 {
            return Err(ToolError::validation("maxResults", "must be greater than 0"));
        }

        self.field = self.field.filter(|f| !f.trim().is_empty());
        self.keywords = self
            .keywords
            .map(|kws| kws.into_iter().filter(|k| !k.trim().is_empty()).collect::<Vec<_>>())
            .filter(|kws| !kws.is_empty());

        Ok(self)
    }

    /// Keywords as a slice (empty when none were supplied).
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let req: SearchRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req, SearchRequest::default());
        assert_eq!(req.days, 7);
        assert_eq!(req.query_type, "moe");
        assert_eq!(req.max_results, 100);
        assert!(req.keywords().is_empty());
    }

    #[test]
    fn test_snake_case_aliases() {
        let req: SearchRequest = serde_json::from_value(json!({
            "query_type": "2103.03404",
            "max_results": 5,
            "show_score": true
        }))
        .unwrap();
        assert_eq!(req.query_type, "2103.03404");
        assert_eq!(req.max_results, 5);
        assert!(req.show_score);
    }

    #[test]
    fn test_null_field_and_keywords() {
        let req: SearchRequest =
            serde_json::from_value(json!({"field": null, "keywords": null})).unwrap();
        assert!(req.field.is_none());
        assert!(req.keywords().is_empty());
    }

    #[test]
    fn test_normalized_drops_blanks() {
        let req = SearchRequest {
            field: Some("  ".to_string()),
            keywords: Some(vec![String::new(), "moe".to_string(), " ".to_string()]),
            ..SearchRequest::default()
        }
        .normalized()
        .unwrap();

        assert!(req.field.is_none());
        assert_eq!(req.keywords(), ["moe".to_string()]);
    }

    #[test]
    fn test_normalized_rejects_zero_max_results() {
        let req = SearchRequest { max_results: 0, ..SearchRequest::default() };
        let err = req.normalized().unwrap_err();
        assert!(err.to_user_message().contains("maxResults"));
    }

    #[test]
    fn test_negative_days_rejected_by_type() {
        let result = serde_json::from_value::<SearchRequest>(json!({"days": -1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_integral_floats_accepted() {
        let req: SearchRequest =
            serde_json::from_value(json!({"days": 180.0, "maxResults": 10.0})).unwrap();
        assert_eq!(req.days, 180);
        assert_eq!(req.max_results, 10);
    }

    #[test]
    fn test_fractional_and_out_of_range_rejected() {
        for args in [
            json!({"days": 1.5}),
            json!({"maxResults": 2.5}),
            json!({"days": -3.0}),
            json!({"days": 5_000_000_000_u64}),
            json!({"days": "7"}),
        ] {
            let err = serde_json::from_value::<SearchRequest>(args.clone()).unwrap_err();
            assert!(!err.to_string().is_empty(), "{args} should be rejected");
        }
    }

    #[test]
    fn test_whole_number_message() {
        let err = serde_json::from_value::<SearchRequest>(json!({"days": 1.5})).unwrap_err();
        assert!(err.to_string().contains("non-negative whole number"), "{err}");
    }
}
