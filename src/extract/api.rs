//! JSON API listings
//!
//! API-backed sources return every current posting at once, so the query is
//! applied locally: a case-insensitive substring match against the title and
//! the tag list.

use crate::extract::{strip_markup, Extractor, JobRecord};
use serde_json::Value;

/// Filters an API listing down to postings matching `query`
pub struct ApiExtractor {
    needle: String,
}

impl ApiExtractor {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    /// An empty query matches everything
    fn matches(&self, title: &str, tags: &[String]) -> bool {
        self.needle.is_empty()
            || title.to_lowercase().contains(&self.needle)
            || tags.iter().any(|tag| tag.to_lowercase().contains(&self.needle))
    }
}

impl Extractor for ApiExtractor {
    fn extract(&self, body: &str, limit: usize) -> Vec<JobRecord> {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "API response is not valid JSON");
                return Vec::new();
            }
        };

        // Either a bare array or an object wrapping it under `jobs`.
        let items: &[Value] = match &value {
            Value::Array(items) => items,
            Value::Object(map) => map
                .get("jobs")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        items
            .iter()
            .filter_map(|item| {
                let title = first_str(item, &["position", "title"])?;
                let tags = tags_of(item);
                self.matches(&title, &tags).then(|| record_from_item(item, title))
            })
            .take(limit)
            .collect()
    }
}

fn record_from_item(item: &Value, title: String) -> JobRecord {
    JobRecord::new(title)
        .with_company(first_str(item, &["company", "company_name"]))
        .with_location(first_str(item, &["location", "candidate_required_location"]))
        .with_salary(salary_of(item))
        .with_snippet(first_str(item, &["description"]).map(|d| strip_markup(&d)))
        .with_url(first_str(item, &["url", "apply_url"]))
}

/// First non-blank string among `keys`
fn first_str(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn tags_of(item: &Value) -> Vec<String> {
    item.get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `salary_min`/`salary_max` in dollars, else a free-text `salary`
fn salary_of(item: &Value) -> Option<String> {
    let amount = |key: &str| item.get(key).and_then(Value::as_u64).filter(|n| *n > 0);

    match (amount("salary_min"), amount("salary_max")) {
        (Some(min), Some(max)) if min != max => Some(format!("${min} - ${max}")),
        (Some(value), _) | (None, Some(value)) => Some(format!("${value}")),
        (None, None) => first_str(item, &["salary"]),
    }
}
