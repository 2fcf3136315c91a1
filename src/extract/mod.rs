//! Job extraction from raw response bodies
//!
//! This module turns a fetched body into an ordered, bounded list of
//! [`JobRecord`]s. Each source declares an [`ExtractionStrategy`]:
//! - Markup matching, with containers selected by class keyword or by a data attribute
//! - Structured-data extraction of embedded JSON-LD `JobPosting` blocks
//! - Positional regex field extraction
//! - Direct JSON filtering for API-backed sources
//!
//! Extraction never fails: records that cannot be built are skipped and an
//! unusable body simply yields an empty list.

mod api;
mod fallback;
mod markup;
mod regex_fields;
mod structured;

pub use api::ApiExtractor;
pub use fallback::{generate_fallback, title_case};
pub use markup::{ContainerMatch, FieldRule, MarkupExtractor, MarkupRules};
pub use regex_fields::{RegexFieldExtractor, RegexFieldRules};
pub use structured::StructuredDataExtractor;

use scraper::Html;
use serde::{Deserialize, Serialize};

/// Placeholder for a field the source did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing salary
pub const NOT_SPECIFIED: &str = "Not specified";

/// Longest snippet kept on a record, in characters
pub const SNIPPET_MAX_CHARS: usize = 200;

/// A normalized job posting
///
/// Required fields are always present; missing values carry the
/// [`NOT_AVAILABLE`] / [`NOT_SPECIFIED`] sentinels so every source yields the
/// same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl JobRecord {
    /// Creates a record with the given title and sentinel values elsewhere
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: NOT_AVAILABLE.to_string(),
            location: NOT_AVAILABLE.to_string(),
            salary: NOT_SPECIFIED.to_string(),
            snippet: None,
            url: None,
        }
    }

    pub fn with_company(mut self, company: Option<String>) -> Self {
        self.company = or_sentinel(company, NOT_AVAILABLE);
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = or_sentinel(location, NOT_AVAILABLE);
        self
    }

    pub fn with_salary(mut self, salary: Option<String>) -> Self {
        self.salary = or_sentinel(salary, NOT_SPECIFIED);
        self
    }

    pub fn with_snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = snippet
            .filter(|s| !s.is_empty())
            .map(|s| truncate_chars(&s, SNIPPET_MAX_CHARS));
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url.filter(|u| !u.is_empty());
        self
    }
}

/// Common contract of every extraction strategy
pub trait Extractor {
    /// Extracts at most `limit` records, in document order
    fn extract(&self, body: &str, limit: usize) -> Vec<JobRecord>;
}

/// How a source's response body is turned into job records
#[derive(Debug, Clone)]
pub enum ExtractionStrategy {
    /// Container elements located by class keyword or data attribute
    Markup(MarkupRules),

    /// Embedded JSON-LD `JobPosting` blocks
    StructuredData,

    /// Independent regex passes zipped positionally
    RegexFields(RegexFieldRules),

    /// JSON API listing filtered by the query
    ApiJson,

    /// No extraction; the source only demonstrates proxy IP rotation
    ProxyRotationDemo,
}

impl ExtractionStrategy {
    /// Short tag used in logs and the scraper info record
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Markup(rules) => match rules.container {
                ContainerMatch::ClassKeyword(_) => "heuristic-markup",
                ContainerMatch::Attribute(_) => "attribute-markup",
            },
            Self::StructuredData => "structured-data",
            Self::RegexFields(_) => "regex-fields",
            Self::ApiJson => "api-json",
            Self::ProxyRotationDemo => "proxy-rotation-demo",
        }
    }

    /// Returns true for sources that never produce live listings
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::ProxyRotationDemo)
    }

    /// Runs the strategy over `body`
    ///
    /// `query` is only consulted by strategies that filter locally (API
    /// sources); markup sources already received it in the URL.
    pub fn extract(&self, body: &str, query: &str, limit: usize) -> Vec<JobRecord> {
        if limit == 0 {
            return Vec::new();
        }

        match self {
            Self::Markup(rules) => MarkupExtractor::new(rules).extract(body, limit),
            Self::StructuredData => StructuredDataExtractor.extract(body, limit),
            Self::RegexFields(rules) => RegexFieldExtractor::new(rules).extract(body, limit),
            Self::ApiJson => ApiExtractor::new(query).extract(body, limit),
            Self::ProxyRotationDemo => Vec::new(),
        }
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips tags and decodes entities from an HTML fragment
pub fn strip_markup(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    clean_text(&parsed.root_element().text().collect::<String>())
}

/// Truncates to at most `max` characters, appending an ellipsis when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push('…');
    cut
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    value
        .map(|v| clean_text(&v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| sentinel.to_string())
}
