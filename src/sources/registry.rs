//! Registered job sources
//!
//! Each source pairs connection parameters (base URL and path templates) with
//! the extraction strategy that understands its responses.

use crate::extract::{ContainerMatch, ExtractionStrategy, FieldRule, MarkupRules, RegexFieldRules};
use crate::{Result, ScoutError};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

fn keyword(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("static keyword pattern")
}

static JOB_OR_RESULT: LazyLock<Regex> = LazyLock::new(|| keyword("job|result"));
static JOB: LazyLock<Regex> = LazyLock::new(|| keyword("job"));
static TITLE_OR_JOB_TITLE: LazyLock<Regex> = LazyLock::new(|| keyword("title|job-title"));
static TITLE: LazyLock<Regex> = LazyLock::new(|| keyword("title"));
static COMPANY_OR_EMPLOYER: LazyLock<Regex> = LazyLock::new(|| keyword("company|employer"));
static COMPANY: LazyLock<Regex> = LazyLock::new(|| keyword("company"));
static LOCATION: LazyLock<Regex> = LazyLock::new(|| keyword("location"));
static SALARY: LazyLock<Regex> = LazyLock::new(|| keyword("salary"));

static SERP_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<h2[^>]*data-testid="searchSerpJobTitle"[^>]*>(.*?)</h2>"#)
        .expect("static regex")
});
static SERP_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span[^>]*data-testid="companyName"[^>]*>(.*?)</span>"#)
        .expect("static regex")
});
static SERP_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span[^>]*data-testid="searchSerpJobLocation"[^>]*>(.*?)</span>"#)
        .expect("static regex")
});
static SERP_SNIPPET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p[^>]*data-testid="searchSerpJobSnippet"[^>]*>(.*?)</p>"#)
        .expect("static regex")
});

/// Informational rating of how often a source blocks proxied traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// How query and location are inserted into a path template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStyle {
    /// Lower-cased, spaces replaced by hyphens (`/jobs/rust-developer-jobs`)
    Slug,
    /// Form-encoded, for templates that put values in a query string
    Encoded,
}

/// Connection and extraction parameters for one source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub base_url: String,

    /// Template used when a location is supplied; `{query}` and `{location}`
    pub search_path: Option<&'static str>,

    /// Template used without a location; `{query}` only
    pub search_path_no_loc: Option<&'static str>,

    pub url_style: UrlStyle,
    pub strategy: ExtractionStrategy,
    pub difficulty: Difficulty,

    /// Location label echoed when the caller gives none
    pub default_location: &'static str,
}

impl SourceConfig {
    /// Returns true for sources that never return live listings
    pub fn is_synthetic(&self) -> bool {
        self.strategy.is_synthetic()
    }
}

/// Lookup table from source identifier to [`SourceConfig`]
///
/// Registration order is preserved and used wherever sources are listed.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceConfig>) -> Self {
        Self { sources }
    }

    /// The built-in job boards, APIs and the proxy demo source
    pub fn builtin() -> Self {
        Self::new(vec![
            SourceConfig {
                id: "reed",
                name: "Reed.co.uk",
                base_url: "https://www.reed.co.uk".to_string(),
                search_path: Some("/jobs/{query}-jobs-in-{location}"),
                search_path_no_loc: Some("/jobs/{query}-jobs"),
                url_style: UrlStyle::Slug,
                strategy: ExtractionStrategy::Markup(MarkupRules {
                    container_tags: &["article", "div"],
                    container: ContainerMatch::ClassKeyword(JOB_OR_RESULT.clone()),
                    title: FieldRule::new(&["h2", "h3", "a"], Some(TITLE_OR_JOB_TITLE.clone())),
                    company: FieldRule::new(
                        &["span", "div", "a"],
                        Some(COMPANY_OR_EMPLOYER.clone()),
                    ),
                    location: FieldRule::new(&["span", "div"], Some(LOCATION.clone())),
                    salary: Some(FieldRule::new(&["span", "div"], Some(SALARY.clone()))),
                }),
                difficulty: Difficulty::Easy,
                default_location: "UK-wide",
            },
            SourceConfig {
                id: "cwjobs",
                name: "CWJobs",
                base_url: "https://www.cwjobs.co.uk".to_string(),
                search_path: Some("/jobs/{query}/in-{location}"),
                search_path_no_loc: Some("/jobs/{query}"),
                url_style: UrlStyle::Slug,
                strategy: ExtractionStrategy::Markup(MarkupRules {
                    container_tags: &["div", "article"],
                    container: ContainerMatch::ClassKeyword(JOB.clone()),
                    title: FieldRule::new(&["h2", "a"], Some(TITLE.clone())),
                    company: FieldRule::new(&["span", "div"], Some(COMPANY.clone())),
                    location: FieldRule::new(&["span", "div"], Some(LOCATION.clone())),
                    salary: None,
                }),
                difficulty: Difficulty::Medium,
                default_location: "UK-wide",
            },
            SourceConfig {
                id: "totaljobs",
                name: "Totaljobs",
                base_url: "https://www.totaljobs.com".to_string(),
                search_path: Some("/jobs/{query}/in-{location}"),
                search_path_no_loc: Some("/jobs/{query}"),
                url_style: UrlStyle::Slug,
                strategy: ExtractionStrategy::Markup(MarkupRules {
                    container_tags: &["div", "article"],
                    container: ContainerMatch::Attribute("data-job-id"),
                    title: FieldRule::new(&["h2", "a"], None),
                    company: FieldRule::new(&[], Some(COMPANY.clone())),
                    location: FieldRule::new(&[], Some(LOCATION.clone())),
                    salary: None,
                }),
                difficulty: Difficulty::Medium,
                default_location: "UK-wide",
            },
            SourceConfig {
                id: "guardian",
                name: "Guardian Jobs",
                base_url: "https://jobs.theguardian.com".to_string(),
                search_path: Some("/jobs/{query}/{location}/"),
                search_path_no_loc: Some("/jobs/{query}/"),
                url_style: UrlStyle::Slug,
                strategy: ExtractionStrategy::StructuredData,
                difficulty: Difficulty::Medium,
                default_location: "UK-wide",
            },
            SourceConfig {
                id: "simplyhired",
                name: "SimplyHired",
                base_url: "https://www.simplyhired.co.uk".to_string(),
                search_path: Some("/search?q={query}&l={location}"),
                search_path_no_loc: Some("/search?q={query}"),
                url_style: UrlStyle::Encoded,
                strategy: ExtractionStrategy::RegexFields(RegexFieldRules {
                    title: SERP_TITLE.clone(),
                    company: SERP_COMPANY.clone(),
                    location: SERP_LOCATION.clone(),
                    snippet: SERP_SNIPPET.clone(),
                }),
                difficulty: Difficulty::Hard,
                default_location: "UK-wide",
            },
            SourceConfig {
                id: "remoteok",
                name: "Remote OK",
                base_url: "https://remoteok.com".to_string(),
                search_path: Some("/api"),
                search_path_no_loc: Some("/api"),
                url_style: UrlStyle::Encoded,
                strategy: ExtractionStrategy::ApiJson,
                difficulty: Difficulty::Easy,
                default_location: "Worldwide",
            },
            SourceConfig {
                id: "httpbin-demo",
                name: "HTTPBin Demo",
                base_url: "http://httpbin.org".to_string(),
                search_path: None,
                search_path_no_loc: None,
                url_style: UrlStyle::Encoded,
                strategy: ExtractionStrategy::ProxyRotationDemo,
                difficulty: Difficulty::Easy,
                default_location: "Worldwide",
            },
        ])
    }

    /// Resolves an identifier (trimmed, case-insensitive)
    ///
    /// # Returns
    ///
    /// * `Ok(&SourceConfig)` - The registered source
    /// * `Err(ScoutError::UnknownSource)` - Listing every registered identifier
    pub fn resolve(&self, id: &str) -> Result<&SourceConfig> {
        let wanted = normalize_id(id);
        self.sources
            .iter()
            .find(|source| source.id == wanted)
            .ok_or_else(|| ScoutError::UnknownSource {
                id: id.to_string(),
                available: self.ids(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_ok()
    }

    /// Every registered identifier, in registration order
    pub fn ids(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.id.to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter()
    }

    /// Replaces a source's base URL; returns false when the id is unknown
    ///
    /// The id is matched the same way as [`resolve`](Self::resolve).
    pub fn set_base_url(&mut self, id: &str, base_url: impl Into<String>) -> bool {
        let wanted = normalize_id(id);
        match self.sources.iter_mut().find(|s| s.id == wanted) {
            Some(source) => {
                source.base_url = base_url.into();
                true
            }
            None => false,
        }
    }

    /// Applies `[sources]` overrides from the configuration
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (id, base_url) in overrides {
            if !self.set_base_url(id, base_url.clone()) {
                tracing::warn!(source = %id, "Ignoring base URL override for unknown source");
            }
        }
        self
    }
}

/// Identifiers are compared trimmed and ASCII-lowercased
fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}
