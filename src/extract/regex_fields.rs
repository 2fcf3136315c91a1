//! Positional regex field extraction
//!
//! Four independent passes collect every title, company, location and snippet
//! in the body. Records are assembled by index, so the i-th title is paired
//! with the i-th company and so on. When the lists have different lengths the
//! output stops at the shortest one and the trailing entries of the longer
//! lists are dropped; no attempt is made to realign them.

use crate::extract::{strip_markup, Extractor, JobRecord, NOT_AVAILABLE};
use regex::Regex;

/// One pattern per field; capture group 1 holds the field's markup
#[derive(Debug, Clone)]
pub struct RegexFieldRules {
    pub title: Regex,
    pub company: Regex,
    pub location: Regex,
    pub snippet: Regex,
}

pub struct RegexFieldExtractor<'r> {
    rules: &'r RegexFieldRules,
}

impl<'r> RegexFieldExtractor<'r> {
    pub fn new(rules: &'r RegexFieldRules) -> Self {
        Self { rules }
    }
}

impl Extractor for RegexFieldExtractor<'_> {
    fn extract(&self, body: &str, limit: usize) -> Vec<JobRecord> {
        let titles = capture_all(&self.rules.title, body);
        let companies = capture_all(&self.rules.company, body);
        let locations = capture_all(&self.rules.location, body);
        let snippets = capture_all(&self.rules.snippet, body);

        let lengths = [titles.len(), companies.len(), locations.len(), snippets.len()];
        if lengths.iter().any(|&len| len != lengths[0]) {
            tracing::warn!(
                titles = titles.len(),
                companies = companies.len(),
                locations = locations.len(),
                snippets = snippets.len(),
                "Field counts differ; records beyond the shortest list are dropped"
            );
        }

        titles
            .into_iter()
            .zip(companies)
            .zip(locations)
            .zip(snippets)
            .take(limit)
            .map(|(((title, company), location), snippet)| {
                JobRecord::new(title)
                    .with_company(Some(company))
                    .with_location(Some(location))
                    .with_snippet(Some(snippet))
            })
            .collect()
    }
}

/// Every group-1 capture, with tags stripped; blank captures keep their slot
fn capture_all(pattern: &Regex, body: &str) -> Vec<String> {
    pattern
        .captures_iter(body)
        .map(|caps| {
            let text = caps.get(1).map(|m| strip_markup(m.as_str())).unwrap_or_default();
            if text.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                text
            }
        })
        .collect()
}
