//! JSON-LD `JobPosting` extraction
//!
//! Job boards that render server-side usually embed schema.org `JobPosting`
//! objects in `<script type="application/ld+json">` blocks. Blocks are found by
//! pattern search over the raw body and parsed one by one; a malformed block
//! is skipped without affecting its neighbours.

use crate::extract::{strip_markup, Extractor, JobRecord};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static LD_JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("static regex")
});

/// Extractor for embedded structured job data
pub struct StructuredDataExtractor;

impl Extractor for StructuredDataExtractor {
    fn extract(&self, body: &str, limit: usize) -> Vec<JobRecord> {
        let mut jobs = Vec::new();

        for (index, captures) in LD_JSON_BLOCK.captures_iter(body).enumerate() {
            let raw = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();

            let value: Value = match serde_json::from_str(raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::debug!(block = index, error = %e, "Skipping malformed JSON-LD block");
                    continue;
                }
            };

            for posting in job_postings(&value) {
                match record_from_posting(posting) {
                    Some(record) => jobs.push(record),
                    None => tracing::trace!(block = index, "JobPosting without a title"),
                }
                if jobs.len() >= limit {
                    return jobs;
                }
            }
        }

        jobs
    }
}

/// Collects `JobPosting` objects from a single object, an array, or an `@graph`
fn job_postings(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(job_postings).collect(),
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                return job_postings(graph);
            }
            if is_job_posting(value) {
                vec![value]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

fn is_job_posting(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == "JobPosting",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("JobPosting")),
        _ => false,
    }
}

fn record_from_posting(posting: &Value) -> Option<JobRecord> {
    let title = posting.get("title").and_then(Value::as_str)?.trim();
    if title.is_empty() {
        return None;
    }

    Some(
        JobRecord::new(strip_markup(title))
            .with_company(hiring_organization(posting))
            .with_location(locality(posting))
            .with_salary(posting.get("baseSalary").and_then(format_salary))
            .with_snippet(
                posting
                    .get("description")
                    .and_then(Value::as_str)
                    .map(strip_markup),
            )
            .with_url(posting.get("url").and_then(Value::as_str).map(str::to_string)),
    )
}

/// `hiringOrganization` may be an object with a `name` or a bare string
fn hiring_organization(posting: &Value) -> Option<String> {
    match posting.get("hiringOrganization")? {
        Value::String(name) => Some(name.clone()),
        org => org.get("name").and_then(Value::as_str).map(str::to_string),
    }
}

/// `jobLocation.address.addressLocality`, taking the first of several locations
fn locality(posting: &Value) -> Option<String> {
    let location = match posting.get("jobLocation")? {
        Value::Array(locations) => locations.first()?,
        other => other,
    };

    match location.get("address")? {
        Value::String(address) => Some(address.clone()),
        address => address
            .get("addressLocality")
            .or_else(|| address.get("addressRegion"))
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Formats `baseSalary` as `£min - £max`, or a single amount when only one is known
fn format_salary(base_salary: &Value) -> Option<String> {
    let symbol = currency_symbol(base_salary.get("currency").and_then(Value::as_str));

    let (min, max) = match base_salary.get("value") {
        Some(value @ Value::Object(_)) => (
            value.get("minValue").and_then(format_amount),
            value
                .get("maxValue")
                .or_else(|| value.get("value"))
                .and_then(format_amount),
        ),
        Some(amount) => (format_amount(amount), None),
        None => (None, None),
    };

    match (min, max) {
        (Some(min), Some(max)) if min != max => Some(format!("{symbol}{min} - {symbol}{max}")),
        (Some(amount), _) | (None, Some(amount)) => Some(format!("{symbol}{amount}")),
        (None, None) => None,
    }
}

fn format_amount(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 {
                    Some(format!("{:.0}", f))
                } else {
                    Some(format!("{:.2}", f))
                }
            }
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn currency_symbol(code: Option<&str>) -> String {
    match code.map(str::to_ascii_uppercase).as_deref() {
        None | Some("GBP") => "£".to_string(),
        Some("USD") => "$".to_string(),
        Some("EUR") => "€".to_string(),
        Some(other) => format!("{} ", other),
    }
}
