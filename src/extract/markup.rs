//! Markup-based job extraction
//!
//! Job cards are located by scanning structural elements whose class list
//! matches a keyword pattern (or that carry a data attribute), then each card
//! is searched for narrower title/company/location/salary elements.

use crate::extract::{clean_text, Extractor, JobRecord};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// How candidate job containers are recognised
#[derive(Debug, Clone)]
pub enum ContainerMatch {
    /// Any class on the element matches the (case-insensitive) pattern
    ClassKeyword(Regex),

    /// The element carries this attribute, whatever its value
    Attribute(&'static str),
}

/// Locates one field inside a job container
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Accepted tag names; empty accepts any tag
    pub tags: &'static [&'static str],

    /// Class pattern the element must match; `None` accepts any element
    pub class: Option<Regex>,
}

impl FieldRule {
    pub fn new(tags: &'static [&'static str], class: Option<Regex>) -> Self {
        Self { tags, class }
    }

    fn matches(&self, element: &ElementRef<'_>) -> bool {
        tag_accepted(self.tags, element) && class_accepted(self.class.as_ref(), element)
    }
}

/// Per-source description of a job card layout
#[derive(Debug, Clone)]
pub struct MarkupRules {
    pub container_tags: &'static [&'static str],
    pub container: ContainerMatch,
    pub title: FieldRule,
    pub company: FieldRule,
    pub location: FieldRule,
    pub salary: Option<FieldRule>,
}

impl MarkupRules {
    fn is_container(&self, element: &ElementRef<'_>) -> bool {
        if !tag_accepted(self.container_tags, element) {
            return false;
        }

        match &self.container {
            ContainerMatch::ClassKeyword(pattern) => class_accepted(Some(pattern), element),
            ContainerMatch::Attribute(name) => element.value().attr(name).is_some(),
        }
    }
}

/// Extractor driven by a set of [`MarkupRules`]
pub struct MarkupExtractor<'r> {
    rules: &'r MarkupRules,
}

impl<'r> MarkupExtractor<'r> {
    pub fn new(rules: &'r MarkupRules) -> Self {
        Self { rules }
    }

    /// Builds a record from one container around its title element
    fn record_from_card(
        &self,
        card: ElementRef<'_>,
        title_el: ElementRef<'_>,
    ) -> Option<JobRecord> {
        let title = element_text(title_el);
        if title.is_empty() {
            return None;
        }

        let field = |rule: &FieldRule| find_within(card, rule).map(element_text);

        Some(
            JobRecord::new(title)
                .with_company(field(&self.rules.company))
                .with_location(field(&self.rules.location))
                .with_salary(self.rules.salary.as_ref().and_then(field))
                .with_url(link_of(title_el)),
        )
    }
}

impl Extractor for MarkupExtractor<'_> {
    fn extract(&self, body: &str, limit: usize) -> Vec<JobRecord> {
        let document = Html::parse_document(body);

        // Over-fetch: many matching containers are wrappers without a title.
        let budget = limit.saturating_mul(2);
        let candidates = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| self.rules.is_container(el));

        let mut seen_titles = HashSet::new();
        let mut accepted = HashSet::new();
        let mut examined = 0;
        let mut jobs = Vec::new();

        for card in candidates {
            if examined >= budget || jobs.len() >= limit {
                break;
            }

            // Nested matches (`job-card` > `job-card__header`) share the
            // outer card's title and do not count against the budget.
            let title_el = find_within(card, &self.rules.title);
            match title_el {
                Some(title_el) if !seen_titles.insert(title_el.id()) => {
                    tracing::trace!(tag = card.value().name(), "Skipping nested container");
                    continue;
                }
                None if card.ancestors().any(|a| accepted.contains(&a.id())) => continue,
                _ => {}
            }
            examined += 1;

            match title_el.and_then(|title_el| self.record_from_card(card, title_el)) {
                Some(record) => {
                    accepted.insert(card.id());
                    jobs.push(record);
                }
                None => tracing::trace!(
                    tag = card.value().name(),
                    "Skipping container without a title"
                ),
            }
        }

        tracing::debug!(examined, found = jobs.len(), limit, "Matched job containers");
        jobs
    }
}

/// First descendant of `card` (excluding itself) matching `rule`
fn find_within<'a>(card: ElementRef<'a>, rule: &FieldRule) -> Option<ElementRef<'a>> {
    card.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| rule.matches(el))
}

fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// href of the element itself or of the first link inside it
fn link_of(element: ElementRef<'_>) -> Option<String> {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a" && el.value().attr("href").is_some())
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
}

fn tag_accepted(tags: &[&str], element: &ElementRef<'_>) -> bool {
    tags.is_empty() || tags.contains(&element.value().name())
}

fn class_accepted(pattern: Option<&Regex>, element: &ElementRef<'_>) -> bool {
    match pattern {
        Some(pattern) => element.value().classes().any(|class| pattern.is_match(class)),
        None => true,
    }
}
