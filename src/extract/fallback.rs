//! Synthetic demo listings
//!
//! Used whenever a source blocks the request or yields nothing extractable.
//! The output is a pure function of its inputs so callers and tests see the
//! same catalog every time. Every record carries a snippet stating it is
//! synthetic, in addition to the envelope's own disclosure.

use crate::extract::JobRecord;

/// Snippet attached to every synthetic record
pub const SYNTHETIC_NOTICE: &str = "Demo listing: live results were unavailable";

/// Title used when the query is blank
const DEFAULT_ROLE: &str = "Software Engineer";

/// Title template, company, city, salary band
const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("Senior {}", "Tech Solutions Ltd", "London", "£60k-£80k"),
    ("{} Developer", "Digital Innovations", "Manchester", "£50k-£70k"),
    ("Lead {}", "FinTech Corp", "Edinburgh", "£70k-£90k"),
    ("Junior {}", "StartUp Hub", "Bristol", "£35k-£45k"),
    ("Principal {}", "Enterprise Co", "Birmingham", "£80k-£100k"),
    ("Staff {}", "Cloudline Inc", "New York, NY", "$150k-$180k"),
    ("{} Engineer", "Northwind Labs", "Austin, TX", "$110k-$140k"),
    ("Remote {}", "Harbor Systems", "San Francisco, CA", "$130k-$160k"),
];

/// Generates up to `limit` synthetic records templated from `query`
///
/// When `location` is non-blank every record uses it; otherwise the catalog's
/// cities are used.
pub fn generate_fallback(query: &str, location: &str, limit: usize) -> Vec<JobRecord> {
    let role = match title_case(query) {
        role if role.is_empty() => DEFAULT_ROLE.to_string(),
        role => role,
    };
    let location = title_case(location);

    CATALOG
        .iter()
        .take(limit)
        .map(|(template, company, city, salary)| {
            let place = if location.is_empty() { *city } else { location.as_str() };
            JobRecord::new(template.replace("{}", &role))
                .with_company(Some(company.to_string()))
                .with_location(Some(place.to_string()))
                .with_salary(Some(salary.to_string()))
                .with_snippet(Some(SYNTHETIC_NOTICE.to_string()))
        })
        .collect()
}

/// Upper-cases the first letter of each word and lower-cases the rest
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
