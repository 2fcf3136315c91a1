//! Response classification
//!
//! | Condition | Class |
//! |-----------|-------|
//! | HTTP 200 | Ok |
//! | HTTP 403 | Blocked |
//! | Any other status | Blocked |
//! | Ok, but extraction found nothing | Empty |
//!
//! Transport failures never reach the classifier; they surface as
//! [`ScoutError::Transport`](crate::ScoutError::Transport).

use crate::fetch::FetchOutcome;
use serde::Serialize;

/// Routing decision for a fetched response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseClass {
    /// The site answered with a page worth extracting
    Ok,
    /// The site refused us (403 or an unexpected status)
    Blocked,
    /// The site answered but no records could be extracted
    Empty,
}

/// Classifies a response by status code
pub fn classify(outcome: &FetchOutcome) -> ResponseClass {
    match outcome.status_code {
        200 => ResponseClass::Ok,
        _ => ResponseClass::Blocked,
    }
}

/// Refines an `Ok` classification once extraction has run
pub fn classify_extraction(class: ResponseClass, records: usize) -> ResponseClass {
    match class {
        ResponseClass::Ok if records == 0 => ResponseClass::Empty,
        other => other,
    }
}
