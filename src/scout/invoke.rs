//! Named-operation dispatch
//!
//! The calling layer addresses operations by name with JSON arguments and
//! always receives a JSON envelope back.

use crate::scout::{Scout, SearchRequest};
use serde::Serialize;
use serde_json::{json, Value};

/// Operation names accepted by [`Scout::invoke`]
pub const OPERATIONS: &[&str] = &["search_jobs", "test_proxy", "get_proxy_info", "get_scraper_info"];

impl Scout {
    /// Runs `operation` with JSON `arguments`
    ///
    /// Unknown operations and undecodable arguments produce
    /// `{success: false, error, available_operations}`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn demo(scout: job_scout::Scout) {
    /// let result = scout
    ///     .invoke("search_jobs", serde_json::json!({"query": "rust", "site": "reed"}))
    ///     .await;
    /// println!("{}", result["message"]);
    /// # }
    /// ```
    pub async fn invoke(&self, operation: &str, arguments: Value) -> Value {
        tracing::debug!(operation, "Invoking operation");

        match operation {
            "search_jobs" => match serde_json::from_value::<SearchRequest>(arguments) {
                Ok(request) => to_json(&self.search_jobs(request).await),
                Err(e) => invalid(format!("Invalid arguments for search_jobs: {}", e)),
            },
            "test_proxy" => to_json(&self.test_proxy().await),
            "get_proxy_info" => to_json(&self.proxy_info()),
            "get_scraper_info" => to_json(&self.scraper_info()),
            other => invalid(format!("Unknown operation: {}", other)),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| invalid(format!("Serialization failed: {}", e)))
}

fn invalid(error: String) -> Value {
    tracing::warn!(error = %error, "Operation rejected");
    json!({
        "success": false,
        "error": error,
        "available_operations": OPERATIONS,
    })
}
