use serde_json::{Number, Value};
use url::Url;

use crate::{warn_time, Result};

const SEARCH_PATH: [&str; 3] = ["api", "jobs", "search"];

/// One (query, page) pair plus the filters shared by the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub page: u32,
    pub country: &'a str,
    pub date_posted: &'a str,
}

/// Builds `{base_url}/api/jobs/search?query=..&page=..&country=..&date_posted=..`.
///
/// The search path is appended to whatever path the base URL already has, so a backend
/// mounted under a prefix keeps working. Any query string or fragment on the base is dropped.
/// Parameters are form-urlencoded and always come out in the same order.
pub fn build_search_url(base_url: &Url, req: &SearchRequest<'_>) -> Url {
    let mut url = base_url.clone();
    // Only `cannot-be-a-base` URLs fail here and config rejects those up front.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(SEARCH_PATH);
    }
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair("query", req.query)
        .append_pair("page", &req.page.to_string())
        .append_pair("country", req.country)
        .append_pair("date_posted", req.date_posted);
    url
}

/// Reads the job `count` out of a search response body.
/// Errors only when the body isn't JSON at all, a missing or odd `count` is just 0.
pub fn parse_count(body: &str) -> Result<u64> {
    let json: Value = serde_json::from_str(body)?;
    Ok(count_from_json(&json))
}

fn count_from_json(json: &Value) -> u64 {
    match json.get("count") {
        Some(Value::Number(n)) => count_from_number(n),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_count))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[inline]
fn count_from_number(n: &Number) -> u64 {
    n.as_u64()
        .or_else(|| n.as_f64().map(truncate_count))
        .unwrap_or(0)
}

/// Negative and non-finite counts don't add anything.
/// Counts past `u64::MAX` are clamped to it and reported.
#[inline]
fn truncate_count(f: f64) -> u64 {
    if !f.is_finite() || f <= 0.0 {
        return 0;
    }
    if f >= u64::MAX as f64 {
        warn_time!("Count {} is out of range, clamping to {}", f, u64::MAX);
        return u64::MAX;
    }
    f.trunc() as u64
}
