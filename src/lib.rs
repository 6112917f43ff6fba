//! Batch job ingestion.
//! Walks every (query, page) pair against the backend search endpoint and sums up
//! the job counts the backend reports back.

pub mod config;
mod error;
pub mod ingest;
mod macros;
pub mod request;
pub mod search;

pub use error::{Error, Result};

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const DEFAULT_QUERIES: [&str; 3] = ["software engineer", "software developer", "SWE"];
const DEFAULT_START_PAGE: u32 = 1;
const DEFAULT_PAGES: u32 = 3;
const DEFAULT_COUNTRY: &str = "us";
const DEFAULT_DATE_POSTED: &str = "week";
const DEFAULT_DELAY_SECS: f64 = 1.0;
const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
/// How much of a failed response body ends up in the log line.
const BODY_SNIPPET_CHARS: usize = 200;
