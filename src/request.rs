use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::search::parse_count;
use crate::{Error, Result, BODY_SNIPPET_CHARS};

/// What a single search request amounted to. Nothing here is fatal to the run.
#[derive(Debug)]
pub enum PageOutcome {
    /// 2xx with the job count the backend reported.
    Counted(u64),
    /// Non-2xx, with the start of the response body.
    BadStatus {
        status: StatusCode,
        body_snippet: String,
    },
    /// Transport failure, timeout, or a body that isn't JSON.
    Failed(Error),
}

impl PageOutcome {
    /// Jobs this request adds to the run total.
    pub fn count(&self) -> u64 {
        match self {
            PageOutcome::Counted(n) => *n,
            _ => 0,
        }
    }
}

/// Client shared by every request of a run. Each request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(client)
}

/// Requests one search page and classifies the response.
pub async fn request_page(client: &Client, url: Url) -> PageOutcome {
    let res = match client.get(url).send().await {
        Ok(res) => res,
        Err(e) => return PageOutcome::Failed(e.into()),
    };

    let status = res.status();
    let body = match res.text().await {
        Ok(body) => body,
        Err(e) if status.is_success() => return PageOutcome::Failed(e.into()),
        // The status alone is enough to report a failed page.
        Err(_) => String::new(),
    };

    if !status.is_success() {
        return PageOutcome::BadStatus {
            status,
            body_snippet: snippet(&body),
        };
    }

    match parse_count(&body) {
        Ok(count) => PageOutcome::Counted(count),
        Err(e) => PageOutcome::Failed(e),
    }
}

/// First `BODY_SNIPPET_CHARS` characters, cut on a char boundary.
fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
