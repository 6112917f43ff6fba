use chrono::Local;
use reqwest::Client;

use crate::config::IngestConfig;
use crate::request::{request_page, PageOutcome};
use crate::search::build_search_url;
use crate::{info_time, warn_time};

/// Totals for one run. `attempts == succeeded + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub total_jobs: u64,
    pub attempts: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl IngestSummary {
    fn record(&mut self, outcome: &PageOutcome) {
        self.attempts += 1;
        match outcome {
            PageOutcome::Counted(_) => self.succeeded += 1,
            PageOutcome::BadStatus { .. } | PageOutcome::Failed(_) => self.failed += 1,
        }
        // Pinned at u64::MAX rather than wrapping on absurd backend counts.
        self.total_jobs = self.total_jobs.saturating_add(outcome.count());
    }
}

/// Requests every (query, page) pair of the config one after another and sums up the job counts.
///
/// Failed pages are logged and skipped, the run always goes through the whole batch.
/// `config.delay` is slept between consecutive requests, never after the last one.
pub async fn run_ingest(client: &Client, config: &IngestConfig) -> IngestSummary {
    let start_time = Local::now();
    let total_requests = config.total_requests();
    let mut summary = IngestSummary::default();

    for req in config.search_requests() {
        let url = build_search_url(&config.base_url, &req);
        info_time!(
            "Ingesting: query='{}', page={}, country={}, date_posted={}",
            req.query,
            req.page,
            req.country,
            req.date_posted
        );

        let outcome = request_page(client, url).await;
        match &outcome {
            PageOutcome::Counted(count) => info_time!("Upserted/processed {} jobs", count),
            PageOutcome::BadStatus {
                status,
                body_snippet,
            } => warn_time!("HTTP {}: {}", status.as_u16(), body_snippet),
            PageOutcome::Failed(e) => warn_time!("Error: {}", e),
        }
        summary.record(&outcome);

        if !config.delay.is_zero() && summary.attempts < total_requests {
            tokio::time::sleep(config.delay).await;
        }
    }

    info_time!(
        start_time,
        "Finished {} requests: {} ok, {} failed.",
        summary.attempts,
        summary.succeeded,
        summary.failed
    );
    summary
}
