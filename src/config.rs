use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::search::SearchRequest;
use crate::{
    Error, Result, DEFAULT_API_BASE, DEFAULT_COUNTRY, DEFAULT_DATE_POSTED, DEFAULT_DELAY_SECS,
    DEFAULT_PAGES, DEFAULT_QUERIES, DEFAULT_START_PAGE, DEFAULT_TIMEOUT_SECS,
};

/// Command line surface. Converted into an `IngestConfig` before anything runs.
#[derive(Debug, Parser)]
#[command(name = "jobingest", version)]
#[command(about = "Batch-ingest jobs via backend ingest endpoint")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "JOBINGEST_API_BASE", default_value = DEFAULT_API_BASE, value_parser = parse_base_url)]
    pub api_base: Url,

    /// Search query (can be specified multiple times)
    #[arg(long = "query", value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Starting page number
    #[arg(long, default_value_t = DEFAULT_START_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    pub start_page: u32,

    /// Number of pages to fetch per query
    #[arg(long, default_value_t = DEFAULT_PAGES, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Country code for job search
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Date filter for job postings
    #[arg(long, default_value = DEFAULT_DATE_POSTED)]
    pub date_posted: String,

    /// Delay between API calls in seconds
    #[arg(long, default_value_t = DEFAULT_DELAY_SECS, value_parser = parse_delay_secs)]
    pub delay: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = parse_timeout_secs)]
    pub timeout: f64,
}

/// Everything a single run needs. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub base_url: Url,
    pub queries: Vec<String>,
    pub start_page: u32,
    pub pages: u32,
    pub country: String,
    pub date_posted: String,
    pub delay: Duration,
    pub timeout: Duration,
}

impl IngestConfig {
    /// Config for `base_url` with every other setting at its default.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            queries: default_queries(),
            start_page: DEFAULT_START_PAGE,
            pages: DEFAULT_PAGES,
            country: DEFAULT_COUNTRY.into(),
            date_posted: DEFAULT_DATE_POSTED.into(),
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Pages requested for every query: `[start_page, start_page + pages)`.
    pub fn page_range(&self) -> std::ops::Range<u32> {
        self.start_page..self.start_page.saturating_add(self.pages)
    }

    /// All (query, page) pairs in request order, query outer and page inner.
    pub fn search_requests(&self) -> impl Iterator<Item = SearchRequest<'_>> + '_ {
        self.queries.iter().flat_map(move |query| {
            self.page_range().map(move |page| SearchRequest {
                query,
                page,
                country: &self.country,
                date_posted: &self.date_posted,
            })
        })
    }

    /// Number of requests a run will attempt.
    pub fn total_requests(&self) -> u64 {
        self.queries.len() as u64 * self.page_range().len() as u64
    }
}

impl TryFrom<Cli> for IngestConfig {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let queries = if cli.queries.is_empty() {
            default_queries()
        } else {
            cli.queries
        };
        if cli.start_page.checked_add(cli.pages).is_none() {
            return Err(Error::InvalidPages {
                start_page: cli.start_page,
                pages: cli.pages,
            });
        }

        Ok(Self {
            base_url: cli.api_base,
            queries,
            start_page: cli.start_page,
            pages: cli.pages,
            country: cli.country,
            date_posted: cli.date_posted,
            delay: secs_to_duration(cli.delay)?,
            timeout: secs_to_duration(cli.timeout)?,
        })
    }
}

fn default_queries() -> Vec<String> {
    DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect()
}

/// Accepts only `http`/`https` URLs that can carry a path.
pub fn parse_base_url(s: &str) -> Result<Url> {
    let url = Url::parse(s.trim())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::UnsupportedBaseUrl(s.into()));
    }
    Ok(url)
}

fn parse_delay_secs(s: &str) -> Result<f64> {
    let secs = s
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidDuration(s.into()))?;
    secs_to_duration(secs)?;
    Ok(secs)
}

fn parse_timeout_secs(s: &str) -> Result<f64> {
    let secs = parse_delay_secs(s)?;
    if secs == 0.0 {
        return Err(Error::InvalidDuration(s.into()));
    }
    Ok(secs)
}

#[inline]
fn secs_to_duration(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidDuration(secs.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(args: &[&str]) -> IngestConfig {
        let cli = Cli::try_parse_from(std::iter::once("jobingest").chain(args.iter().copied()))
            .unwrap();
        IngestConfig::try_from(cli).unwrap()
    }

    #[test]
    fn flags_default_to_documented_values() {
        let config = config_from(&["--api-base", "http://localhost:3000"]);

        let default_base = Url::parse("http://localhost:3000").unwrap();
        assert_eq!(config, IngestConfig::new(default_base));
        assert_eq!(
            config.queries,
            vec!["software engineer", "software developer", "SWE"]
        );
        assert_eq!(config.start_page, 1);
        assert_eq!(config.pages, 3);
        assert_eq!(config.country, "us");
        assert_eq!(config.date_posted, "week");
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn repeated_query_flag_replaces_defaults() {
        let config = config_from(&[
            "--query",
            "rust developer",
            "--query",
            "SRE",
            "--start-page",
            "4",
            "--pages",
            "2",
            "--country",
            "ca",
            "--date-posted",
            "today",
            "--delay",
            "0",
            "--api-base",
            "https://api.example.com/v1",
        ]);

        assert_eq!(config.queries, vec!["rust developer", "SRE"]);
        assert_eq!(config.page_range(), 4..6);
        assert_eq!(config.country, "ca");
        assert_eq!(config.date_posted, "today");
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.base_url.as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn out_of_range_flags_are_rejected() {
        for args in [
            &["jobingest", "--pages", "0"][..],
            &["jobingest", "--start-page", "0"],
            &["jobingest", "--delay", "-1"],
            &["jobingest", "--delay", "soon"],
            &["jobingest", "--timeout", "0"],
            &["jobingest", "--api-base", "localhost:3000"],
            &["jobingest", "--api-base", "ftp://example.com"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "accepted {args:?}");
        }
    }

    #[test]
    fn page_range_past_u32_max_is_rejected() {
        let cli = Cli::try_parse_from([
            "jobingest",
            "--start-page",
            "4294967295",
            "--pages",
            "3",
        ])
        .unwrap();

        assert!(matches!(
            IngestConfig::try_from(cli),
            Err(Error::InvalidPages {
                start_page: u32::MAX,
                pages: 3
            })
        ));

        let config = config_from(&["--start-page", "4294967292", "--pages", "3"]);
        assert_eq!(config.total_requests(), 3 * 3);
    }

    #[test]
    fn search_requests_walk_queries_then_pages() {
        let config = IngestConfig {
            queries: vec!["a".into(), "b".into()],
            start_page: 3,
            pages: 2,
            ..IngestConfig::new(Url::parse("http://localhost:3000").unwrap())
        };

        let pairs: Vec<(&str, u32)> = config
            .search_requests()
            .map(|req| (req.query, req.page))
            .collect();
        assert_eq!(pairs, vec![("a", 3), ("a", 4), ("b", 3), ("b", 4)]);
        assert_eq!(config.total_requests(), 4);
    }
}
