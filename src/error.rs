use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Backend URL must be an http(s) URL with a path, got: {0}")]
    UnsupportedBaseUrl(String),

    #[error("Page range starting at {start_page} can't fit {pages} pages")]
    InvalidPages { start_page: u32, pages: u32 },

    #[error("Invalid duration, expected non-negative seconds: {0}")]
    InvalidDuration(String),

    #[error("Couldn't parse the response body as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
