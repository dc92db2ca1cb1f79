use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;

/// All errors that can occur while crawling WrestleStat.
#[derive(thiserror::Error, Debug)]
pub enum WrestleStatError {
    /// A required credential variable is not set in the environment.
    #[error("missing {name} in environment")]
    MissingCredential { name: &'static str },

    /// The login form submission did not land on the authenticated home page.
    #[error("authentication failed, landed on {location}")]
    Authentication { location: String },

    /// Failed to build the underlying HTTP client.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// Failed to serialize a dataset row to CSV.
    #[error("failed to write dataset: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error while persisting a dataset.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for WrestleStatError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        WrestleStatError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WrestleStatError>;
