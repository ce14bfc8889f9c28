use thiserror::Error;

/// Failure modes of a single category scrape. None of these cross a category
/// boundary: the aggregator logs them and records `CategoryResult::NotFound`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned http {status}")]
    Status { url: String, status: u16 },

    #[error("could not find {team} in {category}")]
    NotFound { team: String, category: String },

    #[error("no URL exists for category {0}")]
    UnknownCategory(String),
}

impl ScrapeError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
