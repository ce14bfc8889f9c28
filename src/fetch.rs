use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::ScrapeError;
use crate::http_client::http_client;

/// Source of raw stats-page markup.
///
/// A non-200 response is reported as `ScrapeError::Status` so the caller can move
/// on to the next page variant; anything else that goes wrong is `Transport`.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct HttpPageSource {
    client: &'static Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|err| ScrapeError::transport(url, err))?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(|err| ScrapeError::transport(url, err))
    }
}

/// In-memory pages keyed by URL; unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryPages {
    pages: HashMap<String, String>,
    failing: HashMap<String, String>,
}

impl MemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) -> &mut Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Make `url` fail as if the connection had dropped.
    pub fn fail(&mut self, url: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.failing.insert(url.into(), message.into());
        self
    }
}

impl PageSource for MemoryPages {
    fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        if let Some(message) = self.failing.get(url) {
            return Err(ScrapeError::transport(url, message));
        }
        self.pages.get(url).cloned().ok_or_else(|| ScrapeError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
