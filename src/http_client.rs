use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

static CLIENT: OnceCell<(Duration, Client)> = OnceCell::new();

/// Shared blocking client. The first caller fixes the timeout; asking for a
/// different one afterwards is an error rather than a silent mismatch.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    let (built_with, client) = CLIENT.get_or_try_init(|| {
        Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .map(|client| (timeout, client))
            .context("failed to build http client")
    })?;
    if *built_with != timeout {
        return Err(anyhow::anyhow!(
            "http client already built with a {built_with:?} timeout, {timeout:?} requested"
        ));
    }
    Ok(client)
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}
