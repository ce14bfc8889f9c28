use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::DEFAULT_BASE_URL;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_THROTTLE_MS: u64 = 1000;
pub const DEFAULT_FIELD_SIZE: u32 = 119;

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub request_timeout: Duration,
    /// Pause after every page attempt and after every category.
    pub throttle: Duration,
    /// Denominator of the rank annotation, e.g. `(12/119)`.
    pub field_size: u32,
    pub base_url: String,
    pub font_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub report_json: Option<PathBuf>,
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        let request_timeout_secs = env_u64("FCS_REQUEST_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(1, 120);
        let throttle_ms = env_u64("FCS_THROTTLE_MS")
            .unwrap_or(DEFAULT_THROTTLE_MS)
            .clamp(0, 60_000);
        let field_size = env_u64("FCS_FIELD_SIZE")
            .map(|v| v.clamp(1, 1000) as u32)
            .unwrap_or(DEFAULT_FIELD_SIZE);
        let base_url = opt_env("FCS_STATS_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            request_timeout: Duration::from_secs(request_timeout_secs),
            throttle: Duration::from_millis(throttle_ms),
            field_size,
            base_url,
            font_path: opt_env("FCS_FONT_PATH").map(PathBuf::from),
            output_dir: opt_env("FCS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            report_json: opt_env("FCS_REPORT_JSON").map(PathBuf::from),
        }
    }

    /// No throttling; for offline runs against in-memory pages.
    pub fn offline() -> Self {
        Self {
            throttle: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
            field_size: DEFAULT_FIELD_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            font_path: None,
            output_dir: PathBuf::from("."),
            report_json: None,
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val)
        }
    })
}

fn env_u64(key: &str) -> Option<u64> {
    opt_env(key).and_then(|v| v.trim().parse::<u64>().ok())
}
