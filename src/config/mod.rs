use std::env;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub feed: FeedConfig,
}

/// Roundtable API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the backend API, without a trailing slash.
    pub base_url: String,
    /// Bearer credential for mutating calls. Read-only browsing works without one.
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Activity feed configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Seconds between activity feed refreshes.
    pub poll_secs: u64,
    /// Size of the recent-events window requested from the server.
    pub activity_limit: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = env::var("ROUNDTABLE_API_BASE")
            .unwrap_or_else(|_| "https://rtbl.cloud".to_string());
        if base_url.trim().is_empty() {
            return Err(AppError::Config {
                message: "ROUNDTABLE_API_BASE must not be empty".to_string(),
            });
        }

        let api = ApiConfig {
            base_url,
            api_key: env::var("ROUNDTABLE_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let feed = FeedConfig {
            poll_secs: env::var("ACTIVITY_POLL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            activity_limit: env::var("ACTIVITY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50),
        };

        Ok(Config {
            api,
            logging,
            feed,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rtbl.cloud".to_string(),
            api_key: None,
            timeout_ms: 30000,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_secs: 30,
            activity_limit: 50,
        }
    }
}
