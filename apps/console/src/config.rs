use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Console configuration loaded from environment variables.
/// Every variable is optional; missing values fall back to local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the profile backend. Endpoint paths are resolved against it.
    pub api_base_url: Url,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let raw_url =
            std::env::var("PROFILE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Config {
            api_base_url: parse_base_url(&raw_url)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Builds a config pointing at `base_url` with default logging.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Config {
            api_base_url: parse_base_url(base_url)?,
            rust_log: "info".to_string(),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).with_context(|| format!("PROFILE_API_URL '{raw}' is not a valid URL"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_parses_valid_url() {
        let config = Config::with_base_url("http://localhost:8080").unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_with_base_url_trims_whitespace() {
        let config = Config::with_base_url("  http://example.com/app/ ").unwrap();
        assert_eq!(config.api_base_url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_invalid_url_is_rejected_with_context() {
        let err = Config::with_base_url("not a url").unwrap_err();
        assert!(
            err.to_string().contains("not a valid URL"),
            "unexpected error: {err}"
        );
    }
}
