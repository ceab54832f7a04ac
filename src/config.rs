// src/config.rs

use std::env;
use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_API_KEY_FILE: &str = "hackathon_key_openai.txt";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Where the single-page front end is served from during development.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8501,http://127.0.0.1:8501";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: Url,
    pub openai_model: String,
    /// Upper bound for a single model call.
    pub gateway_timeout_secs: u64,
    /// Requests allowed back to back on model-backed routes.
    pub rate_limit_burst: u32,
    /// One request is replenished every this many seconds.
    pub rate_limit_replenish_secs: u64,
    pub bind_addr: SocketAddr,
    /// Page origins allowed to call the API from a browser.
    pub allowed_origins: Vec<HeaderValue>,
    pub rust_log: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey(String),
    Invalid { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey(path) => write!(
                f,
                "OPENAI_API_KEY is not set and no key could be read from '{}'",
                path
            ),
            ConfigError::Invalid { var, reason } => write!(f, "{} is invalid: {}", var, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        // Fall back to a key file next to the binary.
        let openai_api_key = match env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => {
                let path = env::var("OPENAI_API_KEY_FILE")
                    .unwrap_or_else(|_| DEFAULT_API_KEY_FILE.to_string());
                match std::fs::read_to_string(&path) {
                    Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
                    _ => return Err(ConfigError::MissingApiKey(path)),
                }
            }
        };

        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let openai_base_url = Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            var: "OPENAI_BASE_URL",
            reason: e.to_string(),
        })?;

        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let gateway_timeout_secs = parse_var("GATEWAY_TIMEOUT_SECS", 30)?;
        let rate_limit_burst = parse_var("RATE_LIMIT_BURST", 5)?;
        let rate_limit_replenish_secs = parse_var("RATE_LIMIT_REPLENISH_SECS", 2)?;
        let bind_addr = parse_var("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;

        let allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        )?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            openai_api_key,
            openai_base_url,
            openai_model,
            gateway_timeout_secs,
            rate_limit_burst,
            rate_limit_replenish_secs,
            bind_addr,
            allowed_origins,
            rust_log,
        })
    }
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parses a comma-separated list of origins such as "http://localhost:8501,https://app.example".
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let url = Url::parse(origin).map_err(|e| ConfigError::Invalid {
                var: "CORS_ALLOWED_ORIGINS",
                reason: format!("'{}': {}", origin, e),
            })?;
            HeaderValue::from_str(url.origin().ascii_serialization().as_str()).map_err(|e| {
                ConfigError::Invalid {
                    var: "CORS_ALLOWED_ORIGINS",
                    reason: format!("'{}': {}", origin, e),
                }
            })
        })
        .collect()
}
