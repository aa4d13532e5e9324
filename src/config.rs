use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20MB
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub bind_addr: String,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub static_dir: String,
}

// API key stays out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("google_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout", &self.request_timeout)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = lookup("GOOGLE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("GOOGLE_API_KEY must be set in .env file")?;

        let gemini_model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let gemini_api_base = lookup("GEMINI_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a number: {}", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Ok(Self {
            google_api_key,
            gemini_model,
            gemini_api_base,
            bind_addr,
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_upload_bytes,
            static_dir,
        })
    }
}
