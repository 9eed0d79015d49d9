mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};

pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// Environment variables that can be used for config resolution.
/// Captured into a struct so resolution stays testable without touching
/// the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub debug: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BEDROCK_API_BASE").ok(),
            username: std::env::var("BEDROCK_SERVER_MANAGER_USERNAME").ok(),
            password: std::env::var("BEDROCK_SERVER_MANAGER_PASSWORD").ok(),
            debug: std::env::var("BEDROCK_DEBUG").ok(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote manager, no trailing slash.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub request_timeout_sec: u64,
    pub debug: bool,
}

impl AppConfig {
    /// Resolve configuration from environment variables and optional TOML
    /// file config. TOML values override environment values where present.
    /// The `--debug` CLI flag wins over both.
    pub fn resolve(debug_flag: bool, env: &EnvConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let base_url = file.base_url.or_else(|| env.base_url.clone());
        let Some(base_url) = base_url else {
            bail!("base URL must be specified via BEDROCK_API_BASE or in the config file");
        };
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            bail!("base URL must not be empty");
        }

        let username = file.username.or_else(|| env.username.clone());
        let Some(username) = username else {
            bail!("username must be specified via BEDROCK_SERVER_MANAGER_USERNAME or in the config file");
        };

        let password = file.password.or_else(|| env.password.clone());
        let Some(password) = password else {
            bail!("password must be specified via BEDROCK_SERVER_MANAGER_PASSWORD or in the config file");
        };

        let request_timeout_sec = file
            .request_timeout_sec
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SEC);

        let debug = debug_flag
            || file.debug.unwrap_or(false)
            || env.debug.as_deref().map(is_truthy).unwrap_or(false);

        Ok(Self {
            base_url,
            username,
            password,
            request_timeout_sec,
            debug,
        })
    }
}

fn is_truthy(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
