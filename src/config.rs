// src/config.rs
//! Client configuration: backend base URL, persisted session location and
//! request timeout. Loaded from an optional `config.yaml` with per-environment
//! sections, with environment variable overrides on top.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_path: PathBuf,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: ClientConfig,
    production: ClientConfig,
}

impl ClientConfig {
    /// Load configuration for the current environment.
    ///
    /// `config.yaml` is optional; without it the built-in defaults apply.
    /// `JOBFINDER_API_URL` and `JOBFINDER_SESSION_PATH` override either source.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::load_from_file(&environment)?
        } else {
            Self::defaults()
        };

        if let Ok(url) = std::env::var("JOBFINDER_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(path) = std::env::var("JOBFINDER_SESSION_PATH") {
            config.session_path = PathBuf::from(path);
        }

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBFINDER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(CONFIG_FILE)
            .with_context(|| format!("Failed to read {}", CONFIG_FILE))?;

        let config_file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn defaults() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_path: Self::default_session_path(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    fn default_session_path() -> PathBuf {
        let base = std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        base.join(".jobfinder").join("session.json")
    }
}
