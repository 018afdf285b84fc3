// src/core/config_manager.rs
//! Unified configuration: environment variables over an optional
//! `navigator.toml` over built-in defaults.
//!
//! Credentials are only ever read from the environment. The toml file rejects
//! unknown keys, so a key pasted into it fails loudly instead of being loaded.

use crate::analysis::client::ANTHROPIC_MESSAGES_URL;
use crate::session::{Credential, CredentialKind, Session};
use crate::work24::request::WORK24_LIST_URL;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "navigator.toml";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ADDRESS: &str = "127.0.0.1";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub service: ServiceConfig,
    pub server: ServerSettings,
    /// Operator-supplied keys; users may override them per session.
    pub credentials: Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub work24_url: String,
    pub anthropic_url: String,
    pub http_timeout_seconds: u64,
    pub llm_timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            work24_url: WORK24_LIST_URL.to_string(),
            anthropic_url: ANTHROPIC_MESSAGES_URL.to_string(),
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            llm_timeout_seconds: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    service: ServiceConfig,
    server: ServerSettings,
}

impl ConfigManager {
    /// Load all configurations from `path` (if present) and the process environment
    pub fn load(path: &Path) -> Result<Self> {
        let file_contents = if path.exists() {
            info!("Loading configuration file: {}", path.display());
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            )
        } else {
            None
        };

        Self::from_sources(file_contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build from explicit sources; `env` looks up one variable by name.
    pub fn from_sources<F>(file_contents: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match file_contents {
            Some(contents) => toml::from_str(contents).context(
                "Failed to parse configuration file (credentials belong in the environment, not the file)",
            )?,
            None => ConfigFile::default(),
        };

        let mut service = file.service;
        let mut server = file.server;

        if let Some(url) = env("WORK24_API_URL") {
            service.work24_url = url;
        }
        if let Some(url) = env("ANTHROPIC_API_URL") {
            service.anthropic_url = url;
        }
        if let Some(secs) = env("NAVIGATOR_HTTP_TIMEOUT_SECS") {
            service.http_timeout_seconds = parse_positive("NAVIGATOR_HTTP_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = env("NAVIGATOR_LLM_TIMEOUT_SECS") {
            service.llm_timeout_seconds = parse_positive("NAVIGATOR_LLM_TIMEOUT_SECS", &secs)?;
        }
        if let Some(address) = env("NAVIGATOR_ADDRESS") {
            server.address = address;
        }
        if let Some(port) = env("NAVIGATOR_PORT") {
            server.port = port
                .trim()
                .parse::<u16>()
                .context("NAVIGATOR_PORT must be a valid port number")?;
        }

        let mut credentials = Session::new();
        for kind in [CredentialKind::Work24AuthKey, CredentialKind::AnthropicApiKey] {
            if let Some(credential) = env(kind.env_var()).and_then(Credential::new) {
                info!(
                    "{} loaded from environment (length {})",
                    kind,
                    credential.len()
                );
                credentials.set_credential(kind, credential);
            }
        }

        Ok(Self {
            service,
            server,
            credentials,
        })
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    let parsed = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds"))?;
    if parsed == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    Ok(parsed)
}
