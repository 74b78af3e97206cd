use crate::error::ConfigError;
use reqwest::Url;
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

fn default_portal_url() -> String {
    "https://mijn.greenchoice.nl".to_string()
}

#[derive(Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_portal_url")]
    pub url: String,
    pub username: String,
    pub password: String,
    // unset means "list agreements" instead of retrieving
    pub agreement_id: Option<i64>,
}

impl PortalConfig {
    /// Parses the configured portal URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.url).map_err(|e| ConfigError::invalid("url", e.to_string()))
    }
}

impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("agreement_id", &self.agreement_id)
            .finish()
    }
}

pub fn load_portal_config() -> Result<PortalConfig, ConfigError> {
    envy::prefixed("GREENCHOICE_")
        .from_env::<PortalConfig>()
        .map_err(ConfigError::env_parse)
}

fn default_max_retries() -> u32 {
    1
}

fn default_max_relogins() -> u32 {
    1
}

fn default_expiry_redirect_threshold() -> usize {
    1
}

fn default_max_redirects() -> usize {
    10
}

fn default_timeout_sec() -> u64 {
    30
}

#[derive(Deserialize, Debug, Clone)]
pub struct RequestConfig {
    /// Extra attempts after a transport failure or non-success status.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Re-logins allowed per logical call when the session expires.
    #[serde(default = "default_max_relogins")]
    pub max_relogins: u32,
    /// Redirect hops above which a response counts as an expired session; 0 disables.
    #[serde(default = "default_expiry_redirect_threshold")]
    pub expiry_redirect_threshold: usize,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            max_relogins: default_max_relogins(),
            expiry_redirect_threshold: default_expiry_redirect_threshold(),
            max_redirects: default_max_redirects(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

pub fn load_request_config() -> Result<RequestConfig, ConfigError> {
    envy::prefixed("REQUEST_")
        .from_env::<RequestConfig>()
        .map_err(ConfigError::env_parse)
}
