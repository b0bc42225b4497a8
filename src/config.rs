use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};

use crate::classifier::{ClassifierMode, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "TILT__";
/// Key variable name carried over from the usual Gemini tooling
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub mode: ClassifierMode,
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Upper bound for a single classification, including the HTTP round trip
    pub timeout_seconds: u64,
    /// Answer given by the static classifier
    pub static_label: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mode: ClassifierMode::Gemini,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
            timeout_seconds: 30,
            static_label: "clean".to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Defaults, then the TOML file (if present), then `TILT__*` environment variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        let mut cfg: Config = figment.extract()?;

        if cfg.classifier.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            cfg.classifier.api_key = std::env::var(GEMINI_API_KEY_ENV)
                .ok()
                .filter(|k| !k.trim().is_empty());
        }

        Ok(cfg)
    }
}
