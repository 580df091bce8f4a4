//! Runtime configuration.
//!
//! Every setting has a default and may be overridden from the environment:
//!
//! | Variable           | Setting                       | Default                     |
//! |--------------------|-------------------------------|-----------------------------|
//! | `OPENAI_API_KEY`   | [`SummaryConfig::api_key`]    | unset (summaries disabled)  |
//! | `OPENAI_MODEL`     | [`SummaryConfig::model`]      | `gpt-5-nano`                |
//! | `OPENAI_BASE_URL`  | [`SummaryConfig::base_url`]   | `https://api.openai.com/v1` |
//! | `VERAZ_MODEL_PATH` | [`ServerConfig::model_path`]  | `model.json`                |
//! | `VERAZ_BIND`       | [`ServerConfig::bind`]        | `127.0.0.1:8501`            |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_PATH_ENV: &str = "VERAZ_MODEL_PATH";
pub const BIND_ENV: &str = "VERAZ_BIND";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Read an environment variable, treating empty values as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Settings for the summary requester.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Without a key no request is ever made.
    pub api_key: Option<String>,
    pub model: String,
    /// Chat-completions API root, without the trailing endpoint.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SummaryConfig {
    /// Defaults overridden by `OPENAI_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: non_empty_var(OPENAI_API_KEY_ENV),
            model: non_empty_var(OPENAI_MODEL_ENV).unwrap_or(defaults.model),
            base_url: non_empty_var(OPENAI_BASE_URL_ENV).unwrap_or(defaults.base_url),
            timeout_secs: defaults.timeout_secs,
        }
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into()).filter(|k: &String| !k.trim().is_empty());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Settings for the web UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    /// Socket address to listen on.
    pub bind: String,
    pub summary: SummaryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            bind: DEFAULT_BIND.to_string(),
            summary: SummaryConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `VERAZ_*` and `OPENAI_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model_path: non_empty_var(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            bind: non_empty_var(BIND_ENV).unwrap_or(defaults.bind),
            summary: SummaryConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.model, "gpt-5-nano");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(!config.has_api_key());

        let server = ServerConfig::default();
        assert_eq!(server.model_path, PathBuf::from("model.json"));
        assert_eq!(server.bind, "127.0.0.1:8501");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        assert!(!SummaryConfig::default().with_api_key("   ").has_api_key());
        assert!(SummaryConfig::default().with_api_key("sk-test").has_api_key());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SummaryConfig::default().with_api_key("sk-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("redacted"));
    }
}
