//! Configuration management for launchpad
//!
//! Settings are read once at startup from the process environment, overlaid on an optional
//! `.env` file in the current directory (the process environment wins). The resulting
//! [`LaunchpadConfig`] is immutable and passed by reference into every component.
//!
//! # Environment Variables
//!
//! ## Model
//! - `LLM_PROVIDER`: groq|together|hf - default: "groq"
//! - `MODEL_NAME`: model identifier - default: "llama-3.1-8b-instruct"
//! - `GROQ_API_KEY` / `TOGETHER_API_KEY` / `HF_API_KEY`: credential for the chosen provider
//!
//! ## Project
//! - `PROJECT_NAME`: repository name - default: "fastapi-task-manager"
//! - `PROJECT_SPEC`: free-form description handed to the model
//!
//! ## Publishing
//! - `GITHUB_TOKEN`, `GITHUB_OWNER`: **required** for publishing
//! - `GITHUB_PRIVATE`: create a private repository (true|false) - default: "false"
//! - `GITHUB_BRANCH`: branch files are pushed to - default: "main"
//! - `GITHUB_API_URL`: default: "https://api.github.com"
//!
//! ## Deployment
//! - `RENDER_API_KEY`: enables the deploy stage when set
//! - `RENDER_REPO_BRANCH`: branch the blueprint deploys from - default: "main"
//! - `RENDER_API_URL`: default: "https://api.render.com"
//!
//! ## Runtime
//! - `LAUNCHPAD_WORK_DIR`: working root for generated files - default: "."
//! - `LAUNCHPAD_REQUEST_TIMEOUT`: per-request timeout in seconds - default: "60"
//! - `LAUNCHPAD_DEPLOY_TIMEOUT`: overall deploy wait in seconds - default: "600"
//! - `LAUNCHPAD_POLL_INTERVAL`: seconds between deploy status polls - default: "5"
//! - `LAUNCHPAD_LOG_LEVEL`: trace|debug|info|warn|error - default: "warn"

use crate::llm::Provider;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PROVIDER: &str = "groq";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instruct";
const DEFAULT_PROJECT_NAME: &str = "fastapi-task-manager";
const DEFAULT_PROJECT_SPEC: &str = "Build a FastAPI task manager with CRUD and PostgreSQL.";
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_RENDER_API_URL: &str = "https://api.render.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DEPLOY_TIMEOUT_SECS: u64 = 600;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration errors
///
/// All of them are fatal and are raised before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting or credential is absent
    #[error("Missing {0} in environment")]
    MissingVariable(String),

    /// Invalid provider name
    #[error("Unsupported LLM_PROVIDER: {0}. Valid options: groq, together, hf")]
    InvalidProvider(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for launchpad
#[derive(Debug, Clone)]
pub struct LaunchpadConfig {
    /// Text-generation backend
    pub provider: Provider,

    /// Model name passed to the provider
    pub model: String,

    /// Credential for `provider`, read from its own variable
    pub provider_api_key: Option<String>,

    /// Repository and project name
    pub project_name: String,

    /// Free-form project description handed to the model
    pub project_spec: String,

    pub github_token: Option<String>,
    pub github_owner: Option<String>,
    pub github_private: bool,

    /// Branch files are uploaded to
    pub github_branch: String,
    pub github_api_url: String,

    /// Deploy stage runs only when this is set
    pub render_api_key: Option<String>,

    /// Branch the blueprint deploy builds from
    pub render_branch: String,
    pub render_api_url: String,

    /// Root directory for generated files
    pub work_dir: PathBuf,

    pub request_timeout_secs: u64,
    pub deploy_timeout_secs: u64,
    pub poll_interval_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl LaunchpadConfig {
    /// Loads configuration from the process environment, overlaid on `./.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        let dotenv = load_env_file(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider_name = get("LLM_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let provider = provider_name
            .parse::<Provider>()
            .map_err(ConfigError::InvalidProvider)?;

        let github_private = get("GITHUB_PRIVATE")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            provider,
            model: get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            provider_api_key: get(provider.api_key_var()),
            project_name: get("PROJECT_NAME").unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            project_spec: get("PROJECT_SPEC").unwrap_or_else(|| DEFAULT_PROJECT_SPEC.to_string()),
            github_token: get("GITHUB_TOKEN"),
            github_owner: get("GITHUB_OWNER"),
            github_private,
            github_branch: get("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            github_api_url: get("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            render_api_key: get("RENDER_API_KEY"),
            render_branch: get("RENDER_REPO_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            render_api_url: get("RENDER_API_URL")
                .unwrap_or_else(|| DEFAULT_RENDER_API_URL.to_string()),
            work_dir: get("LAUNCHPAD_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            request_timeout_secs: parse_secs(
                get("LAUNCHPAD_REQUEST_TIMEOUT"),
                "LAUNCHPAD_REQUEST_TIMEOUT",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            deploy_timeout_secs: parse_secs(
                get("LAUNCHPAD_DEPLOY_TIMEOUT"),
                "LAUNCHPAD_DEPLOY_TIMEOUT",
                DEFAULT_DEPLOY_TIMEOUT_SECS,
            )?,
            poll_interval_secs: parse_secs(
                get("LAUNCHPAD_POLL_INTERVAL"),
                "LAUNCHPAD_POLL_INTERVAL",
                DEFAULT_POLL_INTERVAL_SECS,
            )?,
            log_level: get("LAUNCHPAD_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        })
    }

    /// Validates the configuration
    ///
    /// Credentials are checked separately by [`Self::github_credentials`] and when the
    /// provider client is built, since not every command needs them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be between 1 and 600 seconds".to_string(),
            ));
        }
        if self.deploy_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Deploy timeout must be at least 1 second".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 || self.poll_interval_secs > self.deploy_timeout_secs {
            return Err(ConfigError::ValidationFailed(format!(
                "Poll interval must be between 1 and {} seconds",
                self.deploy_timeout_secs
            )));
        }
        if self.project_name.contains('/') || self.project_name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid project name: {}",
                self.project_name
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Token and owner for the repository API
    pub fn github_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let token = self
            .github_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVariable("GITHUB_TOKEN".to_string()))?;
        let owner = self
            .github_owner
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVariable("GITHUB_OWNER".to_string()))?;
        Ok((token, owner))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn deploy_timeout(&self) -> Duration {
        Duration::from_secs(self.deploy_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Whether the deploy stage should run
    pub fn deploy_enabled(&self) -> bool {
        self.render_api_key.is_some()
    }
}

impl fmt::Display for LaunchpadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launchpad Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(
            f,
            "  {}: {}",
            self.provider.api_key_var(),
            mask(&self.provider_api_key)
        )?;
        writeln!(f, "  Project: {}", self.project_name)?;
        writeln!(f, "  GitHub Owner: {}", self.github_owner.as_deref().unwrap_or("-"))?;
        writeln!(f, "  GitHub Token: {}", mask(&self.github_token))?;
        writeln!(f, "  Private: {}", self.github_private)?;
        writeln!(f, "  Render API Key: {}", mask(&self.render_api_key))?;
        writeln!(f, "  Work Dir: {}", self.work_dir.display())?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Deploy Timeout: {}s", self.deploy_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

fn mask(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

fn parse_secs(raw: Option<String>, field: &str, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse::<u64>().map_err(|e| ConfigError::ParseError {
            field: field.to_string(),
            error: e.to_string(),
        }),
    }
}

/// Parses `KEY=value` lines, ignoring blanks and `#` comments
///
/// An optional `export ` prefix and matching surrounding quotes are stripped.
pub fn parse_env_pairs(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            let key = key.strip_prefix("export ").unwrap_or(key).trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn load_env_file(path: &Path) -> HashMap<String, String> {
    fs::read_to_string(path)
        .map(|contents| parse_env_pairs(&contents).into_iter().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_default_configuration() {
        let config = LaunchpadConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.provider, Provider::Groq);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.project_name, DEFAULT_PROJECT_NAME);
        assert_eq!(config.project_spec, DEFAULT_PROJECT_SPEC);
        assert!(!config.github_private);
        assert_eq!(config.github_branch, "main");
        assert_eq!(config.render_branch, "main");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.deploy_timeout_secs, 600);
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert!(!config.deploy_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variable_parsing() {
        let config = LaunchpadConfig::from_lookup(lookup_from(&[
            ("LLM_PROVIDER", "together"),
            ("MODEL_NAME", "mixtral"),
            ("TOGETHER_API_KEY", "tk"),
            ("GROQ_API_KEY", "ignored"),
            ("PROJECT_NAME", "todo-api"),
            ("GITHUB_PRIVATE", "TRUE"),
            ("RENDER_API_KEY", "rk"),
            ("RENDER_REPO_BRANCH", "release"),
            ("LAUNCHPAD_DEPLOY_TIMEOUT", "120"),
            ("LAUNCHPAD_LOG_LEVEL", "DEBUG"),
        ]))
        .unwrap();

        assert_eq!(config.provider, Provider::Together);
        assert_eq!(config.model, "mixtral");
        assert_eq!(config.provider_api_key.as_deref(), Some("tk"));
        assert_eq!(config.project_name, "todo-api");
        assert!(config.github_private);
        assert!(config.deploy_enabled());
        assert_eq!(config.render_branch, "release");
        assert_eq!(config.deploy_timeout(), Duration::from_secs(120));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let result = LaunchpadConfig::from_lookup(lookup_from(&[("LLM_PROVIDER", "openai")]));
        assert!(matches!(result, Err(ConfigError::InvalidProvider(p)) if p == "openai"));
    }

    #[test]
    fn test_unparseable_timeout() {
        let result =
            LaunchpadConfig::from_lookup(lookup_from(&[("LAUNCHPAD_REQUEST_TIMEOUT", "soon")]));
        assert!(matches!(result, Err(ConfigError::ParseError { field, .. }) if field == "LAUNCHPAD_REQUEST_TIMEOUT"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = LaunchpadConfig::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", ""),
            ("RENDER_API_KEY", "  "),
        ]))
        .unwrap();
        assert!(config.github_token.is_none());
        assert!(!config.deploy_enabled());
    }

    #[test]
    fn test_github_credentials_required() {
        let config = LaunchpadConfig::from_lookup(lookup_from(&[("GITHUB_TOKEN", "t")])).unwrap();
        let err = config.github_credentials().unwrap_err();
        assert_eq!(err.to_string(), "Missing GITHUB_OWNER in environment");

        let config = LaunchpadConfig::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_OWNER", "octo"),
        ]))
        .unwrap();
        assert_eq!(config.github_credentials().unwrap(), ("t", "octo"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = LaunchpadConfig::from_lookup(|_| None).unwrap();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::from_lookup(|_| None).unwrap();
        config.poll_interval_secs = 900;
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::from_lookup(|_| None).unwrap();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::from_lookup(|_| None).unwrap();
        config.project_name = "owner/repo".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_masks_credentials() {
        let config = LaunchpadConfig::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "ghp_supersecretvalue"),
            ("GROQ_API_KEY", "gsk_supersecretvalue"),
        ]))
        .unwrap();
        let display = config.to_string();
        assert!(display.contains("Launchpad Configuration:"));
        assert!(display.contains("GitHub Token: <set>"));
        assert!(!display.contains("supersecretvalue"));
    }

    #[test]
    fn test_parse_env_pairs() {
        let pairs = parse_env_pairs(
            "# comment\n\nexport DB_URL=\"postgres://x\"\nAPI_KEY = abc\nNOVALUE\n=orphan\n",
        );
        assert_eq!(
            pairs,
            vec![
                ("DB_URL".to_string(), "postgres://x".to_string()),
                ("API_KEY".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        let _guards = vec![
            EnvGuard::set("LLM_PROVIDER", "hf"),
            EnvGuard::set("HF_API_KEY", "hf-key"),
            EnvGuard::set("PROJECT_NAME", "env-project"),
        ];

        let config = LaunchpadConfig::from_env().unwrap();
        assert_eq!(config.provider, Provider::HuggingFace);
        assert_eq!(config.provider_api_key.as_deref(), Some("hf-key"));
        assert_eq!(config.project_name, "env-project");
    }
}
