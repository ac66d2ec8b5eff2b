//! Process-wide configuration, read once at startup.
//!
//! API credentials are optional: their absence disables only the tools that
//! need them (those tools fail at call time with a clear message), never the
//! whole process.

use std::path::PathBuf;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Configuration shared read-only by all tool handlers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the OpenAI tools, from `OPENAI_API_KEY`.
    pub openai_api_key: Option<String>,
    /// Credential for the Claude tools, from `ANTHROPIC_API_KEY`.
    pub anthropic_api_key: Option<String>,
    /// OpenAI endpoint, overridable via `OPENAI_BASE_URL` (useful for tests).
    pub openai_base_url: String,
    /// Anthropic endpoint, overridable via `ANTHROPIC_BASE_URL`.
    pub anthropic_base_url: String,
    /// Base directory for filesystem-touching tools, from `BREATHSMITH_DIR`.
    /// Relative database paths and package commands resolve against this.
    pub base_dir: PathBuf,
    /// Directory scanned by the log tools, from `BREATHSMITH_LOG_DIR`.
    /// Defaults to the Claude Desktop log location on macOS.
    pub log_dir: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let base_dir = env_path("BREATHSMITH_DIR")
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let log_dir = env_path("BREATHSMITH_LOG_DIR").unwrap_or_else(default_log_dir);

        Self {
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            anthropic_api_key: env_nonempty("ANTHROPIC_API_KEY"),
            openai_base_url: env_nonempty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            anthropic_base_url: env_nonempty("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            base_dir,
            log_dir,
        }
    }
}

impl Default for Config {
    /// Defaults without touching the environment (used by tests).
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            base_dir: PathBuf::from("."),
            log_dir: default_log_dir(),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_nonempty(key).map(PathBuf::from)
}

fn default_log_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join("Library")
            .join("Logs")
            .join("Claude"),
        Err(_) => PathBuf::from("/var/log/claude"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = Config::default();
        assert!(config.openai_api_key.is_none());
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn default_log_dir_is_under_home_when_set() {
        // HOME is set in the test environment on all supported platforms.
        if std::env::var("HOME").is_ok() {
            let dir = default_log_dir();
            assert!(dir.ends_with("Library/Logs/Claude"));
        }
    }
}
