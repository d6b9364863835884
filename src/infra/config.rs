use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
const DEFAULT_CONFIG_FILE: &str = "github-tools.toml";

pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        Self { mode, port }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Tool-facing configuration: the GitHub client and per-call defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github: GithubConfig,
    pub defaults: ToolDefaults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub retries: Option<u32>,
    pub connect_timeout_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_API.to_string(),
            token: None,
            retries: None,
            connect_timeout_ms: None,
            timeout_ms: None,
        }
    }
}

/// Values applied when the agent omits an optional argument.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    pub branch: String,
    pub commit_message: String,
    pub readme_path: PathBuf,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            branch: "main".to_string(),
            commit_message: "Update file".to_string(),
            readme_path: PathBuf::from("README.md"),
        }
    }
}

impl AppConfig {
    /// TOML from `GITHUB_TOOLS_CONFIG` (or `github-tools.toml` when present),
    /// then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("GITHUB_TOOLS_CONFIG")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let mut cfg = match explicit {
            Some(path) => Self::from_toml_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Ok(base) = std::env::var("GITHUB_API_BASE_URL") {
            if !base.trim().is_empty() {
                self.github.base_url = base;
            }
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                self.github.token = Some(token);
            }
        }
        if let Some(retries) = std::env::var("GITHUB_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            self.github.retries = Some(retries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in ["MODE", "PORT", "GITHUB_TOOLS_CONFIG", "GITHUB_API_BASE_URL", "GITHUB_TOKEN", "GITHUB_RETRIES"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_to_server_8080() {
        clear_env();
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "server");
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    #[serial]
    fn parses_env_overrides() {
        std::env::set_var("MODE", "stdio");
        std::env::set_var("PORT", "9090");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "stdio");
        assert_eq!(cfg.port, 9090);
        clear_env();
    }

    #[test]
    #[serial]
    fn app_config_defaults() {
        clear_env();
        let cfg = AppConfig::load().unwrap();
        assert_eq!(cfg.github.base_url, DEFAULT_GITHUB_API);
        assert!(cfg.github.token.is_none());
        assert_eq!(cfg.defaults.branch, "main");
        assert_eq!(cfg.defaults.commit_message, "Update file");
        assert_eq!(cfg.defaults.readme_path, PathBuf::from("README.md"));
    }

    #[test]
    #[serial]
    fn toml_then_env_overrides() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[github]\nbase_url = \"http://ghe.local/api/v3\"\nretries = 5\n\n[defaults]\nbranch = \"trunk\""
        )
        .unwrap();
        std::env::set_var("GITHUB_TOOLS_CONFIG", file.path());
        std::env::set_var("GITHUB_TOKEN", "t0k");
        std::env::set_var("GITHUB_RETRIES", "1");

        let cfg = AppConfig::load().unwrap();
        assert_eq!(cfg.github.base_url, "http://ghe.local/api/v3");
        assert_eq!(cfg.github.token.as_deref(), Some("t0k"));
        assert_eq!(cfg.github.retries, Some(1));
        assert_eq!(cfg.defaults.branch, "trunk");
        assert_eq!(cfg.defaults.commit_message, "Update file");
        clear_env();
    }

    #[test]
    #[serial]
    fn malformed_toml_is_reported() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github\nbase_url = 1").unwrap();
        std::env::set_var("GITHUB_TOOLS_CONFIG", file.path());
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        clear_env();
    }
}
