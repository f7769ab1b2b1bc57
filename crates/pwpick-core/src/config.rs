use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_LAUNCHER: &str = "npx";

/// Optional user configuration. Absence of the file means defaults; an
/// unreadable or invalid file is an error rather than a silent fallback.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PwpickConfig {
    pub version: u32,
    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Launcher program used to reach the runner.
    pub program: String,
    /// Project filters applied when the command line supplies none.
    pub projects: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_LAUNCHER.to_string(),
            projects: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("pwpick")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<PwpickConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: PwpickConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

/// Loads the config at its resolved location, or defaults when no file exists.
pub fn load_or_default() -> Result<PwpickConfig, ConfigError> {
    let path = resolve_config_path()?;
    if !path.exists() {
        return Ok(PwpickConfig {
            version: 1,
            runner: RunnerConfig::default(),
        });
    }
    load_config(&path)
}

pub fn validate_config(config: &PwpickConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    if config.runner.program.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "runner.program must be non-empty".to_string(),
        });
    }

    for (index, project) in config.runner.projects.iter().enumerate() {
        if project.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: format!("runner.projects[{index}] must be non-empty"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_config_from_toml(raw: &str) -> Result<PwpickConfig, ConfigError> {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        fs::write(file.path(), raw).expect("write temp config");
        load_config(file.path())
    }

    #[test]
    fn accepts_minimal_config() {
        let config = load_config_from_toml("version = 1").expect("valid config");
        assert_eq!(config.runner.program, "npx");
        assert!(config.runner.projects.is_empty());
    }

    #[test]
    fn accepts_custom_launcher_and_default_projects() {
        let raw = r#"
version = 1

[runner]
program = "pnpm"
projects = ["chromium", "webkit"]
"#;

        let config = load_config_from_toml(raw).expect("valid config");
        assert_eq!(config.runner.program, "pnpm");
        assert_eq!(config.runner.projects, vec!["chromium", "webkit"]);
    }

    #[test]
    fn rejects_unknown_version() {
        let error = load_config_from_toml("version = 2").expect_err("config should fail");
        assert!(error.to_string().contains("version must be 1"));
    }

    #[test]
    fn rejects_blank_launcher_program() {
        let raw = r#"
version = 1

[runner]
program = "  "
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("runner.program"));
    }

    #[test]
    fn rejects_blank_default_project() {
        let raw = r#"
version = 1

[runner]
projects = ["chromium", ""]
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("runner.projects[1]"));
    }
}
