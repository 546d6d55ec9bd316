//! TOML configuration (`retro.toml`): solver time limit, output paths, and
//! log level. CLI flags (parsed in `main.rs`) override whatever is loaded
//! here. Every field has a default, so the config file itself is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub time_limit_seconds: Option<f64>,
    pub output_solution_path: PathBuf,
    pub output_report_path: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit_seconds: None,
            output_solution_path: PathBuf::from("output/solution.json"),
            output_report_path: PathBuf::from("output/report.md"),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    solver: RawSolverSection,
    #[serde(default)]
    output: RawOutputSection,
    #[serde(default)]
    logging: RawLoggingSection,
}

#[derive(Debug, Default, Deserialize)]
struct RawSolverSection {
    time_limit_seconds: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutputSection {
    solution_path: Option<String>,
    report_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLoggingSection {
    level: Option<String>,
}

/// Loads `path` if it exists; returns the all-defaults [`Config`] (not an
/// error) when the file is absent, since the config is opt-in and every
/// field has a sensible default.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let defaults = Config::default();
    Ok(Config {
        time_limit_seconds: raw.solver.time_limit_seconds,
        output_solution_path: raw
            .output
            .solution_path
            .map(PathBuf::from)
            .unwrap_or(defaults.output_solution_path),
        output_report_path: raw
            .output
            .report_path
            .map(PathBuf::from)
            .unwrap_or(defaults.output_report_path),
        log_level: raw.logging.level.unwrap_or(defaults.log_level),
    })
}
