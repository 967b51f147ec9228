//! Configuration for dockermi
//!
//! Two layers: ambient knobs loaded from `DOCKERMI_*` environment variables
//! with sensible defaults, and explicit per-scan options the CLI hands to the
//! scanner. The discovery and synthesis code never inspects process arguments
//! or the environment itself.
//!
//! # Environment Variables
//!
//! - `DOCKERMI_COMPOSE_COMMAND`: command the generated script delegates to -
//!   default: "docker-compose"
//! - `DOCKERMI_SCRIPT_NAME`: name of the generated script file - default:
//!   "dockermi.sh"
//! - `DOCKERMI_SCRIPTS_DIR`: directory for grouped scripts - default:
//!   `~/.dockermi`
//! - `DOCKERMI_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_SCRIPT_NAME: &str = "dockermi.sh";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Could not determine a home directory for the grouped-scripts dir; set DOCKERMI_SCRIPTS_DIR")]
    MissingScriptsDir,
}

/// Explicit options for one scan, built by the caller and passed in.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Include every discovered service regardless of its labels. Records may
    /// then carry an empty order.
    pub force_include: bool,

    /// Grouping key assigned to services without a `dockermi.key` label in
    /// grouped scans. `None` means keyless services are excluded.
    pub default_group_key: Option<String>,
}

/// Ambient configuration loaded from the environment with defaults.
#[derive(Debug, Clone)]
pub struct DockermiConfig {
    /// Command the generated script delegates to for every service.
    pub compose_command: String,

    /// File name of the generated script.
    pub script_name: String,

    /// Directory grouped scripts are written into, when resolvable.
    pub scripts_dir: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for DockermiConfig {
    fn default() -> Self {
        let compose_command = env::var("DOCKERMI_COMPOSE_COMMAND")
            .unwrap_or_else(|_| crate::script::DEFAULT_COMPOSE_COMMAND.to_string());

        let script_name =
            env::var("DOCKERMI_SCRIPT_NAME").unwrap_or_else(|_| DEFAULT_SCRIPT_NAME.to_string());

        let scripts_dir = env::var("DOCKERMI_SCRIPTS_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".dockermi")));

        let log_level = env::var("DOCKERMI_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            compose_command,
            script_name,
            scripts_dir,
            log_level,
        }
    }
}

impl DockermiConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compose_command.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "compose command must not be empty".to_string(),
            ));
        }

        if self.script_name.trim().is_empty() || self.script_name.contains('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "invalid script name: {:?}",
                self.script_name
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationFailed(format!(
                "invalid log level: {}",
                other
            ))),
        }
    }

    /// Directory grouped scripts are written into.
    pub fn scripts_dir(&self) -> Result<&PathBuf, ConfigError> {
        self.scripts_dir.as_ref().ok_or(ConfigError::MissingScriptsDir)
    }
}
