//! Configuration for the substation dashboard.
//!
//! Layered with figment: built-in defaults, then the TOML file, then
//! `SUBSTATION_*` environment variables. CLI flags are applied on top by
//! the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix, e.g. `SUBSTATION_REFRESH_SECS`.
pub const ENV_PREFIX: &str = "SUBSTATION_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Seconds between Live Data refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Directory that generated reports are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Log file. The TUI never logs to the terminal.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            report_dir: default_report_dir(),
            log_file: default_log_file(),
        }
    }
}

fn default_refresh_secs() -> u64 {
    2
}
fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_log_file() -> PathBuf {
    PathBuf::from("/tmp/substation-tui.log")
}

impl Config {
    /// Live Data refresh interval.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Reject values the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_secs == 0 {
            return Err(ConfigError::Validation {
                field: "refresh_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    /// Render as pretty TOML, as printed by `substation-tui config`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "substation", "substation").map_or_else(
        || PathBuf::from("substation.toml"),
        |dirs| dirs.config_dir().join("substation.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from the platform config path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file + environment. A missing file is not
/// an error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_when_file_missing() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("absent.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.refresh_interval(), Duration::from_secs(2));
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "substation.toml",
                r#"
                    refresh_secs = 5
                    report_dir = "reports"
                "#,
            )?;
            let cfg =
                load_config_from(Path::new("substation.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.refresh_secs, 5);
            assert_eq!(cfg.report_dir, PathBuf::from("reports"));
            assert_eq!(cfg.log_file, default_log_file());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("substation.toml", "refresh_secs = 5")?;
            jail.set_env("SUBSTATION_REFRESH_SECS", "9");
            let cfg =
                load_config_from(Path::new("substation.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.refresh_secs, 9);
            Ok(())
        });
    }

    #[test]
    fn zero_refresh_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("substation.toml", "refresh_secs = 0")?;
            let err = load_config_from(Path::new("substation.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { .. }));
            Ok(())
        });
    }

    #[test]
    fn renders_as_toml() {
        let rendered = Config::default().to_toml().map_err(|e| e.to_string());
        assert!(rendered.is_ok_and(|s| s.contains("refresh_secs = 2")));
    }
}
