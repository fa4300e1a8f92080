//! Application-level configuration loading for the scoring service.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the service looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/scoring.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PITCHSIDE_SCORING_CONFIG_PATH";
/// Overs per innings when a match request does not specify a format.
const DEFAULT_TOTAL_OVERS: u16 = 20;
/// Commentary lines carried in outbound score payloads.
const DEFAULT_COMMENTARY_WINDOW: usize = 12;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct ScoringConfig {
    /// Overs per innings applied when a match request omits the format.
    pub default_total_overs: u16,
    /// How many trailing commentary lines score payloads carry.
    pub commentary_window: usize,
}

impl ScoringConfig {
    /// Load the configuration from disk, falling back to baked-in defaults
    /// when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        default_total_overs = config.default_total_overs,
                        commentary_window = config.commentary_window,
                        "loaded scoring configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_total_overs: DEFAULT_TOTAL_OVERS,
            commentary_window: DEFAULT_COMMENTARY_WINDOW,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file.
struct RawConfig {
    default_total_overs: Option<u16>,
    commentary_window: Option<usize>,
}

impl From<RawConfig> for ScoringConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = ScoringConfig::default();
        Self {
            default_total_overs: value
                .default_total_overs
                .filter(|overs| *overs > 0)
                .unwrap_or(defaults.default_total_overs),
            commentary_window: value
                .commentary_window
                .filter(|window| *window > 0)
                .unwrap_or(defaults.commentary_window),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ScoringConfig::default();
        assert_eq!(config.default_total_overs, 20);
        assert_eq!(config.commentary_window, 12);
    }

    #[test]
    fn raw_values_override_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"default_total_overs": 50, "commentary_window": 6}"#).unwrap();
        let config: ScoringConfig = raw.into();
        assert_eq!(config.default_total_overs, 50);
        assert_eq!(config.commentary_window, 6);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"default_total_overs": 0, "commentary_window": 0}"#).unwrap();
        let config: ScoringConfig = raw.into();
        assert_eq!(config.default_total_overs, 20);
        assert_eq!(config.commentary_window, 12);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let raw: RawConfig = serde_json::from_str("{}").unwrap();
        let config: ScoringConfig = raw.into();
        assert_eq!(config.default_total_overs, 20);
        assert_eq!(config.commentary_window, 12);
    }
}
