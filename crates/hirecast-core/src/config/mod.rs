//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `HIRECAST_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_DRIFT_ALPHA;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `HIRECAST_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the classifier, vectorizer and encoder JSON artifacts.
    /// Default: `./artifacts`.
    pub artifacts_dir: PathBuf,

    /// Drift ledger CSV. Default: `./.data/logged_features.csv`.
    pub ledger_path: PathBuf,

    /// Training reference snapshot CSV. Default: `./.data/train_features.csv`.
    /// A missing file is tolerated at startup.
    pub reference_path: PathBuf,

    /// KS-test significance level. Default: `0.05`.
    pub drift_alpha: f64,

    /// MLflow tracking server. When unset, runs are emitted as tracing events.
    pub mlflow_url: Option<String>,

    /// MLflow experiment that receives runs. Default: `0`.
    pub mlflow_experiment_id: String,
}

/// Default MLflow experiment id used when `HIRECAST_MLFLOW_EXPERIMENT_ID` is not set.
pub const DEFAULT_MLFLOW_EXPERIMENT_ID: &str = "0";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            artifacts_dir: PathBuf::from("./artifacts"),
            ledger_path: PathBuf::from("./.data/logged_features.csv"),
            reference_path: PathBuf::from("./.data/train_features.csv"),
            drift_alpha: DEFAULT_DRIFT_ALPHA,
            mlflow_url: None,
            mlflow_experiment_id: DEFAULT_MLFLOW_EXPERIMENT_ID.to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "HIRECAST_PORT";
    const ENV_BIND_ADDR: &'static str = "HIRECAST_BIND_ADDR";
    const ENV_ARTIFACTS_DIR: &'static str = "HIRECAST_ARTIFACTS_DIR";
    const ENV_LEDGER_PATH: &'static str = "HIRECAST_LEDGER_PATH";
    const ENV_REFERENCE_PATH: &'static str = "HIRECAST_REFERENCE_PATH";
    const ENV_DRIFT_ALPHA: &'static str = "HIRECAST_DRIFT_ALPHA";
    const ENV_MLFLOW_URL: &'static str = "HIRECAST_MLFLOW_URL";
    const ENV_MLFLOW_EXPERIMENT_ID: &'static str = "HIRECAST_MLFLOW_EXPERIMENT_ID";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let artifacts_dir =
            Self::parse_path_from_env(Self::ENV_ARTIFACTS_DIR, defaults.artifacts_dir);
        let ledger_path = Self::parse_path_from_env(Self::ENV_LEDGER_PATH, defaults.ledger_path);
        let reference_path =
            Self::parse_path_from_env(Self::ENV_REFERENCE_PATH, defaults.reference_path);
        let drift_alpha = Self::parse_alpha_from_env(defaults.drift_alpha)?;
        let mlflow_url = Self::parse_optional_string_from_env(Self::ENV_MLFLOW_URL);
        let mlflow_experiment_id = Self::parse_string_from_env(
            Self::ENV_MLFLOW_EXPERIMENT_ID,
            defaults.mlflow_experiment_id,
        );

        Ok(Self {
            port,
            bind_addr,
            artifacts_dir,
            ledger_path,
            reference_path,
            drift_alpha,
            mlflow_url,
            mlflow_experiment_id,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.artifacts_dir.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.artifacts_dir.clone(),
            });
        }
        if !self.artifacts_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.artifacts_dir.clone(),
            });
        }

        if self.ledger_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.ledger_path.clone(),
            });
        }

        if self.reference_path.exists() && !self.reference_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.reference_path.clone(),
            });
        }

        if !Self::alpha_in_range(self.drift_alpha) {
            return Err(ConfigError::InvalidAlpha {
                value: self.drift_alpha.to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn alpha_in_range(alpha: f64) -> bool {
        alpha > 0.0 && alpha < 1.0
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_alpha_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_DRIFT_ALPHA) {
            Ok(value) => match value.trim().parse::<f64>() {
                Ok(alpha) if Self::alpha_in_range(alpha) => Ok(alpha),
                _ => Err(ConfigError::InvalidAlpha { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
