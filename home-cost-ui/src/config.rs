//! Optional TOML configuration.
//!
//! ```toml
//! log_level = "debug"
//!
//! [fees]
//! min_cash_percent = 15
//! mortgage_fee_rate = "0.02"
//! mortgage_fee_fixed = 375
//! deed_fee_rate = "0.015"
//! deed_fee_fixed = 875
//!
//! [format]
//! grouping_separator = " "
//!
//! [session]
//! path = "home-cost.session.json"
//! ```
//!
//! Every table and key is optional.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use home_cost_core::{FeeSchedule, FeeScheduleError, NumberFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "home-cost.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid fee schedule: {0}")]
    Fees(#[from] FeeScheduleError),

    #[error("grouping separator must not be a digit, got '{0}'")]
    InvalidSeparator(char),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the screen inputs are saved between runs.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,
    pub fees: FeeSchedule,
    pub format: NumberFormat,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&text, path)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Applies a `--separator` override and validates the result.
    pub fn with_separator(
        mut self,
        separator: Option<char>,
    ) -> Result<Self, ConfigError> {
        if let Some(separator) = separator {
            self.format.grouping_separator = separator;
            self.validate()?;
        }
        Ok(self)
    }

    /// The configured log filter, unless `RUST_LOG` already chose one.
    pub fn log_level_override(
        &self,
        rust_log_set: bool,
    ) -> Option<&str> {
        if rust_log_set {
            None
        } else {
            self.log_level.as_deref()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fees.validate()?;
        if self.format.grouping_separator.is_ascii_digit() {
            return Err(ConfigError::InvalidSeparator(
                self.format.grouping_separator,
            ));
        }
        Ok(())
    }
}
