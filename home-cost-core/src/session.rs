//! Saving and restoring the three screen inputs.
//!
//! A snapshot is taken when the screen is torn down and fed back when it is
//! created again. Field text is stored exactly as shown, separators included.

use std::{fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::DEFAULT_MIN_CASH_PERCENT;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot read session file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write session file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed session data: {0}")]
    Json(#[from] serde_json::Error),
}

/// The `price`, `mortgage` and `percent` values of one screen.
///
/// # Example
///
/// ```
/// use home_cost_core::SessionSnapshot;
///
/// let snapshot = SessionSnapshot::from_json(r#"{"price":"1,000,000","percent":20}"#).unwrap();
///
/// assert_eq!(snapshot.price, "1,000,000");
/// assert_eq!(snapshot.mortgage, "");
/// assert_eq!(snapshot.percent, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub price: String,
    pub mortgage: String,
    /// Raw slider value. Wider than the slider so hand-edited files with an
    /// out-of-range value still load; clamped again on restore.
    pub percent: i64,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            price: String::new(),
            mortgage: String::new(),
            percent: i64::from(DEFAULT_MIN_CASH_PERCENT),
        }
    }
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a snapshot from `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, SessionError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let snapshot = Self::from_json(&json)?;
        info!(path = %path.display(), "restored session");
        Ok(Some(snapshot))
    }

    /// Writes the snapshot to `path`, replacing any previous one.
    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), SessionError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "saved session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            price: "2,450,000".to_string(),
            mortgage: "1,200,000".to_string(),
            percent: 25,
        }
    }

    #[test]
    fn to_json_uses_price_mortgage_percent_keys() {
        let value: serde_json::Value = serde_json::from_str(&snapshot().to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "price": "2,450,000",
                "mortgage": "1,200,000",
                "percent": 25,
            })
        );
    }

    #[test]
    fn from_json_defaults_missing_keys() {
        let restored = SessionSnapshot::from_json("{}").unwrap();

        assert_eq!(restored, SessionSnapshot::default());
        assert_eq!(restored.percent, 15);
    }

    #[test]
    fn from_json_rejects_malformed_data() {
        let result = SessionSnapshot::from_json(r#"{"percent": "lots"}"#);

        assert!(matches!(result, Err(SessionError::Json(_))));
    }

    #[test]
    fn from_json_keeps_out_of_range_percent() {
        let restored = SessionSnapshot::from_json(r#"{"price": "1", "percent": -1}"#).unwrap();

        assert_eq!(restored.percent, -1);
        assert_eq!(restored.price, "1");
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();

        let result = SessionSnapshot::load(&dir.path().join("absent.json")).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn save_then_load_restores_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        snapshot().save(&path).unwrap();
        let restored = SessionSnapshot::load(&path).unwrap();

        assert_eq!(restored, Some(snapshot()));
    }

    #[test]
    fn save_into_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("session.json");

        let error = snapshot().save(&path).unwrap_err();

        assert!(matches!(error, SessionError::Write { .. }));
        assert!(error.to_string().contains("session.json"));
    }
}
