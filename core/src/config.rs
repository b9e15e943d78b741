//! Store configuration.
//!
//! Loaded from a JSON file by the tooling. Every field has a default,
//! so an empty object `{}` is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SaveResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Reformat a record whose magic matches but whose checksum does not.
    pub verify_checksum: bool,
    /// Write a freshly formatted record at initialize instead of on the next save.
    pub write_on_format: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            write_on_format: false,
        }
    }
}

impl StoreConfig {
    /// Load from a JSON file. A missing file is `SaveError::Io`, bad JSON
    /// is `SaveError::Config`.
    /// In tests, use StoreConfig::default_test().
    pub fn load<P: AsRef<Path>>(path: P) -> SaveResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveError;

    #[test]
    fn empty_object_uses_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.verify_checksum);
        assert!(!config.write_on_format);
    }

    #[test]
    fn fields_override_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"verify_checksum": false, "write_on_format": true}"#).unwrap();
        assert!(!config.verify_checksum);
        assert!(config.write_on_format);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StoreConfig::load("/nonexistent/savestate.json").unwrap_err();
        assert!(matches!(err, SaveError::Io(_)), "unexpected error: {err}");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let path = std::env::temp_dir().join(format!("savestate-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"verify_checksum": "yes"}"#).unwrap();

        let err = StoreConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, SaveError::Config(_)), "unexpected error: {err}");
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("savestate-config-ok-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"write_on_format": true}"#).unwrap();

        let config = StoreConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(config.verify_checksum);
        assert!(config.write_on_format);
    }
}
