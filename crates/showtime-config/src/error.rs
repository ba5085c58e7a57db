//! Error types for persistence and settings.

use std::path::PathBuf;

use showtime_core::GraphError;
use thiserror::Error;

/// Errors that can occur while loading or saving state and settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or decode a state blob
    #[error("invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// State blob parsed but does not describe a loadable graph
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Setting out of range
    #[error("invalid setting '{field}': {reason}")]
    InvalidSetting {
        /// Name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Graph edit failed while rebuilding state
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn test_read_file_display_names_path() {
        let err = ConfigError::read_file("/a/state.json", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/state.json"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_write_file_factory_produces_correct_variant() {
        let err = ConfigError::write_file("/out/state.json", mock_io_err());
        assert!(
            matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out/state.json"))
        );
    }

    #[test]
    fn test_create_dir_source_is_some() {
        let err = ConfigError::create_dir("/x", mock_io_err());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_state_display() {
        let err = ConfigError::InvalidState("wire 0: node 7 out of range".to_string());
        assert_eq!(err.to_string(), "invalid state: wire 0: node 7 out of range");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_invalid_setting_display() {
        let err = ConfigError::InvalidSetting {
            field: "bpm",
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "invalid setting 'bpm': must be positive");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(err.to_string().starts_with("invalid state JSON"));
    }
}
