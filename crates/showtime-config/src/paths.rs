//! Platform-specific paths for settings and saved state.
//!
//! - **User config**: `~/.config/showtime/` (Linux),
//!   `~/Library/Application Support/showtime/` (macOS), `%APPDATA%\showtime\`
//!   (Windows)
//!
//! The state file defaults to `state.json` in the working directory, which is
//! where earlier versions of the tool wrote it. Settings live in the user
//! config directory.

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "showtime";

/// Settings file name inside the config directory.
const SETTINGS_FILE: &str = "settings.toml";

/// Default state file name.
const DEFAULT_STATE_FILE: &str = "state.json";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the user settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Default location of the saved graph, relative to the working directory.
pub fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_is_inside_config_dir() {
        let path = settings_path();
        assert!(path.starts_with(user_config_dir()));
        assert!(path.ends_with("showtime/settings.toml"));
    }

    #[test]
    fn test_default_state_path_is_relative() {
        assert_eq!(default_state_path(), PathBuf::from("state.json"));
        assert!(default_state_path().is_relative());
    }
}
