//! Session settings loader.
//!
//! Reads `session.toml` from the data directory and deserializes it into
//! [`SessionSettings`]. Falls back to the defaults when the file is missing
//! or malformed.

use std::path::Path;

use botsession_types::config::SessionSettings;

/// Name of the settings file inside the data directory.
pub const SETTINGS_FILE: &str = "session.toml";

/// Load session settings from `{data_dir}/session.toml`.
///
/// - If the file does not exist, returns [`SessionSettings::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed settings.
pub async fn load_session_settings(data_dir: &Path) -> SessionSettings {
    let settings_path = data_dir.join(SETTINGS_FILE);

    let content = match tokio::fs::read_to_string(&settings_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No {SETTINGS_FILE} found at {}, using defaults",
                settings_path.display()
            );
            return SessionSettings::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", settings_path.display());
            return SessionSettings::default();
        }
    };

    match toml::from_str::<SessionSettings>(&content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                settings_path.display()
            );
            SessionSettings::default()
        }
    }
}
