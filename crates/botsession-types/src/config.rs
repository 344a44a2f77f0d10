//! Session middleware settings.
//!
//! `SessionSettings` holds the serializable part of the session configuration
//! and is typically loaded from a `session.toml` file. All fields have defaults.

use serde::{Deserialize, Serialize};

/// Default name of the context slot holding the session.
pub const DEFAULT_PROPERTY: &str = "session";
/// Default backing table name.
pub const DEFAULT_TABLE: &str = "_telegraf_sessions";
/// Default database name.
pub const DEFAULT_DB: &str = "test";

/// Serializable session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Name under which the session is exposed on the update context.
    #[serde(default = "default_property")]
    pub property: String,

    /// Backing table name.
    #[serde(default = "default_table")]
    pub table: String,

    /// Database holding the table.
    #[serde(default = "default_db")]
    pub db: String,
}

fn default_property() -> String {
    DEFAULT_PROPERTY.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_db() -> String {
    DEFAULT_DB.to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            property: default_property(),
            table: default_table(),
            db: default_db(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_settings_default_values() {
        let settings = SessionSettings::default();
        assert_eq!(settings.property, "session");
        assert_eq!(settings.table, "_telegraf_sessions");
        assert_eq!(settings.db, "test");
    }

    #[test]
    fn test_session_settings_deserialize_with_defaults() {
        let settings: SessionSettings = toml::from_str("").unwrap();
        assert_eq!(settings, SessionSettings::default());
    }

    #[test]
    fn test_session_settings_deserialize_partial() {
        let settings: SessionSettings = toml::from_str(
            r#"
table = "bot_sessions"
db = "prod"
"#,
        )
        .unwrap();
        assert_eq!(settings.property, "session");
        assert_eq!(settings.table, "bot_sessions");
        assert_eq!(settings.db, "prod");
    }
}
