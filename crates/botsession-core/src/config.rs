//! Session middleware configuration.
//!
//! `SessionConfig` pairs the serializable [`SessionSettings`] with the key
//! resolver. It is validated once, when built, so the middleware never runs
//! with an unusable table name or empty property.

use std::fmt;
use std::sync::Arc;

use botsession_types::config::SessionSettings;
use botsession_types::error::SessionError;
use botsession_types::session::{is_valid_identifier, TableRef};

use crate::middleware::context::UpdateContext;
use crate::session::key::{chat_sender_key, KeyResolver};

/// Validated session middleware configuration.
#[derive(Clone)]
pub struct SessionConfig {
    settings: SessionSettings,
    key_resolver: KeyResolver,
}

impl SessionConfig {
    /// Start from the defaults: property `session`, table `_telegraf_sessions`,
    /// database `test`, and the chat + sender key resolver.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Build a config from loaded settings with the default key resolver.
    pub fn from_settings(settings: SessionSettings) -> Result<Self, SessionError> {
        Self::builder().settings(settings).build()
    }

    /// Name of the context slot holding the session.
    pub fn property(&self) -> &str {
        &self.settings.property
    }

    /// The session table, qualified by its database.
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.settings.db, &self.settings.table)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Resolve the session key for an update. An empty key counts as no key.
    pub fn resolve_key(&self, ctx: &UpdateContext) -> Option<String> {
        (self.key_resolver)(ctx).filter(|key| !key.is_empty())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settings: SessionSettings::default(),
            key_resolver: Arc::new(chat_sender_key),
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("settings", &self.settings)
            .field("key_resolver", &"<fn>")
            .finish()
    }
}

/// Builder for [`SessionConfig`].
pub struct SessionConfigBuilder {
    settings: SessionSettings,
    key_resolver: KeyResolver,
}

impl Default for SessionConfigBuilder {
    fn default() -> Self {
        let SessionConfig {
            settings,
            key_resolver,
        } = SessionConfig::default();
        Self {
            settings,
            key_resolver,
        }
    }
}

impl SessionConfigBuilder {
    /// Replace all serializable settings at once.
    pub fn settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.settings.property = property.into();
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.settings.table = table.into();
        self
    }

    pub fn db(mut self, db: impl Into<String>) -> Self {
        self.settings.db = db.into();
        self
    }

    /// Use a custom key resolver instead of chat + sender.
    pub fn key_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&UpdateContext) -> Option<String> + Send + Sync + 'static,
    {
        self.key_resolver = Arc::new(resolver);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// `SessionError::Validation` if the property is empty or the database or
    /// table name is not a plain identifier (ASCII letters, digits, `_`).
    pub fn build(self) -> Result<SessionConfig, SessionError> {
        if self.settings.property.trim().is_empty() {
            return Err(SessionError::Validation(
                "session property name must not be empty".to_string(),
            ));
        }
        if !is_valid_identifier(&self.settings.db) {
            return Err(SessionError::Validation(format!(
                "invalid database name '{}'",
                self.settings.db
            )));
        }
        if !is_valid_identifier(&self.settings.table) {
            return Err(SessionError::Validation(format!(
                "invalid table name '{}'",
                self.settings.table
            )));
        }

        Ok(SessionConfig {
            settings: self.settings,
            key_resolver: self.key_resolver,
        })
    }
}
