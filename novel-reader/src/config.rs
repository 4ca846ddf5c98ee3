use serde::Deserialize;
use tracing::debug;

use crate::error::{ReaderError, Result};

/// Site-wide front-end configuration.
///
/// Every field has a default so a partial JSON document (or none at all)
/// is enough to configure a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Maximum number of books kept in the reading history.
    pub history_capacity: usize,
    /// Storage key holding the ordered list of history identifiers.
    pub history_index_key: String,
    /// Lifetime of cookies written by the cookie storage fallback, in days.
    pub cookie_lifetime_days: i64,
    /// Cookie that marks a signed-in session.
    pub session_cookie: String,
    /// How long a toast stays on screen.
    pub toast_duration_ms: u32,
    /// Cards per row in the novel grid.
    pub cards_per_row: usize,
    pub endpoints: Endpoints,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            history_capacity: 200,
            history_index_key: "bookList".to_string(),
            cookie_lifetime_days: 360,
            session_cookie: "ss_userid".to_string(),
            toast_duration_ms: 3000,
            cards_per_row: 6,
            endpoints: Endpoints::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        debug!(
            capacity = config.history_capacity,
            index_key = %config.history_index_key,
            "Loaded site configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(ReaderError::ConfigError(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.history_index_key.is_empty() {
            return Err(ReaderError::ConfigError(
                "history_index_key must not be empty".to_string(),
            ));
        }
        if self.history_index_key.contains(crate::history::FIELD_DELIMITER) {
            return Err(ReaderError::ConfigError(format!(
                "history_index_key must not contain '{}'",
                crate::history::FIELD_DELIMITER
            )));
        }
        if self.cards_per_row == 0 {
            return Err(ReaderError::ConfigError(
                "cards_per_row must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cookie_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.cookie_lifetime_days)
    }
}

/// Paths of the site endpoints the front-end posts forms to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub login: String,
    pub register: String,
    pub add_bookshelf: String,
    pub remove_bookshelf: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            register: "/register".to_string(),
            add_bookshelf: "/addbookcase".to_string(),
            remove_bookshelf: "/delbookcase".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let config = SiteConfig::default();
        assert_eq!(config.history_capacity, 200);
        assert_eq!(config.history_index_key, "bookList");
        assert_eq!(config.cookie_lifetime().num_days(), 360);
        assert_eq!(config.endpoints.remove_bookshelf, "/delbookcase");
    }

    #[test]
    fn test_partial_override() {
        let config =
            SiteConfig::from_json(r#"{"history_capacity": 50, "endpoints": {"login": "/u/login"}}"#)
                .unwrap();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.endpoints.login, "/u/login");
        assert_eq!(config.endpoints.register, "/register");
        assert_eq!(config.toast_duration_ms, 3000);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = SiteConfig::from_json(r#"{"history_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, ReaderError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_delimited_index_key() {
        assert!(SiteConfig::from_json(r##"{"history_index_key": "book#list"}"##).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(SiteConfig::from_json("{not json").is_err());
    }
}
