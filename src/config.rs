//! Session configuration.
//!
//! Every catalog URL is derived from `base_url`, so the same session code
//! can target the production catalog or any other host serving the same
//! pages.

use std::time::Duration;

/// Production catalog.
pub const DEFAULT_BASE_URL: &str = "https://sflib1.sfpl.org";
/// Branch hours page, outside the catalog and unauthenticated.
pub const DEFAULT_HOURS_URL: &str = "https://sfpl.org/index.php?pg=0100000101";
pub const DEFAULT_USER_AGENT: &str = concat!("sfpl-api/", env!("CARGO_PKG_VERSION"));

pub(crate) const LOGIN_PATH: &str = "/patroninfo";
pub(crate) const LOGOUT_PATH: &str = "/logout~S1?";
pub(crate) const ITEMS_PATH: &str = "/items";
pub(crate) const HOLDS_PATH: &str = "/holds";
pub(crate) const LISTS_PATH: &str = "/mylists";
pub(crate) const PATRON_INFO_PREFIX: &str = "/patroninfo";
pub(crate) const RECORD_PREFIX: &str = "/record";
pub(crate) const SEARCH_PATH: &str = "/search/X";
pub(crate) const SEARCH_PARAM: &str = "SEARCH";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub base_url: String,
    pub hours_url: String,
    pub user_agent: String,
    /// Transport timeout, `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hours_url: DEFAULT_HOURS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl SessionConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_hours_url(mut self, hours_url: &str) -> Self {
        self.hours_url = hours_url.to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base that record ids are appended to, e.g. `{base}/record=b1234567`.
    pub fn record_base_url(&self) -> String {
        format!("{}{}=", self.base_url, RECORD_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = SessionConfig::default();
        assert_eq!(config.base_url, "https://sflib1.sfpl.org");
        assert_eq!(config.record_base_url(), "https://sflib1.sfpl.org/record=");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = SessionConfig::default()
            .with_base_url("http://127.0.0.1:8080/")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
