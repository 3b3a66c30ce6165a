//! Transport configuration.
//!
//! One [`TransportConfig`] drives both built-in native transports and the
//! response cache behind the fetch-style one.

use std::time::Duration;

use url::Url;

use crate::cache::CacheConfig;

pub mod validation;

pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

pub const DEFAULT_USER_AGENT: &str = concat!("niupee/", env!("CARGO_PKG_VERSION"));

/// Upper bound browsers apply to redirect chains.
pub const MAX_REDIRECT_LIMIT: usize = 20;

/// Settings for the built-in transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Limit on establishing a TCP connection
    pub connect_timeout: Duration,
    /// `User-Agent` sent when the request sets none
    pub user_agent: String,
    /// Redirects followed by fetch in `follow` mode
    pub max_redirects: usize,
    /// Origin of the caller, used by the `same-origin` request mode
    pub origin: Option<Url>,
    /// Refuse plain-http requests
    pub https_only: bool,
    /// Limits of the fetch response cache
    pub cache: CacheConfig,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: MAX_REDIRECT_LIMIT,
            origin: None,
            https_only: false,
            cache: CacheConfig::default(),
        }
    }
}

impl TransportConfig {
    /// Defaults with the fetch response cache disabled
    #[must_use]
    pub fn no_cache() -> Self {
        Self {
            cache: CacheConfig::no_cache(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

impl Validator for TransportConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_timeout(self.connect_timeout, "connect_timeout")?;
        ConfigValidator::validate_non_empty(&self.user_agent, "user_agent")?;
        ConfigValidator::validate_range(self.max_redirects, 0, MAX_REDIRECT_LIMIT, "max_redirects")?;
        if http::HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigurationError::InvalidParameter(
                "user_agent is not a valid header value".to_string(),
            ));
        }
        if let Some(origin) = &self.origin
            && !origin.origin().is_tuple()
        {
            return Err(ConfigurationError::InvalidParameter(format!(
                "origin {origin} has no network origin"
            )));
        }
        if self.https_only
            && self.origin.as_ref().is_some_and(|origin| origin.scheme() == "http")
        {
            return Err(ConfigurationError::Conflict(
                "https_only is set but origin uses plain http".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(TransportConfig::default().validate().is_ok());
        assert!(TransportConfig::no_cache().validate().is_ok());
        assert!(!TransportConfig::no_cache().cache.is_enabled());
    }

    #[test]
    fn invalid_settings_are_reported() {
        let config = TransportConfig {
            max_redirects: 21,
            ..TransportConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigurationError::InvalidParameter(_))));

        let config = TransportConfig::default().with_user_agent(" ");
        assert!(config.validate().is_err());

        let config = TransportConfig {
            connect_timeout: Duration::ZERO,
            ..TransportConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigurationError::InvalidTimeout(_))));
    }

    #[test]
    fn https_only_conflicts_with_http_origin() {
        let config = TransportConfig {
            https_only: true,
            ..TransportConfig::default().with_origin(Url::parse("http://app.test").unwrap())
        };
        assert!(matches!(config.validate(), Err(ConfigurationError::Conflict(_))));
    }
}
