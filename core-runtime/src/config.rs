//! # Core Configuration Module
//!
//! Provides configuration management for the admin console core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `CoreConfig` instance that holds all settings and host-provided
//! dependencies the core needs. It enforces fail-fast validation so a
//! misconfigured console dies at startup instead of on the first request.
//!
//! ## Required Settings
//!
//! - `api_base_url` - Root URL of the streaming platform's REST API
//!
//! ## Optional Dependencies (with desktop defaults)
//!
//! - `HttpClient` - transport (desktop default: reqwest, injected by
//!   `core-service` when the `desktop-shims` feature is enabled)
//! - `SecureStore` - token persistence (desktop default: OS keychain)
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .api_base_url("https://samamusic.onrender.com/sama-music")
//!     .default_page_size(20)
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, SecureStore};
use std::sync::Arc;
use std::time::Duration;

/// Default REST API root for the hosted backend.
pub const DEFAULT_API_BASE_URL: &str = "https://samamusic.onrender.com/sama-music";

/// Default client-side request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page sizes the console offers in its per-page selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Core configuration for the admin console.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Root URL of the REST API, without a trailing slash
    pub api_base_url: String,

    /// Client-side timeout applied to every request
    pub request_timeout: Duration,

    /// Items per page used when a controller is first constructed
    pub default_page_size: u32,

    /// HTTP client for API requests (optional with desktop default)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Secure credential storage (optional with desktop default)
    pub secure_store: Option<Arc<dyn SecureStore>>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("default_page_size", &self.default_page_size)
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field(
                "secure_store",
                &self.secure_store.as_ref().map(|_| "SecureStore { ... }"),
            )
            .finish()
    }
}

impl CoreConfig {
    /// Start building a configuration.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::new()
    }
}

/// Builder for [`CoreConfig`] with fail-fast validation.
#[derive(Default)]
pub struct CoreConfigBuilder {
    api_base_url: Option<String>,
    request_timeout: Option<Duration>,
    default_page_size: Option<u32>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the REST API root URL. A trailing slash is stripped.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the page size controllers start with.
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    /// Inject a custom HTTP client.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Inject a custom secure store.
    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the base URL is empty, the timeout is
    /// zero, or the page size is zero.
    pub fn build(self) -> Result<CoreConfig> {
        let api_base_url = self
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        if api_base_url.is_empty() {
            return Err(Error::Config("api_base_url must not be empty".to_string()));
        }

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(Error::Config(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        let default_page_size = self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if default_page_size == 0 {
            return Err(Error::Config(
                "default_page_size must be greater than zero".to_string(),
            ));
        }

        Ok(CoreConfig {
            api_base_url,
            request_timeout,
            default_page_size,
            http_client: self.http_client,
            secure_store: self.secure_store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::builder().build().unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
        assert!(config.http_client.is_none());
        assert!(config.secure_store.is_none());
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = CoreConfig::builder()
            .api_base_url("https://api.example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = CoreConfig::builder().default_page_size(0).build();
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = CoreConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(err, Err(Error::Config(_))));
    }
}
