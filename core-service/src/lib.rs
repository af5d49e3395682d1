//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP transport,
//! secure credential storage) into the admin console core and hands the
//! host one handle per concern: the session manager, the event bus, and a
//! resource controller per screen. Desktop shells typically enable the
//! `desktop-shims` feature and call [`bootstrap_desktop`], which fills in
//! reqwest- and keyring-backed defaults for anything the configuration
//! leaves unset.

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::{http::HttpClient, session::SessionProvider, storage::SecureStore};
use core_auth::AuthManager;
use core_catalog::controller::ResourceController;
use core_catalog::resources::{Albums, Categories, Plans, Subcategories, Tracks, Users};
use core_catalog::ApiClient;
use core_runtime::config::CoreConfig;
use core_runtime::events::EventBus;
use tracing::info;

/// Aggregated handle to the bridge dependencies the core requires.
pub struct CoreDependencies {
    pub http_client: Arc<dyn HttpClient>,
    pub secure_store: Arc<dyn SecureStore>,
}

impl CoreDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(http_client: Arc<dyn HttpClient>, secure_store: Arc<dyn SecureStore>) -> Self {
        Self {
            http_client,
            secure_store,
        }
    }

    /// Pull the bundle out of a configuration, failing fast on anything
    /// missing.
    fn from_config(config: &CoreConfig) -> Result<Self> {
        let http_client =
            config
                .http_client
                .clone()
                .ok_or_else(|| CoreError::CapabilityMissing {
                    capability: "HttpClient".to_string(),
                    message: "No HTTP client provided. Desktop: enable the desktop-shims \
                              feature or inject one via CoreConfig::builder().http_client(...)"
                        .to_string(),
                })?;
        let secure_store =
            config
                .secure_store
                .clone()
                .ok_or_else(|| CoreError::CapabilityMissing {
                    capability: "SecureStore".to_string(),
                    message: "No secure store provided. Desktop: enable the desktop-shims \
                              feature or inject one via CoreConfig::builder().secure_store(...)"
                        .to_string(),
                })?;
        Ok(Self::new(http_client, secure_store))
    }
}

/// Primary façade exposed to host applications.
///
/// Construct once at startup and keep for the application's lifetime.
/// Resource controllers are created per screen mount via the accessor
/// methods and discarded when the screen unmounts; they all share this
/// console's API client, session, and event bus.
#[derive(Clone)]
pub struct AdminConsole {
    config: CoreConfig,
    events: EventBus,
    auth: Arc<AuthManager>,
    api: ApiClient,
}

impl AdminConsole {
    /// Wire the core from a configuration carrying both bridges.
    pub fn new(config: CoreConfig, deps: CoreDependencies) -> Self {
        let events = EventBus::default();

        let auth = Arc::new(AuthManager::new(
            deps.http_client.clone(),
            deps.secure_store,
            events.clone(),
            config.api_base_url.clone(),
            config.request_timeout,
        ));

        let api = ApiClient::new(
            deps.http_client,
            auth.clone() as Arc<dyn SessionProvider>,
            config.api_base_url.clone(),
            config.request_timeout,
        );

        info!(base_url = %config.api_base_url, "Admin console core initialized");

        Self {
            config,
            events,
            auth,
            api,
        }
    }

    /// Wire the core, resolving bridges from the configuration itself.
    pub fn from_config(config: CoreConfig) -> Result<Self> {
        let deps = CoreDependencies::from_config(&config)?;
        Ok(Self::new(config, deps))
    }

    /// The session manager (sign-in, restore, sign-out).
    pub fn auth(&self) -> Arc<AuthManager> {
        self.auth.clone()
    }

    /// The event bus carrying session and catalog events.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The shared REST client, for host-side calls that bypass the
    /// controllers (e.g. the subcategory fan-out fallback).
    pub fn api_client(&self) -> &ApiClient {
        &self.api
    }

    /// Controller for the user management screen.
    pub fn users(&self) -> ResourceController<Users> {
        self.controller()
    }

    /// Controller for the music library screen.
    pub fn tracks(&self) -> ResourceController<Tracks> {
        self.controller()
    }

    /// Controller for the category management screen.
    pub fn categories(&self) -> ResourceController<Categories> {
        self.controller()
    }

    /// Controller for the subcategory management screen.
    pub fn subcategories(&self) -> ResourceController<Subcategories> {
        self.controller()
    }

    /// Controller for the album management screen.
    pub fn albums(&self) -> ResourceController<Albums> {
        self.controller()
    }

    /// Controller for the subscription plan screen.
    pub fn plans(&self) -> ResourceController<Plans> {
        self.controller()
    }

    fn controller<R: core_catalog::resources::ResourceDesc>(&self) -> ResourceController<R> {
        ResourceController::new(
            self.api.clone(),
            self.events.clone(),
            self.config.default_page_size,
        )
    }
}

/// Convenience bootstrapper for desktop hosts.
///
/// Fills any bridge the configuration leaves unset with the desktop
/// defaults: a reqwest HTTP client using the configured timeout, and the
/// OS keychain for session persistence.
///
/// ```no_run
/// use core_runtime::config::CoreConfig;
/// use core_service::bootstrap_desktop;
///
/// # fn example() -> core_service::Result<()> {
/// let config = CoreConfig::builder()
///     .api_base_url("https://samamusic.onrender.com/sama-music")
///     .build()?;
/// let console = bootstrap_desktop(config);
/// let tracks = console.tracks();
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop(mut config: CoreConfig) -> AdminConsole {
    use bridge_desktop::{KeyringSecureStore, ReqwestHttpClient};

    let http_client = config.http_client.take().unwrap_or_else(|| {
        Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout))
    });
    let secure_store = config
        .secure_store
        .take()
        .unwrap_or_else(|| Arc::new(KeyringSecureStore::new()));

    config.http_client = Some(http_client.clone());
    config.secure_store = Some(secure_store.clone());

    AdminConsole::new(config, CoreDependencies::new(http_client, secure_store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StubHttp;

    #[async_trait]
    impl HttpClient for StubHttp {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Ok(HttpResponse {
                status: 200,
                headers: HashMap::new(),
                body: bytes::Bytes::from_static(b"{\"data\": []}"),
            })
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        secrets: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl SecureStore for MemoryStore {
        async fn set_secret(&self, key: &str, value: &[u8]) -> BridgeResult<()> {
            self.secrets
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn get_secret(&self, key: &str) -> BridgeResult<Option<Vec<u8>>> {
            Ok(self.secrets.lock().unwrap().get(key).cloned())
        }

        async fn delete_secret(&self, key: &str) -> BridgeResult<()> {
            self.secrets.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn console() -> AdminConsole {
        let config = CoreConfig::builder()
            .api_base_url("https://api.example.com")
            .http_client(Arc::new(StubHttp))
            .secure_store(Arc::new(MemoryStore::default()))
            .build()
            .unwrap();
        AdminConsole::from_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_controllers_start_on_first_page() {
        let console = console();
        let tracks = console.tracks();
        let state = tracks.snapshot().await;
        assert_eq!(state.current_page, 1);
        assert_eq!(state.items_per_page, 20);
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn test_missing_http_client_fails_fast() {
        let config = CoreConfig::builder()
            .secure_store(Arc::new(MemoryStore::default()))
            .build()
            .unwrap();
        let err = AdminConsole::from_config(config).unwrap_err();
        assert!(matches!(err, CoreError::CapabilityMissing { capability, .. } if capability == "HttpClient"));
    }

    #[tokio::test]
    async fn test_refetch_through_the_full_stack() {
        let console = console();
        let categories = console.categories();
        categories.refetch().await.unwrap();
        let state = categories.snapshot().await;
        assert!(state.items.is_empty());
        assert!(!state.loading);
    }
}
