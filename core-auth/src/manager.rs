//! # Session Manager
//!
//! Orchestrates the administrator's session against the platform's auth
//! endpoints.
//!
//! ## Overview
//!
//! The `AuthManager` provides a high-level API for signing in, restoring a
//! persisted session at startup, fetching the profile, and signing out. It
//! caches the bearer token in memory, persists it via [`SessionStore`], and
//! emits session events to the application's event bus.
//!
//! The manager also implements [`SessionProvider`], which is how the catalog
//! layer obtains the token for each request and reports rejected (401)
//! requests. A rejection clears the session; navigating back to the login
//! view is the host shell's job.
//!
//! ## Usage
//!
//! ```no_run
//! use core_auth::{AuthManager, Credentials};
//! use core_runtime::events::EventBus;
//! use std::sync::Arc;
//! # use std::time::Duration;
//! # use bridge_traits::{http::HttpClient, storage::SecureStore};
//! # async fn example(
//! #     http: Arc<dyn HttpClient>,
//! #     secure_store: Arc<dyn SecureStore>,
//! # ) -> core_auth::Result<()> {
//! let events = EventBus::new(100);
//! let manager = AuthManager::new(
//!     http,
//!     secure_store,
//!     events,
//!     "https://samamusic.onrender.com/sama-music",
//!     Duration::from_secs(10),
//! );
//!
//! // Resume a previous session if one is stored
//! if !manager.restore().await? {
//!     let user = manager
//!         .sign_in(Credentials::email("admin@example.com", "password"))
//!         .await?;
//!     println!("signed in as {}", user.email);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::token_store::SessionStore;
use crate::types::{AdminUser, Credentials};
use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::session::SessionProvider;
use bridge_traits::storage::SecureStore;
use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const LOGIN_PATH: &str = "/auth/login";
const PROFILE_PATH: &str = "/auth/profile";

/// In-memory session state.
#[derive(Debug, Clone)]
struct ActiveSession {
    token: String,
    user: AdminUser,
}

/// Session manager for the admin console.
///
/// Thread-safe; share it with `Arc`. All state lives behind a `RwLock` so
/// token reads from concurrent requests never block each other.
pub struct AuthManager {
    http: Arc<dyn HttpClient>,
    store: SessionStore,
    events: EventBus,
    base_url: String,
    timeout: Duration,
    session: RwLock<Option<ActiveSession>>,
}

impl AuthManager {
    /// Create a new manager.
    ///
    /// `base_url` is the API root without a trailing slash.
    pub fn new(
        http: Arc<dyn HttpClient>,
        secure_store: Arc<dyn SecureStore>,
        events: EventBus,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            store: SessionStore::new(secure_store),
            events,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            session: RwLock::new(None),
        }
    }

    /// Restore a persisted session into memory.
    ///
    /// Returns `true` when a session was found. The token is not validated
    /// against the server here; a dead token surfaces as a 401 on the first
    /// request and clears the session through [`SessionProvider`].
    pub async fn restore(&self) -> Result<bool> {
        match self.store.load().await? {
            Some((token, user)) => {
                info!(user = %user.email, "Restored persisted session");
                *self.session.write().await = Some(ActiveSession { token, user });
                Ok(true)
            }
            None => {
                debug!("No persisted session to restore");
                Ok(false)
            }
        }
    }

    /// Sign in with email/password credentials.
    ///
    /// On success the session is cached, persisted, and announced on the
    /// event bus. On failure the server's `message`/`error` field is
    /// preferred over a generic description.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<AdminUser> {
        debug!(email = %credentials.email, "Signing in");

        let request = HttpRequest::new(HttpMethod::Post, format!("{}{}", self.base_url, LOGIN_PATH))
            .json(&credentials)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .timeout(self.timeout);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.is_success() {
            let message = extract_error_message(&response.body)
                .unwrap_or_else(|| format!("Login failed (HTTP {})", response.status));
            warn!(status = response.status, "Sign-in rejected");
            self.events
                .emit(CoreEvent::Session(SessionEvent::AuthError {
                    message: message.clone(),
                }))
                .ok();
            return Err(AuthError::AuthenticationFailed(message));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        let (token, user) = parse_login_payload(&body)?;

        self.store.save(&token, &user).await?;
        *self.session.write().await = Some(ActiveSession {
            token,
            user: user.clone(),
        });

        info!(user = %user.email, "Signed in");
        self.events
            .emit(CoreEvent::Session(SessionEvent::SignedIn {
                user_id: user.user_id().to_string(),
            }))
            .ok();

        Ok(user)
    }

    /// Sign out locally: drop the cached session and erase the persisted
    /// one. The backend keeps no session state worth revoking.
    pub async fn sign_out(&self) -> Result<()> {
        self.store.clear().await?;
        *self.session.write().await = None;

        info!("Signed out");
        self.events
            .emit(CoreEvent::Session(SessionEvent::SignedOut))
            .ok();
        Ok(())
    }

    /// Fetch the signed-in administrator's profile and refresh the cached
    /// user snapshot.
    pub async fn profile(&self) -> Result<AdminUser> {
        let token = self
            .current_token()
            .await
            .ok_or(AuthError::NotAuthenticated)?;

        let request = HttpRequest::new(
            HttpMethod::Get,
            format!("{}{}", self.base_url, PROFILE_PATH),
        )
        .bearer_token(token)
        .timeout(self.timeout);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.is_success() {
            let message = extract_error_message(&response.body)
                .unwrap_or_else(|| format!("Profile fetch failed (HTTP {})", response.status));
            return Err(AuthError::AuthenticationFailed(message));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        // Profile payloads arrive either wrapped in `data` or flat.
        let user_value = body.get("data").unwrap_or(&body);
        let user: AdminUser = serde_json::from_value(user_value.clone())
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        if let Some(session) = self.session.write().await.as_mut() {
            session.user = user.clone();
        }

        Ok(user)
    }

    /// Snapshot of the signed-in user, if any.
    pub async fn current_user(&self) -> Option<AdminUser> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Whether a session is active.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    async fn current_token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }
}

#[async_trait]
impl SessionProvider for AuthManager {
    async fn access_token(&self) -> Option<String> {
        self.current_token().await
    }

    async fn handle_unauthorized(&self) {
        warn!("Request rejected with 401, clearing session");
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to erase persisted session");
        }
        *self.session.write().await = None;
        self.events
            .emit(CoreEvent::Session(SessionEvent::SessionExpired))
            .ok();
    }
}

/// Pull `token` and `user` out of a login response, accepting both the
/// wrapped (`{data: {token, user}}`) and flat (`{token, user}`) shapes.
fn parse_login_payload(body: &serde_json::Value) -> Result<(String, AdminUser)> {
    let payload = body.get("data").unwrap_or(body);

    let token = payload
        .get("token")
        .and_then(|t| t.as_str())
        .ok_or_else(|| AuthError::MalformedResponse("login response missing token".to_string()))?
        .to_string();

    let user = payload
        .get("user")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?
        .unwrap_or_default();

    Ok((token, user))
}

/// Best-effort extraction of a server error message (`message` preferred,
/// then `error`).
fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::HttpResponse;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;
    use std::sync::Mutex;

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
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

    fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(serde_json::to_vec(&body).unwrap()),
        }
    }

    fn manager_with(http: MockHttp) -> AuthManager {
        AuthManager::new(
            Arc::new(http),
            Arc::new(MemoryStore::default()),
            EventBus::new(16),
            "https://api.example.com",
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_sign_in_wrapped_payload() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(json_response(
                200,
                serde_json::json!({
                    "data": {
                        "token": "tok-1",
                        "user": {"_id": "u-1", "name": "Ada", "email": "ada@example.com"}
                    }
                }),
            ))
        });

        let manager = manager_with(http);
        let user = manager
            .sign_in(Credentials::email("ada@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(user.user_id(), "u-1");
        assert!(manager.is_authenticated().await);
        assert_eq!(manager.access_token().await.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_sign_in_flat_payload() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(json_response(
                200,
                serde_json::json!({"token": "tok-2", "user": {"id": "u-2"}}),
            ))
        });

        let manager = manager_with(http);
        manager
            .sign_in(Credentials::email("a@b.c", "pw"))
            .await
            .unwrap();
        assert_eq!(manager.access_token().await.as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_sign_in_prefers_server_message() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(json_response(
                403,
                serde_json::json!({"message": "Account suspended"}),
            ))
        });

        let manager = manager_with(http);
        let err = manager
            .sign_in(Credentials::email("a@b.c", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::AuthenticationFailed(m) if m == "Account suspended"
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(json_response(
                200,
                serde_json::json!({"token": "tok-3", "user": {"id": "u-3"}}),
            ))
        });

        let manager = manager_with(http);
        manager
            .sign_in(Credentials::email("a@b.c", "pw"))
            .await
            .unwrap();

        let mut rx = manager.events.subscribe();
        manager.handle_unauthorized().await;

        assert!(!manager.is_authenticated().await);
        assert!(manager.access_token().await.is_none());
        assert_eq!(
            rx.recv().await.unwrap(),
            CoreEvent::Session(SessionEvent::SessionExpired)
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_persisted_session() {
        let mut http = MockHttp::new();
        http.expect_execute().returning(|_| {
            Ok(json_response(
                200,
                serde_json::json!({"token": "tok-4", "user": {"id": "u-4"}}),
            ))
        });

        let manager = manager_with(http);
        manager
            .sign_in(Credentials::email("a@b.c", "pw"))
            .await
            .unwrap();
        manager.sign_out().await.unwrap();

        assert!(!manager.is_authenticated().await);
        assert!(!manager.restore().await.unwrap());
    }
}
