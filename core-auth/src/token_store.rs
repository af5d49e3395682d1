//! Secure Session Persistence
//!
//! This module persists the administrator's session (bearer token plus a
//! snapshot of the signed-in user) using the platform's secure storage so a
//! restarted console resumes where it left off.
//!
//! ## Security
//!
//! - Token values are never logged or exposed in error messages
//! - Storage uses the platform secure store (via the `SecureStore` trait)
//! - Clearing the session erases both the token and the user snapshot
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::{AdminUser, SessionStore};
//! use std::sync::Arc;
//! # use bridge_traits::storage::SecureStore;
//! # async fn example(secure_store: Arc<dyn SecureStore>) -> core_auth::Result<()> {
//! let store = SessionStore::new(secure_store);
//!
//! let user = AdminUser::default();
//! store.save("bearer-token", &user).await?;
//!
//! if let Some((token, user)) = store.load().await? {
//!     println!("restored session for {}", user.email);
//!     let _ = token;
//! }
//!
//! store.clear().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::AdminUser;
use bridge_traits::storage::SecureStore;
use std::sync::Arc;
use tracing::{debug, warn};

const TOKEN_KEY: &str = "session.token";
const USER_KEY: &str = "session.user";

/// Secure storage for the console session.
#[derive(Clone)]
pub struct SessionStore {
    secure_store: Arc<dyn SecureStore>,
}

impl SessionStore {
    /// Create a new session store over the platform secure store.
    pub fn new(secure_store: Arc<dyn SecureStore>) -> Self {
        debug!("Initializing SessionStore");
        Self { secure_store }
    }

    /// Persist the session, overwriting any previous one.
    pub async fn save(&self, token: &str, user: &AdminUser) -> Result<()> {
        self.secure_store
            .set_secret(TOKEN_KEY, token.as_bytes())
            .await
            .map_err(|e| AuthError::SecureStorageUnavailable(e.to_string()))?;

        let user_json = serde_json::to_vec(user)
            .map_err(|e| AuthError::MalformedResponse(format!("user snapshot: {}", e)))?;
        self.secure_store
            .set_secret(USER_KEY, &user_json)
            .await
            .map_err(|e| AuthError::SecureStorageUnavailable(e.to_string()))?;

        debug!(user = %user.email, "Session persisted");
        Ok(())
    }

    /// Load a previously persisted session.
    ///
    /// Returns `Ok(None)` when no session is stored. A token without a
    /// readable user snapshot still restores; the snapshot then starts
    /// empty and is refreshed by the next profile fetch.
    pub async fn load(&self) -> Result<Option<(String, AdminUser)>> {
        let token_bytes = self
            .secure_store
            .get_secret(TOKEN_KEY)
            .await
            .map_err(|e| AuthError::SecureStorageUnavailable(e.to_string()))?;

        let Some(token_bytes) = token_bytes else {
            return Ok(None);
        };

        let token = String::from_utf8(token_bytes)
            .map_err(|_| AuthError::MalformedResponse("stored token is not UTF-8".to_string()))?;

        let user = match self
            .secure_store
            .get_secret(USER_KEY)
            .await
            .map_err(|e| AuthError::SecureStorageUnavailable(e.to_string()))?
        {
            Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "Stored user snapshot unreadable, starting empty");
                AdminUser::default()
            }),
            None => AdminUser::default(),
        };

        debug!("Session restored from secure store");
        Ok(Some((token, user)))
    }

    /// Erase the persisted session.
    ///
    /// Clearing an absent session is not an error.
    pub async fn clear(&self) -> Result<()> {
        self.secure_store
            .delete_secret(TOKEN_KEY)
            .await
            .map_err(|e| AuthError::SecureStorageUnavailable(e.to_string()))?;
        self.secure_store
            .delete_secret(USER_KEY)
            .await
            .map_err(|e| AuthError::SecureStorageUnavailable(e.to_string()))?;

        debug!("Session cleared from secure store");
        Ok(())
    }
}
