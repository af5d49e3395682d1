//! Secure Credential Storage Abstraction
//!
//! Platform-agnostic trait for persisting session credentials between runs.

use async_trait::async_trait;

use crate::error::Result;

/// Secure credential storage trait
///
/// Abstracts platform credential stores:
/// - macOS: Keychain
/// - Windows: Credential Manager
/// - Linux: Secret Service
///
/// Values are opaque bytes; callers serialize what they need. Secrets must
/// never appear in logs or error messages.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::SecureStore;
///
/// async fn remember_token(store: &dyn SecureStore, token: &str) -> Result<()> {
///     store.set_secret("session.token", token.as_bytes()).await
/// }
/// ```
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Store a secret under the given key, overwriting any existing value
    async fn set_secret(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Retrieve a secret by key
    ///
    /// Returns `Ok(None)` if no value is stored under the key.
    async fn get_secret(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete a secret by key
    ///
    /// Deleting a missing key is not an error.
    async fn delete_secret(&self, key: &str) -> Result<()>;
}
