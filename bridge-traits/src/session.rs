//! Session Access Abstraction
//!
//! The console core never reaches into global storage for credentials.
//! Instead it talks to the session through this narrow interface: read the
//! current bearer token, and report a rejected (401) request so the session
//! owner can tear the session down and send the user back to login.

use async_trait::async_trait;

/// Narrow view of the authenticated session held by the host.
///
/// Implemented by `core-auth`'s manager in the full stack; tests substitute
/// a fixed-token double.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current bearer token, if a session is active.
    ///
    /// Returning `None` sends the request unauthenticated; the server's 401
    /// then flows back through [`handle_unauthorized`](Self::handle_unauthorized).
    async fn access_token(&self) -> Option<String>;

    /// Called when a request came back 401.
    ///
    /// The provider clears its session state; navigation to the login view
    /// is the host shell's concern. The in-flight operation is already lost
    /// by the time this runs, so implementations must not retry it.
    async fn handle_unauthorized(&self);
}
