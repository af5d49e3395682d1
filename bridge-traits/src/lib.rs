//! # Host Bridge Traits
//!
//! Capability traits that must be implemented by the host shell embedding
//! the admin console core.
//!
//! ## Overview
//!
//! This crate defines the contract between the console core and the host
//! application. Each trait represents a capability the core requires but
//! that is owned by the shell: transport, credential persistence, and the
//! session that gates every API call.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with JSON and
//!   multipart bodies
//! - [`SecureStore`](storage::SecureStore) - Credential persistence
//!   (Keychain/Credential Manager/Secret Service)
//! - [`SessionProvider`](session::SessionProvider) - Bearer token access and
//!   unauthorized-response handling
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations should convert platform-specific errors to `BridgeError`
//! and provide actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks.

pub mod error;
pub mod http;
pub mod session;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm};
pub use session::SessionProvider;
pub use storage::SecureStore;
