//! # Authentication Module
//!
//! Session lifecycle for the admin console.
//!
//! ## Overview
//!
//! This module owns the administrator's session: signing in against the
//! platform's auth endpoints, persisting the bearer token and user snapshot
//! between runs, handing the token to the catalog layer, and tearing the
//! session down when the user signs out or the server rejects the token.
//!
//! ## Features
//!
//! - Email/password sign-in against the REST API
//! - Token and user persistence via platform-specific secure stores
//! - Session restore at startup
//! - Session state event emission
//! - `SessionProvider` implementation consumed by resource controllers

pub mod error;
pub mod manager;
pub mod token_store;
pub mod types;

pub use error::{AuthError, Result};
pub use manager::AuthManager;
pub use token_store::SessionStore;
pub use types::{AdminUser, Credentials};
