//! # Catalog Management Module
//!
//! Owns the remote catalog state behind every resource screen of the admin
//! console: users, music tracks, categories, subcategories, albums, and
//! subscription plans.
//!
//! ## Overview
//!
//! Each screen is backed by one [`ResourceController`], the single source of
//! truth for that resource's page of remote data. The controller composes
//! the pieces this crate provides:
//!
//! - [`envelope`] - tolerant extraction of items and pagination metadata
//!   from the API's varying response shapes
//! - [`filter`] - pure, client-side search and status filtering over the
//!   loaded page
//! - [`selection`] - multi-select state for bulk operations
//! - [`payload`] - outgoing payload assembly, validation, and JSON-vs-
//!   multipart encoding
//! - [`client`] - the authenticated REST client with timeout and 401
//!   handling
//! - [`resources`] - one descriptor per manageable resource (routes,
//!   drafts, validation rules)

pub mod client;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod models;
pub mod payload;
pub mod resources;
pub mod selection;

pub use client::ApiClient;
pub use controller::{PageState, ResourceController};
pub use error::{CatalogError, Result};
pub use models::ResourceKind;
