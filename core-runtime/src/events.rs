//! # Event Bus System
//!
//! Provides an event-driven architecture for the admin console core using
//! `tokio::sync::broadcast`. This module enables decoupled communication
//! between core modules through typed events: the auth manager announces
//! session changes, resource controllers announce catalog mutations, and any
//! number of host-side subscribers (badge counters, audit panes, toasts)
//! listen independently.
//!
//! ## Usage
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, SessionEvent};
//!
//! let event_bus = EventBus::new(100);
//! let event = CoreEvent::Session(SessionEvent::SignedIn {
//!     user_id: "user-123".to_string(),
//! });
//!
//! event_bus.emit(event).ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => {
//!                 eprintln!("Missed {} events", n);
//!             }
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The bus uses `tokio::sync::broadcast`: subscribers that fall behind
//! receive `RecvError::Lagged(n)` (non-fatal; keep receiving) and
//! `RecvError::Closed` once every sender is gone (treat as shutdown).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that can't keep up will receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
///
/// This is the main event type published and received through the event bus.
/// It wraps domain-specific event types for different modules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Session-related events
    Session(SessionEvent),
    /// Catalog mutation events
    Catalog(CatalogEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Session(e) => e.description(),
            CoreEvent::Catalog(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Session(SessionEvent::SessionExpired) => EventSeverity::Warning,
            CoreEvent::Session(SessionEvent::AuthError { .. }) => EventSeverity::Error,
            CoreEvent::Session(SessionEvent::SignedIn { .. }) => EventSeverity::Info,
            CoreEvent::Catalog(CatalogEvent::BulkDeleted { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Session Events
// ============================================================================

/// Events related to the administrator's session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SessionEvent {
    /// Administrator successfully authenticated.
    SignedIn {
        /// Identifier of the signed-in user.
        user_id: String,
    },
    /// Administrator signed out locally.
    SignedOut,
    /// The server rejected the session token (401); the session was cleared
    /// and the host shell should navigate to its login view.
    SessionExpired,
    /// Authentication attempt failed.
    AuthError {
        /// Human-readable error message (server-provided when available).
        message: String,
    },
}

impl SessionEvent {
    fn description(&self) -> &str {
        match self {
            SessionEvent::SignedIn { .. } => "Administrator signed in",
            SessionEvent::SignedOut => "Administrator signed out",
            SessionEvent::SessionExpired => "Session expired",
            SessionEvent::AuthError { .. } => "Authentication error",
        }
    }
}

// ============================================================================
// Catalog Events
// ============================================================================

/// Events emitted after successful catalog mutations.
///
/// `resource` carries the resource kind as a string (e.g. `"tracks"`,
/// `"categories"`) so this crate stays below the catalog layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum CatalogEvent {
    /// A new item was created.
    ItemCreated {
        /// Resource kind identifier.
        resource: String,
    },
    /// An existing item was updated.
    ItemUpdated {
        /// Resource kind identifier.
        resource: String,
        /// Identifier of the updated item.
        id: String,
    },
    /// An item was deleted.
    ItemDeleted {
        /// Resource kind identifier.
        resource: String,
        /// Identifier of the deleted item.
        id: String,
    },
    /// A bulk delete completed (possibly partially).
    BulkDeleted {
        /// Resource kind identifier.
        resource: String,
        /// Number of items successfully deleted.
        deleted: usize,
        /// Number of deletions that failed.
        failed: usize,
    },
    /// An item's active flag was toggled.
    StatusToggled {
        /// Resource kind identifier.
        resource: String,
        /// Identifier of the toggled item.
        id: String,
    },
}

impl CatalogEvent {
    fn description(&self) -> &str {
        match self {
            CatalogEvent::ItemCreated { .. } => "Catalog item created",
            CatalogEvent::ItemUpdated { .. } => "Catalog item updated",
            CatalogEvent::ItemDeleted { .. } => "Catalog item deleted",
            CatalogEvent::BulkDeleted { .. } => "Catalog items bulk-deleted",
            CatalogEvent::StatusToggled { .. } => "Catalog item status toggled",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for publishing core events.
///
/// Cloning an `EventBus` is cheap and every clone publishes into the same
/// channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer per subscriber.
    ///   When a subscriber falls behind by more than this amount, it will
    ///   receive a `RecvError::Lagged` error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error when there are no active subscribers. Emitters that don't care
    /// whether anyone is listening call `.ok()` on the result.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        tracing::debug!(event = event.description(), "Emitting core event");
        self.sender.send(event)
    }

    /// Creates a new subscription to the event stream.
    ///
    /// Each subscriber receives every event emitted after it subscribed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_and_receive() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit(CoreEvent::Session(SessionEvent::SignedIn {
            user_id: "u-1".to_string(),
        }))
        .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            CoreEvent::Session(SessionEvent::SignedIn {
                user_id: "u-1".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_errors() {
        let bus = EventBus::new(8);
        let result = bus.emit(CoreEvent::Session(SessionEvent::SignedOut));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_receive() {
        let bus = EventBus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(CoreEvent::Catalog(CatalogEvent::ItemDeleted {
            resource: "tracks".to_string(),
            id: "t-9".to_string(),
        }))
        .unwrap();

        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[test]
    fn test_severity_mapping() {
        let expired = CoreEvent::Session(SessionEvent::SessionExpired);
        assert_eq!(expired.severity(), EventSeverity::Warning);

        let created = CoreEvent::Catalog(CatalogEvent::ItemCreated {
            resource: "albums".to_string(),
        });
        assert_eq!(created.severity(), EventSeverity::Debug);
    }
}
