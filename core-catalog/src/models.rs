//! Domain models for the managed catalog
//!
//! Every model tolerates the API's loose conventions: identifiers arrive
//! under `_id` or `id`, most fields are optional, and unknown fields are
//! ignored so payload growth on the server never breaks a screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Resource kinds
// =============================================================================

/// The manageable resource types of the console.
///
/// # Examples
///
/// ```
/// use core_catalog::models::ResourceKind;
///
/// assert_eq!(ResourceKind::Track.as_str(), "tracks");
/// assert_eq!(ResourceKind::SubscriptionPlan.display_name(), "Subscription Plans");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    User,
    Track,
    Category,
    Subcategory,
    Album,
    SubscriptionPlan,
}

impl ResourceKind {
    /// Stable identifier string, used for logging and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "users",
            ResourceKind::Track => "tracks",
            ResourceKind::Category => "categories",
            ResourceKind::Subcategory => "subcategories",
            ResourceKind::Album => "albums",
            ResourceKind::SubscriptionPlan => "subscription-plans",
        }
    }

    /// Human-readable name for headings and messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::User => "Users",
            ResourceKind::Track => "Music Library",
            ResourceKind::Category => "Categories",
            ResourceKind::Subcategory => "Subcategories",
            ResourceKind::Album => "Albums",
            ResourceKind::SubscriptionPlan => "Subscription Plans",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// Record traits
// =============================================================================

/// Resolve a dual-keyed identifier, preferring `_id` over `id`.
///
/// The backend is inconsistent about which key carries the identifier, so
/// every place that matches or keys items goes through this one accessor.
pub fn dual_id<'a>(object_id: &'a Option<String>, id: &'a Option<String>) -> &'a str {
    object_id
        .as_deref()
        .or(id.as_deref())
        .unwrap_or_default()
}

/// A catalog record with a stable identity and an active flag.
pub trait Record {
    /// The record's identifier, whichever key the server used.
    fn record_id(&self) -> &str;

    /// Soft-enable flag; records without one count as active.
    fn is_active(&self) -> bool {
        true
    }
}

/// A record that can be matched by the client-side search box.
pub trait Searchable {
    /// The strings the search term is matched against.
    fn search_terms(&self) -> Vec<&str>;
}

// =============================================================================
// Nested references
// =============================================================================

/// Embedded reference to a related record (e.g. a track's category).
///
/// Only the name is guaranteed; ids are carried when the server embeds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    pub fn ref_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Domain models
// =============================================================================

/// Platform listener or administrator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for User {
    fn record_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for User {
    fn search_terms(&self) -> Vec<&str> {
        let mut terms = vec![self.name.as_str(), self.email.as_str()];
        if let Some(location) = &self.location {
            terms.push(location);
        }
        terms
    }
}

/// Music track with its embedded relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Track {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Track title.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Performing artists, in credit order.
    #[serde(default)]
    pub artists: Vec<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Audio file URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Duration in seconds, when the server has probed the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NamedRef>,
    #[serde(rename = "subCategory", default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<NamedRef>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Track {
    fn record_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for Track {
    fn search_terms(&self) -> Vec<&str> {
        let mut terms = vec![self.title.as_str(), self.description.as_str()];
        terms.extend(self.artists.iter().map(|a| a.as_str()));
        if let Some(category) = &self.category {
            terms.push(&category.name);
        }
        if let Some(sub_category) = &self.sub_category {
            terms.push(&sub_category.name);
        }
        if let Some(album) = &self.album {
            terms.push(&album.name);
        }
        terms
    }
}

/// Top-level music category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Category {
    fn record_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for Category {
    fn search_terms(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

/// Second-level category, owned by a parent [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Subcategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Parent category, embedded by the server when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NamedRef>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Subcategory {
    fn record_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for Subcategory {
    fn search_terms(&self) -> Vec<&str> {
        let mut terms = vec![self.name.as_str(), self.description.as_str()];
        if let Some(category) = &self.category {
            terms.push(&category.name);
        }
        terms
    }
}

/// Album grouping tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Album {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cover image URL; older records carry it as `imageUrl`.
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Album {
    fn record_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for Album {
    fn search_terms(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

/// Subscription plan offered to listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SubscriptionPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Monthly price in the platform currency.
    #[serde(default)]
    pub price: f64,
    /// Billing period label (e.g. "monthly").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for SubscriptionPlan {
    fn record_id(&self) -> &str {
        dual_id(&self.object_id, &self.id)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for SubscriptionPlan {
    fn search_terms(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_id_prefers_object_id() {
        let track: Track = serde_json::from_value(serde_json::json!({
            "_id": "m-1", "id": "legacy", "title": "Sunset Dreams"
        }))
        .unwrap();
        assert_eq!(track.record_id(), "m-1");
    }

    #[test]
    fn test_dual_id_falls_back() {
        let track: Track = serde_json::from_value(serde_json::json!({
            "id": "legacy", "title": "Sunset Dreams"
        }))
        .unwrap();
        assert_eq!(track.record_id(), "legacy");
    }

    #[test]
    fn test_missing_is_active_defaults_to_active() {
        let category: Category =
            serde_json::from_value(serde_json::json!({"_id": "c-1", "name": "Jazz"})).unwrap();
        assert!(Record::is_active(&category));
    }

    #[test]
    fn test_track_search_terms_include_relations() {
        let track: Track = serde_json::from_value(serde_json::json!({
            "_id": "m-2",
            "title": "Electric Nights",
            "artists": ["Neon Lights"],
            "category": {"_id": "c-1", "name": "Electronic"},
            "subCategory": {"_id": "s-1", "name": "Synthwave"},
            "album": {"_id": "a-1", "name": "Night Drive"}
        }))
        .unwrap();

        let terms = track.search_terms();
        assert!(terms.contains(&"Neon Lights"));
        assert!(terms.contains(&"Electronic"));
        assert!(terms.contains(&"Synthwave"));
        assert!(terms.contains(&"Night Drive"));
    }

    #[test]
    fn test_album_accepts_image_url_alias() {
        let album: Album = serde_json::from_value(serde_json::json!({
            "_id": "a-1", "name": "Golden Hour", "imageUrl": "https://cdn/img.png"
        }))
        .unwrap();
        assert_eq!(album.image.as_deref(), Some("https://cdn/img.png"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u-1",
            "name": "John",
            "email": "john@example.com",
            "currentScreen": "LANDING_SCREEN",
            "loginType": "password"
        }))
        .unwrap();
        assert_eq!(user.record_id(), "u-1");
    }
}
