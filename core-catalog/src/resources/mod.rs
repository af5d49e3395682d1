//! Resource descriptors
//!
//! One module per manageable resource, each describing its REST routes, its
//! model type, and its draft (the validated input for create/update). The
//! [`ResourceController`](crate::controller::ResourceController) is generic
//! over these descriptors; nothing resource-specific lives in the controller
//! itself.

pub mod albums;
pub mod categories;
pub mod plans;
pub mod subcategories;
pub mod tracks;
pub mod users;

pub use albums::{AlbumDraft, Albums};
pub use categories::{Categories, CategoryDraft};
pub use plans::{PlanDraft, Plans};
pub use subcategories::{Subcategories, SubcategoryDraft};
pub use tracks::{TrackDraft, Tracks};
pub use users::{UserDraft, Users};

use crate::models::{Record, ResourceKind, Searchable};
use crate::payload::{Payload, ValidationErrors, WriteMode};
use serde::de::DeserializeOwned;

/// REST route table for one resource.
///
/// `update`, `delete`, and `by_id` are base paths; the item id is appended
/// as a final segment. `toggle_status` is the base for the
/// `{base}/{id}/toggle-status` PATCH, for the resources that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routes {
    pub list: &'static str,
    pub by_id: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
    pub toggle_status: Option<&'static str>,
}

impl Routes {
    pub fn by_id_path(&self, id: &str) -> String {
        format!("{}/{}", self.by_id, id)
    }

    pub fn update_path(&self, id: &str) -> String {
        format!("{}/{}", self.update, id)
    }

    pub fn delete_path(&self, id: &str) -> String {
        format!("{}/{}", self.delete, id)
    }

    pub fn toggle_path(&self, id: &str) -> Option<String> {
        self.toggle_status
            .map(|base| format!("{}/{}/toggle-status", base, id))
    }
}

/// Static description of a manageable resource.
pub trait ResourceDesc: Send + Sync + 'static {
    /// The deserialized item type.
    type Model: Record + Searchable + Clone + DeserializeOwned + Send + Sync + 'static;
    /// The validated input for create/update.
    type Draft: ResourceDraft;

    fn kind() -> ResourceKind;

    fn routes() -> &'static Routes;

    /// Named collection keys probed by the envelope normalizer, in order.
    fn collection_keys() -> &'static [&'static str];
}

/// Validated, encodable input for a create or update call.
pub trait ResourceDraft: Send + Sync {
    /// Check the draft; failures are field-scoped and short-circuit before
    /// any network call.
    fn validate(&self, mode: WriteMode) -> Result<(), ValidationErrors>;

    /// Assemble the outgoing payload. Only called on a validated draft.
    fn into_payload(self) -> Payload;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths() {
        let routes = Tracks::routes();
        assert_eq!(routes.update_path("m-1"), "/musics/m-1");
        assert_eq!(routes.delete_path("m-1"), "/musics/m-1");
        assert!(routes.toggle_path("m-1").is_none());
    }

    #[test]
    fn test_toggle_path_for_plans() {
        let routes = Plans::routes();
        assert_eq!(
            routes.toggle_path("p-1").as_deref(),
            Some("/subscriptions/p-1/toggle-status")
        );
    }
}
