//! Subcategories resource
//!
//! Subcategories hang off a parent category. The canonical list operation
//! uses the batched `getAll` endpoint; [`list_by_categories`] reproduces the
//! per-category fan-out for backends that lack it.

use crate::client::ApiClient;
use crate::envelope;
use crate::error::Result;
use crate::models::{Record, ResourceKind, Subcategory};
use crate::payload::{FilePart, Payload, ValidationErrors, Validator, WriteMode};
use crate::resources::{ResourceDesc, ResourceDraft, Routes};
use std::collections::HashSet;
use tracing::warn;

static ROUTES: Routes = Routes {
    list: "/subCategories/getAll",
    by_id: "/subCategories",
    create: "/subCategories/create",
    update: "/subCategories/update",
    delete: "/subCategories/delete",
    toggle_status: None,
};

/// Base path for the per-category listing endpoint.
const BY_CATEGORY_PATH: &str = "/subCategories/category";

/// Descriptor for the subcategory management screen.
pub struct Subcategories;

impl ResourceDesc for Subcategories {
    type Model = Subcategory;
    type Draft = SubcategoryDraft;

    fn kind() -> ResourceKind {
        ResourceKind::Subcategory
    }

    fn routes() -> &'static Routes {
        &ROUTES
    }

    fn collection_keys() -> &'static [&'static str] {
        &["subcategories", "subCategories"]
    }
}

/// Fetch subcategories by walking every parent category, one list call per
/// category, deduplicating by id.
///
/// This is an O(categories) request pattern kept only as a fallback for
/// backends without the batched `getAll` route. A category whose fetch fails
/// is skipped with a warning; the others still contribute, so one broken
/// parent cannot blank the whole screen.
pub async fn list_by_categories(
    client: &ApiClient,
    category_ids: &[String],
) -> Result<Vec<Subcategory>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut combined = Vec::new();

    for category_id in category_ids {
        let path = format!("{}/{}", BY_CATEGORY_PATH, category_id);
        let body = match client.get(&path, &[]).await {
            Ok(body) => body,
            Err(e) => {
                warn!(category_id = %category_id, error = %e, "Subcategory fetch failed, skipping category");
                continue;
            }
        };

        let page = envelope::normalize(&body, 1, Subcategories::collection_keys());
        for value in page.items {
            match serde_json::from_value::<Subcategory>(value) {
                Ok(sub) => {
                    if seen.insert(sub.record_id().to_string()) {
                        combined.push(sub);
                    }
                }
                Err(e) => warn!(error = %e, "Skipping malformed subcategory"),
            }
        }
    }

    Ok(combined)
}

/// Input for creating or updating a subcategory.
#[derive(Debug, Clone, Default)]
pub struct SubcategoryDraft {
    pub name: String,
    pub description: String,
    /// Parent category; the create endpoint resolves it from the body.
    pub category_id: String,
    pub image: Option<FilePart>,
}

impl SubcategoryDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category_id: category_id.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: FilePart) -> Self {
        self.image = Some(image);
        self
    }
}

impl ResourceDraft for SubcategoryDraft {
    fn validate(&self, _mode: WriteMode) -> std::result::Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.require_text("name", &self.name, "Subcategory name is required");
        v.require_text("description", &self.description, "Description is required");
        v.require_text(
            "categoryId",
            &self.category_id,
            "A parent category is required",
        );
        v.finish()
    }

    fn into_payload(self) -> Payload {
        Payload::new()
            .text("name", &self.name)
            .text("description", &self.description)
            .text("categoryId", &self.category_id)
            .maybe_file(self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_category_required() {
        let errors = SubcategoryDraft::new("Bebop", "Fast jazz", "")
            .validate(WriteMode::Create)
            .unwrap_err();
        assert!(errors.field("categoryId").is_some());
    }

    #[test]
    fn test_valid_draft_passes_both_modes() {
        let draft = SubcategoryDraft::new("Bebop", "Fast jazz", "c-1");
        assert!(draft.validate(WriteMode::Create).is_ok());
        assert!(draft.validate(WriteMode::Update).is_ok());
    }
}
