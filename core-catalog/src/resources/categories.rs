//! Music categories resource

use crate::models::{Category, ResourceKind};
use crate::payload::{FilePart, Payload, ValidationErrors, Validator, WriteMode};
use crate::resources::{ResourceDesc, ResourceDraft, Routes};

static ROUTES: Routes = Routes {
    list: "/categories/getAll",
    by_id: "/categories",
    create: "/categories/create",
    update: "/categories/update",
    delete: "/categories/delete",
    toggle_status: None,
};

/// Descriptor for the category management screen.
pub struct Categories;

impl ResourceDesc for Categories {
    type Model = Category;
    type Draft = CategoryDraft;

    fn kind() -> ResourceKind {
        ResourceKind::Category
    }

    fn routes() -> &'static Routes {
        &ROUTES
    }

    fn collection_keys() -> &'static [&'static str] {
        &["categories"]
    }
}

/// Input for creating or updating a category.
///
/// The cover image is mandatory on create; updates without a new image keep
/// the existing one.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub image: Option<FilePart>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: FilePart) -> Self {
        self.image = Some(image);
        self
    }
}

impl ResourceDraft for CategoryDraft {
    fn validate(&self, mode: WriteMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.require_text("name", &self.name, "Category name is required");
        v.require_text(
            "description",
            &self.description,
            "Category description is required",
        );
        if mode == WriteMode::Create {
            v.require("image", self.image.is_some(), "An image is required");
        }
        v.finish()
    }

    fn into_payload(self) -> Payload {
        Payload::new()
            .text("name", &self.name)
            .text("description", &self.description)
            .maybe_file(self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_image_required_on_create_only() {
        let draft = CategoryDraft::new("Jazz", "Smooth things");
        assert!(draft.validate(WriteMode::Create).is_err());
        assert!(draft.validate(WriteMode::Update).is_ok());

        let with_image = CategoryDraft::new("Jazz", "Smooth things").with_image(FilePart::new(
            "image",
            "jazz.png",
            "image/png",
            Bytes::from_static(b"png"),
        ));
        assert!(with_image.validate(WriteMode::Create).is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let errors = CategoryDraft::new("  ", "")
            .validate(WriteMode::Update)
            .unwrap_err();
        assert!(errors.field("name").is_some());
        assert!(errors.field("description").is_some());
    }
}
