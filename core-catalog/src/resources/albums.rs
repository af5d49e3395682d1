//! Albums resource

use crate::models::{Album, ResourceKind};
use crate::payload::{FilePart, Payload, ValidationErrors, Validator, WriteMode};
use crate::resources::{ResourceDesc, ResourceDraft, Routes};

static ROUTES: Routes = Routes {
    list: "/albums/getAll",
    by_id: "/albums",
    create: "/albums/create",
    update: "/albums/update",
    delete: "/albums/delete",
    toggle_status: None,
};

/// Descriptor for the album management screen.
pub struct Albums;

impl ResourceDesc for Albums {
    type Model = Album;
    type Draft = AlbumDraft;

    fn kind() -> ResourceKind {
        ResourceKind::Album
    }

    fn routes() -> &'static Routes {
        &ROUTES
    }

    fn collection_keys() -> &'static [&'static str] {
        &["albums"]
    }
}

/// Input for creating or updating an album.
#[derive(Debug, Clone, Default)]
pub struct AlbumDraft {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub image: Option<FilePart>,
}

impl AlbumDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            is_active: true,
            image: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn with_image(mut self, image: FilePart) -> Self {
        self.image = Some(image);
        self
    }
}

impl ResourceDraft for AlbumDraft {
    fn validate(&self, _mode: WriteMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.require_text("name", &self.name, "Album name is required");
        v.require_text("description", &self.description, "Description is required");
        v.finish()
    }

    fn into_payload(self) -> Payload {
        Payload::new()
            .text("name", &self.name)
            .text("description", &self.description)
            .flag("isActive", self.is_active)
            .maybe_file(self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::EncodedBody;
    use bytes::Bytes;

    #[test]
    fn test_image_is_optional() {
        let draft = AlbumDraft::new("Golden Hour", "Debut record");
        assert!(draft.validate(WriteMode::Create).is_ok());
    }

    #[test]
    fn test_payload_with_image_is_multipart() {
        let body = AlbumDraft::new("Golden Hour", "Debut record")
            .with_image(FilePart::new(
                "image",
                "cover.jpg",
                "image/jpeg",
                Bytes::from_static(b"jpg"),
            ))
            .into_payload()
            .encode();
        assert!(matches!(body, EncodedBody::Multipart(_)));
    }

    #[test]
    fn test_inactive_flag_carried() {
        let body = AlbumDraft::new("Golden Hour", "Debut record")
            .with_active(false)
            .into_payload()
            .encode();
        match body {
            EncodedBody::Json(value) => assert_eq!(value["isActive"], false),
            _ => panic!("expected JSON"),
        }
    }
}
