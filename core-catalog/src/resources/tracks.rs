//! Music tracks resource

use crate::models::{ResourceKind, Track};
use crate::payload::{FilePart, Payload, ValidationErrors, Validator, WriteMode};
use crate::resources::{ResourceDesc, ResourceDraft, Routes};

static ROUTES: Routes = Routes {
    list: "/musics/getAll",
    by_id: "/musics",
    create: "/musics/add",
    update: "/musics",
    delete: "/musics",
    toggle_status: None,
};

/// Descriptor for the music library screen.
pub struct Tracks;

impl ResourceDesc for Tracks {
    type Model = Track;
    type Draft = TrackDraft;

    fn kind() -> ResourceKind {
        ResourceKind::Track
    }

    fn routes() -> &'static Routes {
        &ROUTES
    }

    fn collection_keys() -> &'static [&'static str] {
        &["musics", "music"]
    }
}

/// Input for uploading or editing a track.
///
/// The audio file is mandatory when uploading; edits may omit both files to
/// keep the existing uploads.
#[derive(Debug, Clone, Default)]
pub struct TrackDraft {
    pub title: String,
    pub description: String,
    pub artists: Vec<String>,
    pub album_id: String,
    pub sub_category_id: String,
    pub image: Option<FilePart>,
    pub audio: Option<FilePart>,
}

impl TrackDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_album(mut self, album_id: impl Into<String>) -> Self {
        self.album_id = album_id.into();
        self
    }

    pub fn with_subcategory(mut self, sub_category_id: impl Into<String>) -> Self {
        self.sub_category_id = sub_category_id.into();
        self
    }

    pub fn with_image(mut self, image: FilePart) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_audio(mut self, audio: FilePart) -> Self {
        self.audio = Some(audio);
        self
    }
}

impl ResourceDraft for TrackDraft {
    fn validate(&self, mode: WriteMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.require_text("title", &self.title, "Title is required");
        v.require_text("description", &self.description, "Description is required");
        v.require(
            "artists",
            self.artists.iter().any(|a| !a.trim().is_empty()),
            "At least one artist is required",
        );
        v.require_text(
            "subCategoryId",
            &self.sub_category_id,
            "Subcategory is required",
        );
        if mode == WriteMode::Create {
            v.require("audio", self.audio.is_some(), "An audio file is required");
        }
        v.finish()
    }

    fn into_payload(self) -> Payload {
        Payload::new()
            .text("title", &self.title)
            .list("artists", &self.artists)
            .text("description", &self.description)
            .text("albumId", &self.album_id)
            .text("subCategoryId", &self.sub_category_id)
            .maybe_file(self.image)
            .maybe_file(self.audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::EncodedBody;
    use bytes::Bytes;

    fn audio() -> FilePart {
        FilePart::new("audio", "track.mp3", "audio/mpeg", Bytes::from_static(b"mp3"))
    }

    fn draft() -> TrackDraft {
        TrackDraft::new("Sunset Dreams")
            .with_description("Warm evening pop")
            .with_artists(["The Dreamers"])
            .with_subcategory("s-1")
    }

    #[test]
    fn test_upload_requires_audio() {
        let errors = draft().validate(WriteMode::Create).unwrap_err();
        assert!(errors.field("audio").is_some());

        assert!(draft().with_audio(audio()).validate(WriteMode::Create).is_ok());
    }

    #[test]
    fn test_edit_keeps_existing_audio() {
        assert!(draft().validate(WriteMode::Update).is_ok());
    }

    #[test]
    fn test_blank_artists_rejected() {
        let d = draft().with_artists(["  ", ""]);
        let errors = d.validate(WriteMode::Update).unwrap_err();
        assert!(errors.field("artists").is_some());
    }

    #[test]
    fn test_upload_payload_is_multipart() {
        let body = draft().with_audio(audio()).into_payload().encode();
        assert!(matches!(body, EncodedBody::Multipart(_)));
    }

    #[test]
    fn test_edit_without_files_is_json() {
        let body = draft().into_payload().encode();
        match body {
            EncodedBody::Json(value) => {
                assert_eq!(value["subCategoryId"], "s-1");
                assert_eq!(value["artists"], serde_json::json!(["The Dreamers"]));
            }
            _ => panic!("expected JSON"),
        }
    }
}
