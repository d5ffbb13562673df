use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Which image the viewer renders.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Original,
    Result,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Original => "Original",
            ViewMode::Result => "Saliency Map",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// `data:<mime>;base64,<payload>` string that an `<img>` can render directly.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        DataUrl(format!("data:{};base64,{}", media_type, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Matches the picker's `accept="image/*"` filter.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .split_once('/')
        .is_some_and(|(kind, subtype)| kind == "image" && !subtype.is_empty())
}

/// The file the user picked, decoded for preview and kept for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub media_type: String,
    pub preview: DataUrl,
    bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn from_bytes(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let media_type = media_type.into();
        Self {
            file_name: file_name.into(),
            preview: DataUrl::encode(&media_type, &bytes),
            media_type,
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_upload(&self) -> ImageUpload {
        ImageUpload {
            file_name: self.file_name.clone(),
            media_type: self.media_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Payload for the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// The single multipart part carrying the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormPart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub media_type: &'a str,
    pub bytes: &'a [u8],
}

/// Saliency map bytes as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaliencyImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}
