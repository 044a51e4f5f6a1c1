//! Media entities - attachments of a post

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media a post carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    #[default]
    #[serde(alias = "Text", alias = "text")]
    Text,
    #[serde(alias = "Image", alias = "image")]
    Image,
    #[serde(alias = "Audio", alias = "audio")]
    Audio,
    #[serde(alias = "Video", alias = "video")]
    Video,
}

impl MediaType {
    /// Wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
        }
    }

    /// MIME pattern accepted for uploads of this media type
    pub const fn accepted_mime(self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Audio => "audio/*",
            Self::Video => "video/*",
            Self::Text => "*/*",
        }
    }

    /// Check a concrete MIME type against `accepted_mime`
    pub fn accepts(self, content_type: &str) -> bool {
        match self.accepted_mime().strip_suffix('*') {
            Some("*/") | None => true,
            Some(prefix) => content_type.starts_with(prefix),
        }
    }

    /// Parse a user-facing label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "TEXT" => Some(Self::Text),
            "IMAGE" => Some(Self::Image),
            "AUDIO" => Some(Self::Audio),
            "VIDEO" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Result of a media upload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadedMedia {
    /// URLs as returned by the backend; these are submitted with the post
    pub media_urls: Vec<String>,
    /// Absolute URLs suitable for previewing
    pub display_urls: Vec<String>,
}
