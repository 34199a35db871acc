use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{BoolFromInt, serde_as};

use super::serde_helpers::timestamp;
use crate::VesselRegistryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MemoId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PhotoId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FileId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VesselMemo {
    pub id: MemoId,
    pub vessel_id: VesselRegistryId,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VesselPhoto {
    pub id: PhotoId,
    pub vessel_id: VesselRegistryId,
    /// Name of the stored file, see `photo_url`.
    pub filename: String,
    pub original_name: String,
    pub file_size: u64,
    pub mime_type: String,
    /// At most one photo of a vessel is primary.
    #[serde_as(as = "BoolFromInt")]
    pub is_primary: bool,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VesselFile {
    pub id: FileId,
    pub vessel_id: VesselRegistryId,
    pub filename: String,
    pub original_name: String,
    pub file_size: u64,
    pub mime_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// A file picked by the user, sent as the `file` part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
