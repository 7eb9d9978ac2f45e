//! Data carried through one mint attempt.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::{IPFS_DIRECTORY_MIMETYPE, IPFS_URI_PREFIX};

/// Pixel dimensions of an image asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Immutable payload with its media type and file name.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub data: Bytes,
    pub mime_type: String,
    pub file_name: String,
    pub dimensions: Option<Dimensions>,
}

impl Asset {
    pub fn new(
        data: impl Into<Bytes>,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            file_name: file_name.into(),
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Same payload under a different file name.
    pub fn renamed(&self, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..self.clone()
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_directory(&self) -> bool {
        self.mime_type == IPFS_DIRECTORY_MIMETYPE
    }
}

/// One file of a [`DirectoryBundle`], addressed relative to the bundle root.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleEntry {
    pub path: String,
    pub asset: Asset,
}

impl BundleEntry {
    /// Directory placeholders are kept in the bundle but never uploaded.
    pub fn is_placeholder(&self) -> bool {
        self.path.is_empty() || self.asset.is_directory()
    }
}

/// Files unpacked from an archive, rooted at the directory holding `index.html`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryBundle {
    /// File name of the archive the bundle came from.
    pub archive_name: String,
    /// Archive directory that became the root; empty when `index.html` sits
    /// at the top level.
    pub root: String,
    entries: Vec<BundleEntry>,
    /// Position of each path in `entries`.
    index: HashMap<String, usize>,
}

impl DirectoryBundle {
    pub fn new(archive_name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            archive_name: archive_name.into(),
            root: root.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert an entry, replacing any previous entry with the same path in place.
    pub fn insert(&mut self, path: impl Into<String>, asset: Asset) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&position) => self.entries[position].asset = asset,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push(BundleEntry { path, asset });
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.index.get(path).map(|&position| &self.entries[position].asset)
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Entries that are transmitted on upload.
    pub fn uploadable(&self) -> impl Iterator<Item = &BundleEntry> {
        self.entries.iter().filter(|e| !e.is_placeholder())
    }

    /// Drop the empty-path root marker.
    pub fn remove_root_marker(&mut self) {
        if self.index.remove("").is_none() {
            return;
        }
        self.entries.retain(|e| !e.path.is_empty());
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, e)| (e.path.clone(), position))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes of every uploadable entry.
    pub fn total_size(&self) -> usize {
        self.uploadable().map(|e| e.asset.size()).sum()
    }
}

/// Content identifier returned by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentIdentifier(String);

impl ContentIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// `ipfs://<cid>`; values that already carry the scheme are returned unchanged.
    pub fn to_uri(&self) -> String {
        if self.0.starts_with(IPFS_URI_PREFIX) {
            self.0.clone()
        } else {
            format!("{}{}", IPFS_URI_PREFIX, self.0)
        }
    }
}

impl Display for ContentIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Logical role of an upload within a mint attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetRole {
    Artifact,
    Cover,
    Thumbnail,
    Metadata,
}

impl Display for AssetRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetRole::Artifact => write!(f, "artifact"),
            AssetRole::Cover => write!(f, "cover"),
            AssetRole::Thumbnail => write!(f, "thumbnail"),
            AssetRole::Metadata => write!(f, "metadata"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub role: AssetRole,
    pub cid: ContentIdentifier,
}

impl UploadResult {
    pub fn new(role: AssetRole, cid: ContentIdentifier) -> Self {
        Self { role, cid }
    }

    pub fn uri(&self) -> String {
        self.cid.to_uri()
    }
}

/// Stages of a single mint attempt. Stages only move forward; any failure
/// ends in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "reason", rename_all = "snake_case")]
pub enum MintStage {
    Idle,
    UploadingArtifact,
    UploadingCover,
    UploadingThumbnail,
    SynthesizingMetadata,
    UploadingMetadata,
    Done,
    Failed(String),
}

impl MintStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MintStage::Done | MintStage::Failed(_))
    }
}

impl Display for MintStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MintStage::Idle => write!(f, "idle"),
            MintStage::UploadingArtifact => write!(f, "uploading artifact"),
            MintStage::UploadingCover => write!(f, "uploading cover"),
            MintStage::UploadingThumbnail => write!(f, "uploading thumbnail"),
            MintStage::SynthesizingMetadata => write!(f, "synthesizing metadata"),
            MintStage::UploadingMetadata => write!(f, "uploading metadata"),
            MintStage::Done => write!(f, "done"),
            MintStage::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
