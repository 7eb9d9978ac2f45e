use mintpack_core::constants::{MAX_DESCRIPTION_LENGTH, MAX_RIGHTS_LENGTH, MINT_FILESIZE_LIMIT};
use mintpack_core::mime::{is_allowed_upload, is_image};
use mintpack_core::Asset;

use crate::error::MintError;

/// Everything a caller supplies for one mint attempt.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub title: String,
    pub description: String,
    pub rights: String,
    /// Comma separated tag list.
    pub tags: String,
    /// Address recorded as the only creator.
    pub creator: String,
    pub artifact: Asset,
    /// Explicit cover source; the artifact itself is used when absent.
    pub cover: Option<Asset>,
}

impl MintRequest {
    pub fn new(artifact: Asset, creator: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            rights: String::new(),
            tags: String::new(),
            creator: creator.into(),
            artifact,
            cover: None,
        }
    }

    pub fn validate(&self) -> Result<(), MintError> {
        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(MintError::InvalidRequest(format!(
                "Description is longer than {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
        if self.rights.chars().count() > MAX_RIGHTS_LENGTH {
            return Err(MintError::InvalidRequest(format!(
                "Rights are longer than {} characters",
                MAX_RIGHTS_LENGTH
            )));
        }

        let artifact = &self.artifact;
        if artifact.data.is_empty() {
            return Err(MintError::InvalidRequest(format!(
                "{} is empty",
                artifact.file_name
            )));
        }
        if artifact.size() > MINT_FILESIZE_LIMIT {
            return Err(MintError::InvalidRequest(format!(
                "{} exceeds the {} MB limit",
                artifact.file_name,
                MINT_FILESIZE_LIMIT / (1024 * 1024)
            )));
        }
        if !is_allowed_upload(&artifact.mime_type) {
            return Err(MintError::InvalidRequest(format!(
                "File type '{}' is not supported",
                artifact.mime_type
            )));
        }

        if let Some(cover) = &self.cover {
            if !is_image(&cover.mime_type) {
                return Err(MintError::InvalidRequest(format!(
                    "Cover must be an image, got '{}'",
                    cover.mime_type
                )));
            }
        }

        Ok(())
    }
}
