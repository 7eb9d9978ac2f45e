//! Cover and thumbnail derivation

mod rendition;

pub use rendition::{fit_within, read_dimensions, ImageRenditionGenerator};

use async_trait::async_trait;
use mintpack_core::mime::is_image;
use mintpack_core::naming::{cover_file_name, thumbnail_file_name};
use mintpack_core::Asset;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Unsupported source type: {0}")]
    Unsupported(String),
}

/// Bounding box and encoder quality for a rendition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenditionOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality in `0.0..=1.0`.
    pub quality: f32,
}

impl RenditionOptions {
    pub const COVER: Self = Self {
        max_width: 1024,
        max_height: 1024,
        quality: 0.85,
    };

    pub const THUMBNAIL: Self = Self {
        max_width: 350,
        max_height: 350,
        quality: 0.85,
    };
}

/// Produces a reduced JPEG rendition of an image.
#[async_trait]
pub trait DerivedAssetGenerator: Send + Sync {
    async fn generate(
        &self,
        source: &Asset,
        options: &RenditionOptions,
    ) -> Result<Asset, DerivationError>;
}

/// Cover and thumbnail for one artifact; a thumbnail only exists alongside a cover.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedAssets {
    pub cover: Option<Asset>,
    pub thumbnail: Option<Asset>,
}

/// Derive the cover, then the thumbnail, from `source`.
///
/// Non-image sources yield nothing. Generation failures are logged and
/// leave the corresponding asset empty; the thumbnail is only attempted
/// once a cover exists. Outputs are named after `artifact_name`.
pub async fn derive_cover_and_thumbnail(
    generator: &dyn DerivedAssetGenerator,
    source: &Asset,
    artifact_name: &str,
) -> DerivedAssets {
    if !is_image(&source.mime_type) {
        tracing::debug!(mime_type = %source.mime_type, "Source is not an image, no cover derived");
        return DerivedAssets::default();
    }

    let cover = match generator.generate(source, &RenditionOptions::COVER).await {
        Ok(cover) => cover.renamed(cover_file_name(artifact_name)),
        Err(e) => {
            tracing::warn!(error = %e, file_name = %source.file_name, "Cover generation failed");
            return DerivedAssets::default();
        }
    };

    let thumbnail = match generator.generate(source, &RenditionOptions::THUMBNAIL).await {
        Ok(thumbnail) => Some(thumbnail.renamed(thumbnail_file_name(artifact_name))),
        Err(e) => {
            tracing::warn!(error = %e, file_name = %source.file_name, "Thumbnail generation failed");
            None
        }
    };

    DerivedAssets {
        cover: Some(cover),
        thumbnail,
    }
}
