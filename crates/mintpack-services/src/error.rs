use mintpack_processing::{MetadataError, PackagingError, ProbeError};
use mintpack_storage::StorageError;
use thiserror::Error;

/// Why a mint attempt stopped. Every variant is terminal for the attempt.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("Invalid mint request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Packaging(#[from] PackagingError),

    #[error("Media probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("OBJKT file could not be added to IPFS: {0}")]
    ArtifactUploadFailed(#[source] StorageError),

    #[error("Cover file could not be added to IPFS: {0}")]
    CoverUploadFailed(#[source] StorageError),

    #[error("Thumbnail file could not be added to IPFS: {0}")]
    ThumbnailUploadFailed(#[source] StorageError),

    #[error("Metadata file could not be added to IPFS: {0}")]
    MetadataUploadFailed(#[source] StorageError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
