//! Storage abstraction trait
//!
//! This module defines the IpfsBackend trait that all pinning services must implement.

use async_trait::async_trait;
use mintpack_core::{Asset, BackendKind, ConfigError, DirectoryBundle};
use thiserror::Error;

use crate::normalize::CidVersion;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid IPFS backend: {0}")]
    InvalidBackend(String),

    #[error("Upload to {backend} failed: {cause}")]
    UploadFailed { backend: BackendKind, cause: String },

    #[error("Authentication with {backend} failed: {cause}")]
    AuthenticationFailed { backend: BackendKind, cause: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    pub fn upload_failed(backend: BackendKind, cause: impl ToString) -> Self {
        StorageError::UploadFailed {
            backend,
            cause: cause.to_string(),
        }
    }
}

impl From<ConfigError> for StorageError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidBackend(value) => StorageError::InvalidBackend(value),
            other => StorageError::ConfigError(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Pinning service abstraction
///
/// Implementations return identifiers exactly as the service reports them;
/// [`crate::ContentStore`] takes care of normalization based on
/// [`IpfsBackend::emitted_cid_version`].
#[async_trait]
pub trait IpfsBackend: Send + Sync {
    /// Upload and pin a single file, returning its content identifier.
    async fn add_file(&self, asset: &Asset) -> StorageResult<String>;

    /// Upload and pin every uploadable entry of `bundle` under one directory,
    /// returning the identifier of the directory itself.
    async fn add_directory(&self, bundle: &DirectoryBundle) -> StorageResult<String>;

    /// Check the configured credentials against the service.
    ///
    /// Services without an authentication probe succeed without a request.
    async fn verify_credentials(&self) -> StorageResult<()> {
        Ok(())
    }

    /// CID version of the identifiers this service returns.
    fn emitted_cid_version(&self) -> CidVersion {
        CidVersion::V0
    }

    /// Get the backend type
    fn backend_type(&self) -> BackendKind;
}
