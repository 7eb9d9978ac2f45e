use mintpack_core::{Asset, BackendKind, ContentIdentifier, DirectoryBundle};
use std::sync::Arc;

use crate::normalize::{to_canonical_cid, CidVersion};
use crate::traits::{IpfsBackend, StorageError, StorageResult};

/// Uploads through one configured backend and returns canonical identifiers.
///
/// Identifiers from backends that declare [`CidVersion::V1`] are converted to
/// CIDv0 before they are handed back; a conversion failure is reported as
/// `UploadFailed`.
#[derive(Clone)]
pub struct ContentStore {
    backend: Arc<dyn IpfsBackend>,
}

impl ContentStore {
    pub fn new(backend: Arc<dyn IpfsBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_type(&self) -> BackendKind {
        self.backend.backend_type()
    }

    pub async fn upload_file(&self, asset: &Asset) -> StorageResult<ContentIdentifier> {
        let id = self.backend.add_file(asset).await?;
        self.canonical(id)
    }

    pub async fn upload_directory(
        &self,
        bundle: &DirectoryBundle,
    ) -> StorageResult<ContentIdentifier> {
        let id = self.backend.add_directory(bundle).await?;
        self.canonical(id)
    }

    pub async fn verify_credentials(&self) -> StorageResult<()> {
        self.backend.verify_credentials().await
    }

    fn canonical(&self, id: String) -> StorageResult<ContentIdentifier> {
        let backend = self.backend.backend_type();
        if id.trim().is_empty() {
            return Err(StorageError::upload_failed(
                backend,
                "Backend returned an empty identifier",
            ));
        }

        match self.backend.emitted_cid_version() {
            CidVersion::V0 => Ok(ContentIdentifier::new(id)),
            CidVersion::V1 => {
                let v0 = to_canonical_cid(&id).map_err(|e| {
                    StorageError::upload_failed(
                        backend,
                        format!("Could not convert {} to CIDv0: {}", id, e),
                    )
                })?;
                tracing::debug!(cid_v1 = %id, cid_v0 = %v0, "Normalized content identifier");
                Ok(ContentIdentifier::new(v0))
            }
        }
    }
}
