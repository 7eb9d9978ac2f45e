use crate::{
    ContentStore, InfuraBackend, IpfsBackend, NftStorageBackend, PinataBackend, StorageResult,
};
use mintpack_core::{BackendConfig, BackendKind};
use std::sync::Arc;

/// Create the pinning backend selected by configuration
pub fn create_backend(config: &BackendConfig) -> StorageResult<Arc<dyn IpfsBackend>> {
    config.validate()?;

    match config.backend {
        BackendKind::Infura => Ok(Arc::new(InfuraBackend::new(&config.infura)?)),
        BackendKind::NftStorage => Ok(Arc::new(NftStorageBackend::new(&config.nft_storage)?)),
        BackendKind::Pinata => Ok(Arc::new(PinataBackend::new(&config.pinata)?)),
    }
}

/// Create a [`ContentStore`] over the backend selected by configuration
pub fn create_content_store(config: &BackendConfig) -> StorageResult<ContentStore> {
    let backend = create_backend(config)?;
    tracing::info!(backend = %config.backend, "Content store created");
    Ok(ContentStore::new(backend))
}

/// Parse a backend name and build a store for it, keeping the rest of `config`.
///
/// Unknown names fail with `InvalidBackend`.
pub fn create_content_store_for(
    name: &str,
    config: &BackendConfig,
) -> StorageResult<ContentStore> {
    let backend: BackendKind = name.parse()?;
    let config = BackendConfig {
        backend,
        ..config.clone()
    };
    create_content_store(&config)
}
