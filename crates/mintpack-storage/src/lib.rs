//! Mintpack Storage Library
//!
//! Content-addressed storage for mint artifacts. Every pinning service
//! implements [`IpfsBackend`]; callers go through [`ContentStore`], which
//! converts identifiers to the canonical CIDv0 form when a backend emits
//! CIDv1.
//!
//! # Directory uploads
//!
//! Bundle entries are sent as multipart `file` parts whose file name is the
//! entry path encoded the way `encodeURIComponent` does it. Directory
//! placeholders are never transmitted.

pub mod factory;
pub mod infura;
pub mod nft_storage;
pub mod normalize;
pub mod pinata;
pub mod store;
pub mod traits;
pub(crate) mod transport;

// Re-export commonly used types
pub use factory::{create_backend, create_content_store, create_content_store_for};
pub use infura::InfuraBackend;
pub use mintpack_core::BackendKind;
pub use nft_storage::NftStorageBackend;
pub use normalize::{to_canonical_cid, CidVersion};
pub use pinata::PinataBackend;
pub use store::ContentStore;
pub use traits::{IpfsBackend, StorageError, StorageResult};
