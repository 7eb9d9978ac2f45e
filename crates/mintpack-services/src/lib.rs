//! Mintpack Services Layer
//!
//! Orchestration of a mint attempt: request validation, artifact upload,
//! cover and thumbnail derivation, metadata synthesis and the final metadata
//! upload. Re-exports the processing and storage API so front ends depend on
//! this crate alone.

pub mod error;
pub mod pipeline;
pub mod request;

pub use error::MintError;
pub use pipeline::{MintOutcome, MintPipeline};
pub use request::MintRequest;

pub use mintpack_core::{
    Asset, AssetRole, BackendConfig, BackendKind, ContentIdentifier, MintStage,
    NoOpProgressReporter, ProgressReporter, TracingProgressReporter, UploadResult,
};
pub use mintpack_processing::{
    prepare_bundle, DerivedAssetGenerator, ImageRenditionGenerator, MediaInfoProbe, MediaProbe,
    MetadataDocument, ProbeReport,
};
pub use mintpack_storage::{create_content_store, ContentStore, StorageError, StorageResult};
