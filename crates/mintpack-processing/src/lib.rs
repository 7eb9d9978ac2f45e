//! Mintpack Processing Library
//!
//! Everything that happens to an artifact between the caller and the storage
//! backend: archive unpacking, HTML hardening, cover and thumbnail
//! renditions, media probing and metadata synthesis.

pub mod archive;
pub mod bundle;
pub mod html;
pub mod image;
pub mod metadata;
pub mod probe;

pub use archive::{unpack_archive, ArchiveError};
pub use bundle::{prepare_bundle, PackagingError};
pub use html::{inject_csp, RewriteError};
pub use crate::image::{
    derive_cover_and_thumbnail, DerivationError, DerivedAssetGenerator, DerivedAssets,
    ImageRenditionGenerator, RenditionOptions,
};
pub use metadata::{
    verify_metadata, MetadataContext, MetadataDocument, MetadataError, MetadataSynthesizer,
    UploadedArtifact, UploadedRendition,
};
pub use probe::{MediaInfoProbe, MediaProbe, ProbeError, ProbeReport};
