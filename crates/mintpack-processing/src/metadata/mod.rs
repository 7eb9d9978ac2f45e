//! Token metadata synthesis and schema validation

mod document;
mod schema;
mod synthesizer;

pub use document::{Attribute, Format, Measure, MetadataDocument, Rate};
pub use schema::{metadata_schema, verify_metadata};
pub use synthesizer::{
    format_duration, tags_to_array, MetadataContext, MetadataSynthesizer, UploadedArtifact,
    UploadedRendition,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata format invalid: {}", validation_errors.join("; "))]
    InvalidMetadata { validation_errors: Vec<String> },

    #[error("Metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metadata schema could not be compiled: {0}")]
    Schema(String),
}
