//! Mintpack Core Library
//!
//! Domain models, constants, configuration and hooks shared by every mintpack
//! crate. Nothing here performs I/O apart from reading the environment in
//! [`BackendConfig::from_env`].

pub mod config;
pub mod constants;
pub mod error;
pub mod hooks;
pub mod mime;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BackendConfig, InfuraSettings, NftStorageSettings, PinataSettings};
pub use error::ConfigError;
pub use hooks::{NoOpProgressReporter, ProgressReporter, TracingProgressReporter};
pub use models::{
    Asset, AssetRole, BundleEntry, ContentIdentifier, Dimensions, DirectoryBundle, MintStage,
    UploadResult,
};
pub use storage_types::BackendKind;
