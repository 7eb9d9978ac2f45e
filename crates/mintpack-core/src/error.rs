//! Configuration errors.

/// Raised while loading or validating [`crate::BackendConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid IPFS backend: {0}")]
    InvalidBackend(String),

    #[error("{0} must be set for the {1} backend")]
    MissingSetting(&'static str, String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
