use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::ConfigError;

/// Pinning services a mint can upload through.
///
/// Defined in core because both configuration and the storage factory
/// dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BackendKind {
    #[serde(rename = "infura")]
    Infura,
    #[serde(rename = "nft.storage")]
    NftStorage,
    #[serde(rename = "pinata")]
    Pinata,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Infura,
        BackendKind::NftStorage,
        BackendKind::Pinata,
    ];
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "infura" => Ok(BackendKind::Infura),
            "nft.storage" => Ok(BackendKind::NftStorage),
            "pinata" => Ok(BackendKind::Pinata),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BackendKind::Infura => write!(f, "infura"),
            BackendKind::NftStorage => write!(f, "nft.storage"),
            BackendKind::Pinata => write!(f, "pinata"),
        }
    }
}
