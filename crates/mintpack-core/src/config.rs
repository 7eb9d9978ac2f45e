//! Configuration module
//!
//! Backend selection and credentials are read once from the environment (a
//! `.env` file is honoured) and then passed explicitly to the storage
//! factory. Nothing reads the environment after startup.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::storage_types::BackendKind;

pub const DEFAULT_INFURA_URL: &str = "https://ipfs.infura.io:5001";
pub const DEFAULT_NFT_STORAGE_URL: &str = "https://api.nft.storage";
pub const DEFAULT_PINATA_URL: &str = "https://api.pinata.cloud";

pub const MIN_INFURA_TIMEOUT_MINUTES: u64 = 1;
pub const MAX_INFURA_TIMEOUT_MINUTES: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfuraSettings {
    pub url: String,
    pub project_id: Option<String>,
    pub project_secret: Option<String>,
    /// Client timeout for every Infura request, in minutes.
    pub timeout_minutes: u64,
}

impl InfuraSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_minutes.saturating_mul(60))
    }
}

impl Default for InfuraSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_INFURA_URL.to_string(),
            project_id: None,
            project_secret: None,
            timeout_minutes: MIN_INFURA_TIMEOUT_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftStorageSettings {
    pub url: String,
    pub api_key: Option<String>,
}

impl Default for NftStorageSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_NFT_STORAGE_URL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinataSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl Default for PinataSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_PINATA_URL.to_string(),
            api_key: None,
            api_secret: None,
        }
    }
}

/// Storage backend selection plus the credentials of every backend.
///
/// Only the selected backend's credentials are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub backend: BackendKind,
    pub infura: InfuraSettings,
    pub nft_storage: NftStorageSettings,
    pub pinata: PinataSettings,
    /// Path of the `mediainfo` binary used to probe artifacts.
    pub mediainfo_path: String,
}

impl BackendConfig {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            infura: InfuraSettings::default(),
            nft_storage: NftStorageSettings::default(),
            pinata: PinataSettings::default(),
            mediainfo_path: "mediainfo".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let backend: BackendKind = env::var("IPFS_API")
            .unwrap_or_else(|_| "infura".to_string())
            .parse()?;

        let timeout_minutes = match env::var("INFURA_TIMEOUT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("INFURA_TIMEOUT", raw.clone()))?,
            Err(_) => MIN_INFURA_TIMEOUT_MINUTES,
        };

        let config = BackendConfig {
            backend,
            infura: InfuraSettings {
                url: env::var("INFURA_URL").unwrap_or_else(|_| DEFAULT_INFURA_URL.to_string()),
                project_id: non_empty_var("INFURA_PROJECT_ID"),
                project_secret: non_empty_var("INFURA_PROJECT_SECRET"),
                timeout_minutes,
            },
            nft_storage: NftStorageSettings {
                url: env::var("NFT_STORAGE_URL")
                    .unwrap_or_else(|_| DEFAULT_NFT_STORAGE_URL.to_string()),
                api_key: non_empty_var("NFT_STORAGE_KEY"),
            },
            pinata: PinataSettings {
                url: env::var("PINATA_URL").unwrap_or_else(|_| DEFAULT_PINATA_URL.to_string()),
                api_key: non_empty_var("PINATA_API_KEY"),
                api_secret: non_empty_var("PINATA_API_SECRET"),
            },
            mediainfo_path: env::var("MEDIAINFO_PATH").unwrap_or_else(|_| "mediainfo".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the selected backend has everything it needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let backend = self.backend.to_string();
        match self.backend {
            BackendKind::Infura => {
                if self.infura.project_id.is_none() {
                    return Err(ConfigError::MissingSetting("INFURA_PROJECT_ID", backend));
                }
                if self.infura.project_secret.is_none() {
                    return Err(ConfigError::MissingSetting(
                        "INFURA_PROJECT_SECRET",
                        backend,
                    ));
                }
                if !(MIN_INFURA_TIMEOUT_MINUTES..=MAX_INFURA_TIMEOUT_MINUTES)
                    .contains(&self.infura.timeout_minutes)
                {
                    return Err(ConfigError::InvalidValue(
                        "INFURA_TIMEOUT",
                        format!(
                            "{} (expected {}..={} minutes)",
                            self.infura.timeout_minutes,
                            MIN_INFURA_TIMEOUT_MINUTES,
                            MAX_INFURA_TIMEOUT_MINUTES
                        ),
                    ));
                }
            }
            BackendKind::NftStorage => {
                if self.nft_storage.api_key.is_none() {
                    return Err(ConfigError::MissingSetting("NFT_STORAGE_KEY", backend));
                }
            }
            BackendKind::Pinata => {
                if self.pinata.api_key.is_none() {
                    return Err(ConfigError::MissingSetting("PINATA_API_KEY", backend));
                }
                if self.pinata.api_secret.is_none() {
                    return Err(ConfigError::MissingSetting("PINATA_API_SECRET", backend));
                }
            }
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
