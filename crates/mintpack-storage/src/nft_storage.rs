//! NFT.Storage backend.

use async_trait::async_trait;
use mintpack_core::{Asset, BackendKind, DirectoryBundle, NftStorageSettings};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Instant;

use crate::normalize::CidVersion;
use crate::traits::{IpfsBackend, StorageError, StorageResult};
use crate::transport::{encode_uri_component, ensure_success, file_part, new_form};

const BACKEND: BackendKind = BackendKind::NftStorage;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    value: Option<ApiValue>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiValue {
    cid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl ApiResponse {
    fn into_cid(self) -> StorageResult<String> {
        match (self.ok, self.value) {
            (true, Some(value)) => Ok(value.cid),
            _ => Err(StorageError::upload_failed(
                BACKEND,
                self.error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "Request was not accepted".to_string()),
            )),
        }
    }
}

/// NFT.Storage pinning backend
///
/// Uses a bearer token. Identifiers come back as CIDv1.
pub struct NftStorageBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NftStorageBackend {
    pub fn new(settings: &NftStorageSettings) -> StorageResult<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| StorageError::ConfigError("NFT_STORAGE_KEY not configured".to_string()))?;

        tracing::info!(url = %settings.url, "NFT.Storage backend initialized");

        Ok(Self {
            client: Client::new(),
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn parse(response: Response) -> StorageResult<ApiResponse> {
        let response = ensure_success(BACKEND, response).await?;
        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, format!("Malformed response: {}", e)))
    }

    async fn store_blob(&self, asset: &Asset) -> StorageResult<String> {
        let content_type = if asset.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            asset.mime_type.as_str()
        };
        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", content_type)
            .body(asset.data.clone())
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        let cid = Self::parse(response).await?.into_cid()?;
        self.check_status(&cid).await?;
        Ok(cid)
    }

    /// Confirm the service knows about `cid` after an upload: `GET {base}/{cid}`.
    async fn check_status(&self, cid: &str) -> StorageResult<()> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, cid))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        let status = Self::parse(response).await?;
        if !status.ok {
            return Err(StorageError::upload_failed(
                BACKEND,
                format!("Status check for {} was rejected", cid),
            ));
        }
        Ok(())
    }

    async fn store_directory(&self, bundle: &DirectoryBundle) -> StorageResult<String> {
        let mut form = new_form();
        for entry in bundle.uploadable() {
            let part = file_part(BACKEND, &entry.asset, encode_uri_component(&entry.path))?;
            form = form.part("file", part);
        }

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        Self::parse(response).await?.into_cid()
    }
}

#[async_trait]
impl IpfsBackend for NftStorageBackend {
    async fn add_file(&self, asset: &Asset) -> StorageResult<String> {
        let start = Instant::now();
        let result = self.store_blob(asset).await;

        match &result {
            Ok(cid) => tracing::info!(
                file_name = %asset.file_name,
                cid = %cid,
                size_bytes = asset.size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "NFT.Storage upload successful"
            ),
            Err(e) => tracing::error!(
                error = %e,
                file_name = %asset.file_name,
                size_bytes = asset.size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "NFT.Storage upload failed"
            ),
        }
        result
    }

    async fn add_directory(&self, bundle: &DirectoryBundle) -> StorageResult<String> {
        let start = Instant::now();
        let result = self.store_directory(bundle).await;

        match &result {
            Ok(cid) => tracing::info!(
                archive = %bundle.archive_name,
                cid = %cid,
                entries = bundle.uploadable().count(),
                size_bytes = bundle.total_size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "NFT.Storage directory upload successful"
            ),
            Err(e) => tracing::error!(
                error = %e,
                archive = %bundle.archive_name,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "NFT.Storage directory upload failed"
            ),
        }
        result
    }

    fn emitted_cid_version(&self) -> CidVersion {
        CidVersion::V1
    }

    fn backend_type(&self) -> BackendKind {
        BACKEND
    }
}
