//! Infura IPFS HTTP API backend.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use mintpack_core::{Asset, BackendKind, DirectoryBundle, InfuraSettings};
use reqwest::multipart::Form;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

use crate::traits::{IpfsBackend, StorageError, StorageResult};
use crate::transport::{encode_uri_component, ensure_success, file_part, new_form};

const BACKEND: BackendKind = BackendKind::Infura;

/// One line of the newline-delimited JSON returned by `/api/v0/add`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddEntry {
    name: String,
    hash: String,
}

/// Infura pinning backend
///
/// Authenticates with HTTP Basic auth built from the project id and secret.
/// Every request shares the client timeout configured in minutes.
pub struct InfuraBackend {
    client: Client,
    base_url: String,
    authorization: String,
}

impl InfuraBackend {
    pub fn new(settings: &InfuraSettings) -> StorageResult<Self> {
        let project_id = settings.project_id.as_deref().ok_or_else(|| {
            StorageError::ConfigError("INFURA_PROJECT_ID not configured".to_string())
        })?;
        let project_secret = settings.project_secret.as_deref().ok_or_else(|| {
            StorageError::ConfigError("INFURA_PROJECT_SECRET not configured".to_string())
        })?;

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to create HTTP client for Infura: {}", e))
            })?;

        let credentials = STANDARD.encode(format!("{}:{}", project_id, project_secret));

        tracing::info!(
            url = %settings.url,
            timeout_minutes = settings.timeout_minutes,
            "Infura backend initialized"
        );

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            authorization: format!("Basic {}", credentials),
        })
    }

    async fn post_add(&self, query: &str, form: Form) -> StorageResult<Vec<AddEntry>> {
        let url = format!("{}/api/v0/add{}", self.base_url, query);
        let response = self
            .client
            .post(&url)
            .header("authorization", &self.authorization)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        let response = ensure_success(BACKEND, response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        parse_add_response(&body)
    }

    async fn upload_and_pin(&self, asset: &Asset) -> StorageResult<String> {
        let form = new_form().part("file", file_part(BACKEND, asset, asset.file_name.clone())?);
        let entries = self.post_add("", form).await?;
        let hash = entries
            .into_iter()
            .last()
            .map(|entry| entry.hash)
            .ok_or_else(|| StorageError::upload_failed(BACKEND, "Empty add response"))?;
        self.pin(&hash).await?;
        Ok(hash)
    }

    /// Upload every entry wrapped in one directory; the wrapping directory is
    /// the entry with an empty name.
    async fn upload_wrapped_directory(&self, bundle: &DirectoryBundle) -> StorageResult<String> {
        let mut form = new_form();
        for entry in bundle.uploadable() {
            let part = file_part(BACKEND, &entry.asset, encode_uri_component(&entry.path))?;
            form = form.part("file", part);
        }

        let entries = self
            .post_add("?pin=true&wrap-with-directory=true", form)
            .await?;
        entries
            .into_iter()
            .find(|entry| entry.name.is_empty())
            .map(|entry| entry.hash)
            .ok_or_else(|| {
                StorageError::upload_failed(BACKEND, "Response has no root directory entry")
            })
    }

    async fn pin(&self, hash: &str) -> StorageResult<()> {
        let url = format!("{}/api/v0/pin/add", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("arg", hash)])
            .header("authorization", &self.authorization)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        ensure_success(BACKEND, response).await?;
        Ok(())
    }
}

/// Parse the newline-delimited JSON body of an add call.
fn parse_add_response(body: &str) -> StorageResult<Vec<AddEntry>> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str::<AddEntry>(line).map_err(|e| {
                StorageError::upload_failed(BACKEND, format!("Malformed add response: {}", e))
            })
        })
        .collect()
}

#[async_trait]
impl IpfsBackend for InfuraBackend {
    async fn add_file(&self, asset: &Asset) -> StorageResult<String> {
        let start = Instant::now();
        let result = self.upload_and_pin(asset).await;

        match &result {
            Ok(hash) => tracing::info!(
                file_name = %asset.file_name,
                cid = %hash,
                size_bytes = asset.size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Infura upload successful"
            ),
            Err(e) => tracing::error!(
                error = %e,
                file_name = %asset.file_name,
                size_bytes = asset.size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Infura upload failed"
            ),
        }
        result
    }

    async fn add_directory(&self, bundle: &DirectoryBundle) -> StorageResult<String> {
        let start = Instant::now();
        let result = self.upload_wrapped_directory(bundle).await;

        match &result {
            Ok(hash) => tracing::info!(
                archive = %bundle.archive_name,
                cid = %hash,
                entries = bundle.uploadable().count(),
                size_bytes = bundle.total_size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Infura directory upload successful"
            ),
            Err(e) => tracing::error!(
                error = %e,
                archive = %bundle.archive_name,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Infura directory upload failed"
            ),
        }
        result
    }

    fn backend_type(&self) -> BackendKind {
        BACKEND
    }
}
