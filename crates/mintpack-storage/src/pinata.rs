//! Pinata backend.

use async_trait::async_trait;
use mintpack_core::naming::file_stem;
use mintpack_core::{Asset, BackendKind, DirectoryBundle, PinataSettings};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Instant;

use crate::traits::{IpfsBackend, StorageError, StorageResult};
use crate::transport::{encode_uri_component, ensure_success, file_part, new_form};

const BACKEND: BackendKind = BackendKind::Pinata;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinResponse {
    ipfs_hash: String,
}

/// Pinata pinning backend
///
/// Authenticates with the `pinata_api_key` / `pinata_secret_api_key` header
/// pair.
pub struct PinataBackend {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl PinataBackend {
    pub fn new(settings: &PinataSettings) -> StorageResult<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| StorageError::ConfigError("PINATA_API_KEY not configured".to_string()))?;
        let api_secret = settings.api_secret.clone().ok_or_else(|| {
            StorageError::ConfigError("PINATA_API_SECRET not configured".to_string())
        })?;

        tracing::info!(url = %settings.url, "Pinata backend initialized");

        Ok(Self {
            client: Client::new(),
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key,
            api_secret,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.api_secret)
    }

    async fn pin_form(&self, form: Form) -> StorageResult<String> {
        let request = self
            .client
            .post(format!("{}/pinning/pinFileToIPFS", self.base_url))
            .multipart(form);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, e))?;
        let response = ensure_success(BACKEND, response).await?;
        let pinned = response
            .json::<PinResponse>()
            .await
            .map_err(|e| StorageError::upload_failed(BACKEND, format!("Malformed response: {}", e)))?;
        Ok(pinned.ipfs_hash)
    }

    /// Multipart form for a directory pin. Every part name is prefixed with
    /// the archive name minus its extension, which becomes the pinned folder.
    fn directory_form(bundle: &DirectoryBundle) -> StorageResult<Form> {
        let folder = file_stem(&bundle.archive_name);
        let mut form = new_form();
        for entry in bundle.uploadable() {
            let name = format!("{}/{}", folder, encode_uri_component(&entry.path));
            form = form.part("file", file_part(BACKEND, &entry.asset, name)?);
        }
        let metadata = serde_json::json!({ "name": bundle.archive_name }).to_string();
        Ok(form.text("pinataMetadata", metadata))
    }
}

#[async_trait]
impl IpfsBackend for PinataBackend {
    async fn add_file(&self, asset: &Asset) -> StorageResult<String> {
        let start = Instant::now();
        let result = match file_part(BACKEND, asset, asset.file_name.clone()) {
            Ok(part) => self.pin_form(new_form().part("file", part)).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(hash) => tracing::info!(
                file_name = %asset.file_name,
                cid = %hash,
                size_bytes = asset.size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Pinata upload successful"
            ),
            Err(e) => tracing::error!(
                error = %e,
                file_name = %asset.file_name,
                size_bytes = asset.size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Pinata upload failed"
            ),
        }
        result
    }

    async fn add_directory(&self, bundle: &DirectoryBundle) -> StorageResult<String> {
        let start = Instant::now();
        let result = match Self::directory_form(bundle) {
            Ok(form) => self.pin_form(form).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(hash) => tracing::info!(
                archive = %bundle.archive_name,
                cid = %hash,
                entries = bundle.uploadable().count(),
                size_bytes = bundle.total_size(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Pinata directory upload successful"
            ),
            Err(e) => tracing::error!(
                error = %e,
                archive = %bundle.archive_name,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Pinata directory upload failed"
            ),
        }
        result
    }

    async fn verify_credentials(&self) -> StorageResult<()> {
        let request = self
            .client
            .get(format!("{}/data/testAuthentication", self.base_url));
        let response = self.authorized(request).send().await.map_err(|e| {
            StorageError::AuthenticationFailed {
                backend: BACKEND,
                cause: e.to_string(),
            }
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Pinata credentials verified");
            return Ok(());
        }
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(StorageError::AuthenticationFailed {
            backend: BACKEND,
            cause: format!("{} - {}", status, error_text),
        })
    }

    fn backend_type(&self) -> BackendKind {
        BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintpack_core::constants::IPFS_DIRECTORY_MIMETYPE;
    use mockito::Matcher;

    const HASH: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

    fn backend(url: String) -> PinataBackend {
        PinataBackend::new(&PinataSettings {
            url,
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_file_sends_key_headers() {
        let mut server = mockito::Server::new_async().await;
        let pin = server
            .mock("POST", "/pinning/pinFileToIPFS")
            .match_header("pinata_api_key", "key")
            .match_header("pinata_secret_api_key", "secret")
            .match_body(Matcher::Regex("filename=\"art.png\"".to_string()))
            .with_status(200)
            .with_body(format!(
                "{{\"IpfsHash\":\"{}\",\"PinSize\":4,\"Timestamp\":\"2021-10-01T00:00:00Z\"}}",
                HASH
            ))
            .create_async()
            .await;

        let asset = Asset::new(&b"data"[..], "image/png", "art.png");
        let hash = backend(server.url()).add_file(&asset).await.unwrap();

        assert_eq!(hash, HASH);
        pin.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_directory_prefixes_folder_and_sends_metadata() {
        let mut server = mockito::Server::new_async().await;
        let pin = server
            .mock("POST", "/pinning/pinFileToIPFS")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("filename=\"site/index.html\"".to_string()),
                Matcher::Regex("filename=\"site/img%2Fa.png\"".to_string()),
                Matcher::Regex("name=\"pinataMetadata\"".to_string()),
                Matcher::Regex("\\{\"name\":\"site.zip\"\\}".to_string()),
            ]))
            .with_status(200)
            .with_body(format!("{{\"IpfsHash\":\"{}\"}}", HASH))
            .create_async()
            .await;

        let mut bundle = DirectoryBundle::new("site.zip", "site");
        bundle.insert("", Asset::new(&b""[..], IPFS_DIRECTORY_MIMETYPE, ""));
        bundle.insert("index.html", Asset::new(&b"<html>"[..], "text/html", "index.html"));
        bundle.insert("img/a.png", Asset::new(&b"png"[..], "image/png", "a.png"));

        let hash = backend(server.url()).add_directory(&bundle).await.unwrap();

        assert_eq!(hash, HASH);
        pin.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_hash_is_upload_failed() {
        let mut server = mockito::Server::new_async().await;
        let _pin = server
            .mock("POST", "/pinning/pinFileToIPFS")
            .with_status(200)
            .with_body("{\"error\":\"Invalid request format.\"}")
            .create_async()
            .await;

        let asset = Asset::new(&b"data"[..], "image/png", "art.png");
        assert!(matches!(
            backend(server.url()).add_file(&asset).await,
            Err(StorageError::UploadFailed { backend: BackendKind::Pinata, .. })
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/data/testAuthentication")
            .match_header("pinata_api_key", "key")
            .with_status(200)
            .with_body("{\"message\":\"Congratulations! You are communicating with the Pinata API!\"}")
            .create_async()
            .await;

        assert!(backend(server.url()).verify_credentials().await.is_ok());
        ok.assert_async().await;
    }

    #[tokio::test]
    async fn test_verify_credentials_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _denied = server
            .mock("GET", "/data/testAuthentication")
            .with_status(401)
            .with_body("{\"error\":{\"reason\":\"INVALID_API_KEYS\"}}")
            .create_async()
            .await;

        let err = backend(server.url()).verify_credentials().await.unwrap_err();
        assert!(matches!(err, StorageError::AuthenticationFailed { .. }));
        assert!(err.to_string().contains("401"));
    }
}
