#![allow(dead_code)]

use async_trait::async_trait;
use mintpack_core::{Dimensions, NftStorageSettings, PinataSettings};
use mintpack_processing::{DerivationError, ProbeError, RenditionOptions};
use mintpack_services::{
    Asset, BackendConfig, BackendKind, ContentStore, DerivedAssetGenerator, MediaProbe,
    MintPipeline, MintRequest, MintStage, ProbeReport, ProgressReporter, UploadResult,
};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

pub const CREATOR: &str = "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb";
pub const ARTIFACT_HASH: &str = "QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgna";
pub const COVER_HASH: &str = "QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgnb";
pub const THUMBNAIL_HASH: &str = "QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgnd";
pub const METADATA_HASH: &str = "QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgne";

/// Identifier NFT.Storage reports, and its CIDv0 form.
pub const CID_V1: &str = "bafybeie5nqv6kd3qnfjupgvz34woh3oksc3iau6abmyajn7qvtf6d2ho34";
pub const CID_V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

pub fn nft_storage_store(url: String) -> ContentStore {
    let mut config = BackendConfig::new(BackendKind::NftStorage);
    config.nft_storage = NftStorageSettings {
        url,
        api_key: Some("token".to_string()),
    };
    mintpack_services::create_content_store(&config).unwrap()
}

pub fn stored_body(cid: &str) -> String {
    format!("{{\"ok\":true,\"value\":{{\"cid\":\"{}\"}}}}", cid)
}

pub fn pinata_config(url: String) -> BackendConfig {
    let mut config = BackendConfig::new(BackendKind::Pinata);
    config.pinata = PinataSettings {
        url,
        api_key: Some("key".to_string()),
        api_secret: Some("secret".to_string()),
    };
    config
}

pub fn pinata_store(url: String) -> ContentStore {
    mintpack_services::create_content_store(&pinata_config(url)).unwrap()
}

/// Pipeline over a Pinata mock with stub renditions and probe.
pub fn pipeline(url: String, reporter: Arc<RecordingReporter>) -> MintPipeline {
    MintPipeline::new(
        pinata_store(url),
        Arc::new(StubGenerator),
        Arc::new(StubProbe::default()),
    )
    .with_progress(reporter)
}

pub fn image_request() -> MintRequest {
    let mut request = MintRequest::new(
        Asset::new(&b"png-bytes"[..], "image/png", "art.png").with_dimensions(Dimensions {
            width: 1080,
            height: 731,
        }),
        CREATOR,
    );
    request.title = "Burn".to_string();
    request.description = "A fire".to_string();
    request.tags = "fire, red".to_string();
    request
}

pub fn pin_body(hash: &str) -> String {
    format!("{{\"IpfsHash\":\"{}\"}}", hash)
}

/// Build an in-memory ZIP archive.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    use zip::write::{FileOptions, ZipWriter};

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// Returns a fixed-size JPEG placeholder sized to the rendition box.
pub struct StubGenerator;

#[async_trait]
impl DerivedAssetGenerator for StubGenerator {
    async fn generate(
        &self,
        source: &Asset,
        options: &RenditionOptions,
    ) -> Result<Asset, DerivationError> {
        let width = options.max_width.min(1024);
        Ok(Asset::new(
            format!("jpeg-{}", width).into_bytes(),
            "image/jpeg",
            source.file_name.clone(),
        )
        .with_dimensions(Dimensions {
            width,
            height: width / 2,
        }))
    }
}

#[derive(Default)]
pub struct StubProbe {
    pub fail: bool,
}

#[async_trait]
impl MediaProbe for StubProbe {
    async fn probe(&self, _asset: &Asset) -> Result<ProbeReport, ProbeError> {
        if self.fail {
            return Err(ProbeError::Failed {
                tool: "mediainfo".to_string(),
                stderr: "unreadable".to_string(),
            });
        }
        let track = serde_json::json!({"@type": "General", "Format": "PNG"});
        match track {
            serde_json::Value::Object(fields) => Ok(ProbeReport {
                tracks: vec![fields],
            }),
            _ => Ok(ProbeReport::default()),
        }
    }
}

/// Keeps every reported stage and upload.
#[derive(Default)]
pub struct RecordingReporter {
    pub stages: Mutex<Vec<MintStage>>,
    pub uploads: Mutex<Vec<UploadResult>>,
}

impl RecordingReporter {
    pub fn stages(&self) -> Vec<MintStage> {
        self.stages.lock().unwrap().clone()
    }

    pub fn last_stage(&self) -> Option<MintStage> {
        self.stages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ProgressReporter for RecordingReporter {
    async fn stage_changed(&self, stage: &MintStage) {
        self.stages.lock().unwrap().push(stage.clone());
    }

    async fn uploaded(&self, result: &UploadResult) {
        self.uploads.lock().unwrap().push(result.clone());
    }
}
