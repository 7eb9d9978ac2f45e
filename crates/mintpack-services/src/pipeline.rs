//! Upload orchestration for a single mint attempt.

use mintpack_core::constants::IPFS_DIRECTORY_MIMETYPE;
use mintpack_core::mime::{is_image, is_zip, APPLICATION_JSON};
use mintpack_core::naming::metadata_file_name;
use mintpack_core::{
    Asset, AssetRole, BackendConfig, ContentIdentifier, MintStage, NoOpProgressReporter,
    ProgressReporter, UploadResult,
};
use mintpack_processing::image::read_dimensions;
use mintpack_processing::{
    derive_cover_and_thumbnail, prepare_bundle, DerivedAssetGenerator, ImageRenditionGenerator,
    MediaInfoProbe, MediaProbe, MetadataContext, MetadataDocument, MetadataError,
    MetadataSynthesizer, UploadedArtifact, UploadedRendition,
};
use mintpack_storage::{create_content_store, ContentStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error::MintError;
use crate::request::MintRequest;

/// Result of a completed mint attempt.
#[derive(Debug, Clone, Serialize)]
pub struct MintOutcome {
    /// Identifier to hand to the minting contract.
    pub metadata_cid: ContentIdentifier,
    /// Every upload, in the order it happened.
    pub uploads: Vec<UploadResult>,
    pub metadata: MetadataDocument,
}

impl MintOutcome {
    pub fn metadata_uri(&self) -> String {
        self.metadata_cid.to_uri()
    }

    pub fn upload(&self, role: AssetRole) -> Option<&UploadResult> {
        self.uploads.iter().find(|upload| upload.role == role)
    }
}

/// Runs mint attempts against one content store.
///
/// Stages are strictly sequential and nothing is retried: the first failing
/// step ends the attempt, and uploads that already succeeded are not reused.
pub struct MintPipeline {
    store: ContentStore,
    generator: Arc<dyn DerivedAssetGenerator>,
    probe: Arc<dyn MediaProbe>,
    progress: Arc<dyn ProgressReporter>,
}

impl MintPipeline {
    pub fn new(
        store: ContentStore,
        generator: Arc<dyn DerivedAssetGenerator>,
        probe: Arc<dyn MediaProbe>,
    ) -> Self {
        Self {
            store,
            generator,
            probe,
            progress: Arc::new(NoOpProgressReporter),
        }
    }

    /// Pipeline with the configured backend, `image` renditions and mediainfo.
    pub fn from_config(config: &BackendConfig) -> Result<Self, MintError> {
        let store = create_content_store(config)?;
        Ok(Self::new(
            store,
            Arc::new(ImageRenditionGenerator::new()),
            Arc::new(MediaInfoProbe::new(config.mediainfo_path.clone())),
        ))
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Upload the artifact and its renditions, then synthesize and upload the
    /// metadata document. Returns the metadata identifier.
    #[tracing::instrument(
        skip(self, request),
        fields(
            file_name = %request.artifact.file_name,
            mime_type = %request.artifact.mime_type,
            backend = %self.store.backend_type()
        )
    )]
    pub async fn prepare(&self, request: MintRequest) -> Result<MintOutcome, MintError> {
        let start = Instant::now();
        self.progress.stage_changed(&MintStage::Idle).await;

        match self.run(&request).await {
            Ok(outcome) => {
                self.progress.stage_changed(&MintStage::Done).await;
                tracing::info!(
                    metadata_cid = %outcome.metadata_cid,
                    uploads = outcome.uploads.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Mint preparation successful"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "Mint preparation failed");
                self.progress
                    .stage_changed(&MintStage::Failed(e.to_string()))
                    .await;
                Err(e)
            }
        }
    }

    async fn run(&self, request: &MintRequest) -> Result<MintOutcome, MintError> {
        request.validate()?;

        let artifact = &request.artifact;
        let mut uploads = Vec::new();

        self.progress.stage_changed(&MintStage::UploadingArtifact).await;
        let uploaded_artifact = self.upload_artifact(artifact).await?;
        self.record(AssetRole::Artifact, &uploaded_artifact.cid, &mut uploads)
            .await;

        let source = request.cover.as_ref().unwrap_or(artifact);
        let derived =
            derive_cover_and_thumbnail(self.generator.as_ref(), source, &artifact.file_name).await;

        let cover = match derived.cover {
            Some(asset) => {
                self.progress.stage_changed(&MintStage::UploadingCover).await;
                let cid = self
                    .store
                    .upload_file(&asset)
                    .await
                    .map_err(MintError::CoverUploadFailed)?;
                self.record(AssetRole::Cover, &cid, &mut uploads).await;
                Some(UploadedRendition { cid, asset })
            }
            None => None,
        };

        let thumbnail = match derived.thumbnail {
            Some(asset) => {
                self.progress
                    .stage_changed(&MintStage::UploadingThumbnail)
                    .await;
                let cid = self
                    .store
                    .upload_file(&asset)
                    .await
                    .map_err(MintError::ThumbnailUploadFailed)?;
                self.record(AssetRole::Thumbnail, &cid, &mut uploads).await;
                Some(UploadedRendition { cid, asset })
            }
            None => None,
        };

        self.progress
            .stage_changed(&MintStage::SynthesizingMetadata)
            .await;
        let probe = self.probe.probe(artifact).await?;
        let context = MetadataContext {
            title: request.title.clone(),
            description: request.description.clone(),
            rights: request.rights.clone(),
            tags: request.tags.clone(),
            creator: request.creator.clone(),
            artifact: uploaded_artifact,
            cover,
            thumbnail,
            probe,
        };
        let metadata = MetadataSynthesizer::new(self.probe.parser_name()).synthesize(&context)?;

        self.progress
            .stage_changed(&MintStage::UploadingMetadata)
            .await;
        let body = serde_json::to_vec(&metadata).map_err(MetadataError::from)?;
        let metadata_asset = Asset::new(
            body,
            APPLICATION_JSON,
            metadata_file_name(&artifact.file_name),
        );
        let metadata_cid = self
            .store
            .upload_file(&metadata_asset)
            .await
            .map_err(MintError::MetadataUploadFailed)?;
        self.record(AssetRole::Metadata, &metadata_cid, &mut uploads)
            .await;

        Ok(MintOutcome {
            metadata_cid,
            uploads,
            metadata,
        })
    }

    /// ZIP archives go up as a hardened directory, everything else as one file.
    async fn upload_artifact(&self, artifact: &Asset) -> Result<UploadedArtifact, MintError> {
        if is_zip(&artifact.mime_type) {
            let bundle = prepare_bundle(&artifact.file_name, &artifact.data)?;
            let cid = self
                .store
                .upload_directory(&bundle)
                .await
                .map_err(MintError::ArtifactUploadFailed)?;
            return Ok(UploadedArtifact {
                cid,
                mime_type: IPFS_DIRECTORY_MIMETYPE.to_string(),
                file_name: artifact.file_name.clone(),
                file_size: artifact.size() as u64,
                dimensions: None,
            });
        }

        let cid = self
            .store
            .upload_file(artifact)
            .await
            .map_err(MintError::ArtifactUploadFailed)?;
        let dimensions = artifact.dimensions.or_else(|| {
            if is_image(&artifact.mime_type) {
                read_dimensions(&artifact.data)
            } else {
                None
            }
        });

        Ok(UploadedArtifact {
            cid,
            mime_type: artifact.mime_type.clone(),
            file_name: artifact.file_name.clone(),
            file_size: artifact.size() as u64,
            dimensions,
        })
    }

    async fn record(
        &self,
        role: AssetRole,
        cid: &ContentIdentifier,
        uploads: &mut Vec<UploadResult>,
    ) {
        let result = UploadResult::new(role, cid.clone());
        self.progress.uploaded(&result).await;
        uploads.push(result);
    }
}
