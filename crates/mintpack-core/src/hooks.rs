//! Hooks for observing a mint attempt
//!
//! The pipeline reports each stage transition through [`ProgressReporter`]
//! instead of talking to any presentation layer. Front ends implement the
//! trait; [`NoOpProgressReporter`] is used when nobody is listening.

use async_trait::async_trait;

use crate::models::{MintStage, UploadResult};

#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// Called on every stage transition, including the terminal one.
    async fn stage_changed(&self, stage: &MintStage);

    /// Called after each successful upload.
    async fn uploaded(&self, _result: &UploadResult) {}
}

/// No-op implementation for callers that do not track progress
pub struct NoOpProgressReporter;

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn stage_changed(&self, _stage: &MintStage) {}
}

/// Logs every transition through `tracing`.
pub struct TracingProgressReporter;

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn stage_changed(&self, stage: &MintStage) {
        match stage {
            MintStage::Failed(reason) => tracing::warn!(reason = %reason, "Mint attempt failed"),
            other => tracing::info!(stage = %other, "Mint stage changed"),
        }
    }

    async fn uploaded(&self, result: &UploadResult) {
        tracing::info!(role = %result.role, cid = %result.cid, "Upload complete");
    }
}
