use anyhow::Context;
use mintpack_core::mime::content_type_for_path;
use mintpack_core::{Asset, DirectoryBundle};
use serde::Serialize;
use std::path::Path;

/// Read a file into an [`Asset`], typed by its extension.
pub fn load_asset(path: &Path) -> anyhow::Result<Asset> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?
        .to_string();
    let mime_type = content_type_for_path(&file_name);
    Ok(Asset::new(data, mime_type, file_name))
}

#[derive(Debug, Serialize)]
pub struct BundleSummary {
    pub archive: String,
    pub root: String,
    pub total_size: usize,
    pub entries: Vec<BundleEntrySummary>,
}

#[derive(Debug, Serialize)]
pub struct BundleEntrySummary {
    pub path: String,
    pub mime_type: String,
    pub size: usize,
}

/// Uploadable entries of a prepared bundle, for display.
pub fn summarize_bundle(bundle: &DirectoryBundle) -> BundleSummary {
    BundleSummary {
        archive: bundle.archive_name.clone(),
        root: bundle.root.clone(),
        total_size: bundle.total_size(),
        entries: bundle
            .uploadable()
            .map(|entry| BundleEntrySummary {
                path: entry.path.clone(),
                mime_type: entry.asset.mime_type.clone(),
                size: entry.asset.size(),
            })
            .collect(),
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mintpack=info,info")),
        )
        .init();
}
