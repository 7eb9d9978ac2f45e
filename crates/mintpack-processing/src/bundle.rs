//! Turning an uploaded ZIP into a bundle that is safe to pin.

use mintpack_core::constants::{BUNDLE_ENTRY_POINT, BUNDLE_RAW_ENTRY_POINT};
use mintpack_core::{Asset, DirectoryBundle};
use thiserror::Error;

use crate::archive::{unpack_archive, ArchiveError};
use crate::html::{inject_csp, is_html_path, RewriteError};

#[derive(Debug, Error)]
pub enum PackagingError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Could not rewrite {path}: {source}")]
    Rewrite {
        path: String,
        #[source]
        source: RewriteError,
    },
}

/// Unpack an HTML archive and prepare it for a directory upload.
///
/// The untouched entry point is copied to `index_raw.html`, every other
/// `.html`/`.htm` entry gets the content-security-policy rewrite, and the
/// root marker is dropped.
pub fn prepare_bundle(archive_name: &str, bytes: &[u8]) -> Result<DirectoryBundle, PackagingError> {
    let mut bundle = unpack_archive(archive_name, bytes)?;

    let raw_index = bundle
        .get(BUNDLE_ENTRY_POINT)
        .map(|index| index.renamed(BUNDLE_RAW_ENTRY_POINT))
        .ok_or(ArchiveError::MissingEntryPoint)?;

    let pages: Vec<(String, Asset)> = bundle
        .uploadable()
        .filter(|entry| is_html_path(&entry.path))
        .map(|entry| (entry.path.clone(), entry.asset.clone()))
        .collect();

    for (path, page) in pages {
        let rewritten = match inject_csp(&page.data) {
            Ok(rewritten) => rewritten,
            Err(source) => return Err(PackagingError::Rewrite { path, source }),
        };
        bundle.insert(
            path,
            Asset {
                data: rewritten.into(),
                ..page
            },
        );
    }

    bundle.insert(BUNDLE_RAW_ENTRY_POINT, raw_index);
    bundle.remove_root_marker();

    tracing::info!(
        archive = %archive_name,
        root = %bundle.root,
        files = bundle.uploadable().count(),
        size_bytes = bundle.total_size(),
        "Bundle prepared"
    );

    Ok(bundle)
}
