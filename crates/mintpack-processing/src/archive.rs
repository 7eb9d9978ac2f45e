//! ZIP archive unpacking for interactive (HTML) artifacts.

use mintpack_core::constants::{BUNDLE_ENTRY_POINT, IPFS_DIRECTORY_MIMETYPE, MINT_FILESIZE_LIMIT};
use mintpack_core::mime::content_type_for_path;
use mintpack_core::{Asset, DirectoryBundle};
use std::io::{Cursor, Read};
use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("No index.html file found in the archive")]
    MissingEntryPoint,

    #[error("Archive could not be read: {0}")]
    Corrupt(String),
}

/// Unpack `bytes` into a bundle rooted at the directory of the first
/// `index.html` entry.
///
/// Paths under the root lose the root prefix; the root itself becomes the
/// empty path and is kept as a directory placeholder. Zero-length entries
/// ending in `/` are directories, everything else is typed by extension.
pub fn unpack_archive(archive_name: &str, bytes: &[u8]) -> Result<DirectoryBundle, ArchiveError> {
    let entries = read_entries(bytes)?;

    let root = find_root(&entries).ok_or(ArchiveError::MissingEntryPoint)?;
    let prefix = format!("{}/", root);

    let mut bundle = DirectoryBundle::new(archive_name, root.clone());
    for (path, data) in entries {
        let relative = if root.is_empty() {
            path.as_str()
        } else {
            path.strip_prefix(&prefix).unwrap_or(path.as_str())
        };

        let mime_type = if data.is_empty() && path.ends_with('/') {
            IPFS_DIRECTORY_MIMETYPE
        } else {
            content_type_for_path(&path)
        };

        let file_name = relative
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let relative = relative.to_string();
        bundle.insert(relative, Asset::new(data, mime_type, file_name));
    }

    tracing::debug!(
        archive = %archive_name,
        root = %bundle.root,
        entries = bundle.len(),
        "Archive unpacked"
    );

    Ok(bundle)
}

fn read_entries(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>, ArchiveError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ArchiveError::Corrupt(e.to_string()))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| ArchiveError::Corrupt(e.to_string()))?;
        let name = file.name().to_string();
        let mut data = Vec::with_capacity(capacity_hint(file.size(), bytes.len()));
        file.read_to_end(&mut data)
            .map_err(|e| ArchiveError::Corrupt(format!("{}: {}", name, e)))?;
        entries.push((name, data));
    }
    Ok(entries)
}

/// Pre-allocation for an entry. The declared size comes from the archive
/// header and is only trusted up to the archive length and the upload limit.
fn capacity_hint(declared: u64, archive_len: usize) -> usize {
    usize::try_from(declared)
        .unwrap_or(usize::MAX)
        .min(archive_len)
        .min(MINT_FILESIZE_LIMIT)
}

/// Directory of the first entry named exactly `index.html`, in archive order.
fn find_root(entries: &[(String, Vec<u8>)]) -> Option<String> {
    entries.iter().find_map(|(path, _)| {
        let (parent, file_name) = match path.rsplit_once('/') {
            Some((parent, file_name)) => (parent, file_name),
            None => ("", path.as_str()),
        };
        (file_name == BUNDLE_ENTRY_POINT).then(|| parent.to_string())
    })
}
