//! File names given to derived and generated uploads.

pub const JPEG_EXTENSION: &str = ".jpg";
pub const JSON_EXTENSION: &str = ".json";

/// Replace everything from the last `.` of `name` with `extension`.
/// Names without a dot get the extension appended.
pub fn change_file_extension(name: &str, extension: &str) -> String {
    match name.rfind('.') {
        Some(idx) => format!("{}{}", &name[..idx], extension),
        None => format!("{}{}", name, extension),
    }
}

/// `foo.png` -> `cover-foo.jpg`
pub fn cover_file_name(artifact_name: &str) -> String {
    format!("cover-{}", change_file_extension(artifact_name, JPEG_EXTENSION))
}

/// `foo.png` -> `thumbnail-foo.jpg`
pub fn thumbnail_file_name(artifact_name: &str) -> String {
    format!(
        "thumbnail-{}",
        change_file_extension(artifact_name, JPEG_EXTENSION)
    )
}

/// `foo.png` -> `metadata-foo.json`
pub fn metadata_file_name(artifact_name: &str) -> String {
    format!(
        "metadata-{}",
        change_file_extension(artifact_name, JSON_EXTENSION)
    )
}

/// File name without its last extension: `site.zip` -> `site`.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
