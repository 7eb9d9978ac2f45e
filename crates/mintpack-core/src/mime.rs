//! Media types understood by the minting pipeline.

use crate::constants::IPFS_DIRECTORY_MIMETYPE;

pub const IMAGE_BMP: &str = "image/bmp";
pub const IMAGE_GIF: &str = "image/gif";
pub const IMAGE_JPEG: &str = "image/jpeg";
pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_SVG: &str = "image/svg+xml";
pub const IMAGE_TIFF: &str = "image/tiff";
pub const IMAGE_WEBP: &str = "image/webp";
pub const VIDEO_MP4: &str = "video/mp4";
pub const VIDEO_OGG: &str = "video/ogg";
pub const VIDEO_QUICKTIME: &str = "video/quicktime";
pub const VIDEO_WEBM: &str = "video/webm";
pub const MODEL_GLB: &str = "model/gltf-binary";
pub const MODEL_GLTF: &str = "model/gltf+json";
pub const AUDIO_MPEG: &str = "audio/mpeg";
pub const AUDIO_OGG: &str = "audio/ogg";
pub const AUDIO_WAV: &str = "audio/wav";
pub const AUDIO_XWAV: &str = "audio/x-wav";
pub const AUDIO_FLAC: &str = "audio/flac";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const APPLICATION_ZIP: &str = "application/zip";
pub const APPLICATION_XZIP: &str = "application/x-zip-compressed";
pub const MULTIPART_XZIP: &str = "multipart/x-zip";
pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";

/// Every media type a `formats[].mimeType` entry may carry, excluding the
/// directory type.
pub const KNOWN_MIMETYPES: &[&str] = &[
    IMAGE_BMP,
    IMAGE_GIF,
    IMAGE_JPEG,
    IMAGE_PNG,
    IMAGE_SVG,
    IMAGE_TIFF,
    IMAGE_WEBP,
    VIDEO_MP4,
    VIDEO_OGG,
    VIDEO_QUICKTIME,
    VIDEO_WEBM,
    MODEL_GLB,
    MODEL_GLTF,
    AUDIO_MPEG,
    AUDIO_OGG,
    AUDIO_WAV,
    AUDIO_XWAV,
    AUDIO_FLAC,
    APPLICATION_PDF,
    APPLICATION_ZIP,
    APPLICATION_XZIP,
    MULTIPART_XZIP,
    TEXT_PLAIN,
];

/// Audio types whose bit rate and duration are lifted into the artifact format.
pub const MUSIC_MIMETYPES: &[&str] = &[AUDIO_MPEG, AUDIO_OGG, AUDIO_WAV, AUDIO_XWAV, AUDIO_FLAC];

pub const ZIP_MIMETYPES: &[&str] = &[APPLICATION_ZIP, APPLICATION_XZIP, MULTIPART_XZIP];

/// Media types accepted in the `formats[].mimeType` schema enum.
pub fn schema_mimetypes() -> Vec<&'static str> {
    let mut types = KNOWN_MIMETYPES.to_vec();
    types.push(IPFS_DIRECTORY_MIMETYPE);
    types
}

/// Whether an artifact of this type may be minted. glTF JSON references
/// external buffers and is never accepted as a single file.
pub fn is_allowed_upload(mime_type: &str) -> bool {
    mime_type != MODEL_GLTF && KNOWN_MIMETYPES.contains(&mime_type)
}

pub fn is_image(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

pub fn is_music(mime_type: &str) -> bool {
    MUSIC_MIMETYPES.contains(&mime_type)
}

pub fn is_zip(mime_type: &str) -> bool {
    ZIP_MIMETYPES.contains(&mime_type)
}

/// Infer a media type from the extension of `path`.
///
/// Unknown or missing extensions yield an empty string rather than an error.
pub fn content_type_for_path(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let extension = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return "",
    };

    match extension.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" | "map" => APPLICATION_JSON,
        "txt" | "md" => TEXT_PLAIN,
        "xml" => "application/xml",
        "csv" => "text/csv",
        "wasm" => "application/wasm",
        "bmp" => IMAGE_BMP,
        "gif" => IMAGE_GIF,
        "jpg" | "jpeg" => IMAGE_JPEG,
        "png" => IMAGE_PNG,
        "svg" => IMAGE_SVG,
        "tif" | "tiff" => IMAGE_TIFF,
        "webp" => IMAGE_WEBP,
        "ico" => "image/vnd.microsoft.icon",
        "mp4" | "m4v" => VIDEO_MP4,
        "ogv" => VIDEO_OGG,
        "mov" => VIDEO_QUICKTIME,
        "webm" => VIDEO_WEBM,
        "glb" => MODEL_GLB,
        "gltf" => MODEL_GLTF,
        "obj" => "model/obj",
        "mp3" => AUDIO_MPEG,
        "oga" | "ogg" => AUDIO_OGG,
        "wav" => AUDIO_WAV,
        "flac" => AUDIO_FLAC,
        "pdf" => APPLICATION_PDF,
        "zip" => APPLICATION_ZIP,
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(content_type_for_path("index.html"), "text/html");
        assert_eq!(content_type_for_path("assets/app.JS"), "application/javascript");
        assert_eq!(content_type_for_path("img/cat.jpeg"), IMAGE_JPEG);
        assert_eq!(content_type_for_path("LICENSE"), "");
        assert_eq!(content_type_for_path("data.unknownext"), "");
        assert_eq!(content_type_for_path("dir.v2/README"), "");
    }

    #[test]
    fn test_allowed_upload_excludes_gltf_json() {
        assert!(is_allowed_upload(IMAGE_PNG));
        assert!(is_allowed_upload(MODEL_GLB));
        assert!(!is_allowed_upload(MODEL_GLTF));
        assert!(!is_allowed_upload("application/octet-stream"));
    }

    #[test]
    fn test_schema_mimetypes_include_directory() {
        let types = schema_mimetypes();
        assert!(types.contains(&IPFS_DIRECTORY_MIMETYPE));
        assert!(types.contains(&MODEL_GLTF));
    }

    #[test]
    fn test_classifiers() {
        assert!(is_image(IMAGE_SVG));
        assert!(!is_image(VIDEO_MP4));
        assert!(is_music(AUDIO_FLAC));
        assert!(!is_music(VIDEO_OGG));
        assert!(is_zip(MULTIPART_XZIP));
    }
}
