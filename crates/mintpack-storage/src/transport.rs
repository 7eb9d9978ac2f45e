//! Request helpers shared by the pinning backends.

use mintpack_core::{Asset, BackendKind};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::{Form, Part};
use reqwest::Response;

use crate::traits::StorageError;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub(crate) fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Multipart form that sends part file names verbatim.
///
/// Names are already percent-encoded where the services expect it.
pub(crate) fn new_form() -> Form {
    Form::new().percent_encode_noop()
}

/// `file` part carrying `asset` under `file_name`.
pub(crate) fn file_part(
    backend: BackendKind,
    asset: &Asset,
    file_name: String,
) -> Result<Part, StorageError> {
    let mime_type = if asset.mime_type.is_empty() {
        FALLBACK_MIME_TYPE
    } else {
        asset.mime_type.as_str()
    };
    Part::bytes(asset.data.to_vec())
        .file_name(file_name)
        .mime_str(mime_type)
        .map_err(|e| StorageError::upload_failed(backend, e))
}

/// Turn a non-success response into an `UploadFailed` carrying the body text.
pub(crate) async fn ensure_success(
    backend: BackendKind,
    response: Response,
) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(StorageError::upload_failed(
        backend,
        format!("{} - {}", status, error_text),
    ))
}
