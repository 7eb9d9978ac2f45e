use jsonschema::Validator;
use mintpack_core::constants::{
    DATE_TIME_PATTERN, DIMENSIONS_PATTERN, IPFS_URI_PATTERN, TEZOS_ADDRESS_PATTERN,
};
use mintpack_core::mime::schema_mimetypes;
use serde_json::{json, Value};
use std::sync::OnceLock;

use super::MetadataError;

/// JSON schema every metadata document must satisfy before upload.
pub fn metadata_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" },
            "rights": { "type": "string" },
            "minter": { "type": "string", "pattern": TEZOS_ADDRESS_PATTERN },
            "tags": { "type": "array", "items": { "type": "string" } },
            "symbol": { "type": "string" },
            "artifactUri": { "type": "string", "pattern": IPFS_URI_PATTERN },
            "displayUri": { "type": "string", "pattern": IPFS_URI_PATTERN },
            "thumbnailUri": { "type": "string", "pattern": IPFS_URI_PATTERN },
            "creators": {
                "type": "array",
                "items": { "type": "string", "pattern": TEZOS_ADDRESS_PATTERN }
            },
            "contributors": {
                "type": "array",
                "items": { "type": "string", "pattern": TEZOS_ADDRESS_PATTERN }
            },
            "date": { "type": "string", "pattern": DATE_TIME_PATTERN },
            "formats": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "uri": { "type": "string", "pattern": IPFS_URI_PATTERN },
                        "mimeType": { "type": "string", "enum": schema_mimetypes() },
                        "fileSize": { "type": "number", "minimum": 0 },
                        "fileName": { "type": "string" },
                        "dimensions": {
                            "type": "object",
                            "properties": {
                                "value": { "type": "string", "pattern": DIMENSIONS_PATTERN },
                                "unit": { "type": "string" }
                            },
                            "required": ["value", "unit"],
                            "additionalProperties": true
                        }
                    },
                    "required": ["uri", "mimeType"],
                    "additionalProperties": true
                }
            },
            "attributes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "value": { "type": "string" },
                        "type": { "type": "string" },
                        "trait_type": { "type": "string" }
                    },
                    "required": ["value"],
                    "additionalProperties": true
                }
            },
            "decimals": { "type": "number", "minimum": 0 },
            "isBooleanAmount": { "type": "boolean" },
            "shouldPreferSymbol": { "type": "boolean" }
        },
        "required": [
            "name", "description", "tags", "symbol", "artifactUri", "displayUri",
            "thumbnailUri", "creators", "formats", "decimals", "isBooleanAmount",
            "shouldPreferSymbol"
        ],
        "additionalProperties": false
    })
}

fn validator() -> Result<&'static Validator, MetadataError> {
    static VALIDATOR: OnceLock<Validator> = OnceLock::new();
    if let Some(validator) = VALIDATOR.get() {
        return Ok(validator);
    }
    let compiled = jsonschema::validator_for(&metadata_schema())
        .map_err(|e| MetadataError::Schema(e.to_string()))?;
    Ok(VALIDATOR.get_or_init(|| compiled))
}

/// Check `document` against [`metadata_schema`]. Every violation is
/// reported; nothing is corrected.
pub fn verify_metadata(document: &Value) -> Result<(), MetadataError> {
    let validation_errors: Vec<String> = validator()?
        .iter_errors(document)
        .map(|e| e.to_string())
        .collect();

    if validation_errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(errors = ?validation_errors, "Metadata failed validation");
        Err(MetadataError::InvalidMetadata { validation_errors })
    }
}
