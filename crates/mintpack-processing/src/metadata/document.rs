use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Token metadata document, serialized in the field order consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    pub name: String,
    pub description: String,
    pub rights: String,
    pub minter: String,
    pub date: String,
    pub tags: Vec<String>,
    pub symbol: String,
    pub artifact_uri: String,
    pub display_uri: String,
    pub thumbnail_uri: String,
    pub creators: Vec<String>,
    pub formats: Vec<Format>,
    pub attributes: Vec<Attribute>,
    pub decimals: u32,
    pub is_boolean_amount: bool,
    pub should_prefer_symbol: bool,
}

impl MetadataDocument {
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// One rendition of the token content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    pub uri: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Measure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Format {
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            file_size: None,
            file_name: None,
            dimensions: None,
            data_rate: None,
            duration: None,
        }
    }
}

/// `{ "value": "1024x693", "unit": "px" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: String,
    pub unit: String,
}

/// `{ "value": 320, "unit": "kbps" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub value: Number,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
