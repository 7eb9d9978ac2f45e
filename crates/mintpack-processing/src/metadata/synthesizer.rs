use chrono::{SecondsFormat, Utc};
use mintpack_core::constants::{
    IPFS_DEFAULT_THUMBNAIL_URI, IPFS_DIRECTORY_MIMETYPE, MEDIA_PARSER_NAME, MINTER_CONTRACT,
    MINTER_TOOL_NAME, OBJKT_SYMBOL,
};
use mintpack_core::mime::{is_music, IMAGE_JPEG};
use mintpack_core::naming::{cover_file_name, thumbnail_file_name};
use mintpack_core::{Asset, ContentIdentifier, Dimensions};
use serde_json::{Number, Value};

use super::document::{Attribute, Format, Measure, MetadataDocument, Rate};
use super::schema::verify_metadata;
use super::MetadataError;
use crate::probe::ProbeReport;

const PIXEL_UNIT: &str = "px";
const BITRATE_UNIT: &str = "kbps";
const SKIPPED_TRACK_KEY: &str = "@type";

/// The primary upload as the metadata describes it.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedArtifact {
    pub cid: ContentIdentifier,
    pub mime_type: String,
    pub file_name: String,
    pub file_size: u64,
    pub dimensions: Option<Dimensions>,
}

/// A derived image together with the identifier it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedRendition {
    pub cid: ContentIdentifier,
    pub asset: Asset,
}

/// Everything known about a mint attempt once its uploads are done.
#[derive(Debug, Clone)]
pub struct MetadataContext {
    pub title: String,
    pub description: String,
    pub rights: String,
    /// Comma separated, as entered.
    pub tags: String,
    pub creator: String,
    pub artifact: UploadedArtifact,
    pub cover: Option<UploadedRendition>,
    pub thumbnail: Option<UploadedRendition>,
    pub probe: ProbeReport,
}

/// Builds token metadata documents.
#[derive(Debug, Clone)]
pub struct MetadataSynthesizer {
    media_parser: String,
}

impl Default for MetadataSynthesizer {
    fn default() -> Self {
        Self::new(MEDIA_PARSER_NAME)
    }
}

impl MetadataSynthesizer {
    pub fn new(media_parser: impl Into<String>) -> Self {
        Self {
            media_parser: media_parser.into(),
        }
    }

    /// Build the document dated now and validate it against the schema.
    pub fn synthesize(&self, context: &MetadataContext) -> Result<MetadataDocument, MetadataError> {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let document = self.assemble(context, date);
        verify_metadata(&document.to_json()?)?;
        Ok(document)
    }

    /// Build the document without validating it.
    pub fn assemble(&self, context: &MetadataContext, date: impl Into<String>) -> MetadataDocument {
        let artifact = &context.artifact;
        let artifact_uri = artifact.cid.to_uri();
        let display_uri = context
            .cover
            .as_ref()
            .map(|cover| cover.cid.to_uri())
            .unwrap_or_default();
        let thumbnail_uri = context
            .thumbnail
            .as_ref()
            .map(|thumbnail| thumbnail.cid.to_uri())
            .unwrap_or_else(|| IPFS_DEFAULT_THUMBNAIL_URI.to_string());

        let mut primary = Format::new(artifact_uri.clone(), artifact.mime_type.clone());
        primary.file_size = Some(artifact.file_size);
        primary.file_name = Some(artifact.file_name.clone());
        if artifact.mime_type != IPFS_DIRECTORY_MIMETYPE {
            primary.dimensions = artifact.dimensions.map(pixels);
        }

        let mut formats = vec![primary];
        if thumbnail_uri != IPFS_DEFAULT_THUMBNAIL_URI {
            formats.push(rendition_format(
                display_uri.clone(),
                cover_file_name(&artifact.file_name),
                context.cover.as_ref(),
            ));
            formats.push(rendition_format(
                thumbnail_uri.clone(),
                thumbnail_file_name(&artifact.file_name),
                context.thumbnail.as_ref(),
            ));
        }

        let mut attributes = Vec::new();
        let music = is_music(&artifact.mime_type);
        for track in &context.probe.tracks {
            for (key, value) in track {
                if key == SKIPPED_TRACK_KEY {
                    continue;
                }
                if value.is_null() {
                    tracing::debug!(
                        file_name = %artifact.file_name,
                        field = %key,
                        "Probed field has no value, attribute skipped"
                    );
                    continue;
                }
                attributes.push(Attribute::new(key.clone(), attribute_value(value)));

                if music && !value.is_object() {
                    match key.as_str() {
                        "OverallBitRate" => {
                            if let Some(rate) = numeric(value).and_then(kilobits) {
                                formats[0].data_rate = Some(Rate {
                                    value: rate,
                                    unit: BITRATE_UNIT.to_string(),
                                });
                            }
                        }
                        "Duration" => {
                            if let Some(seconds) = numeric(value) {
                                formats[0].duration = Some(format_duration(seconds));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        attributes.push(Attribute::new(
            "@minter",
            format!("{} v{}", MINTER_TOOL_NAME, env!("CARGO_PKG_VERSION")),
        ));
        attributes.push(Attribute::new("@mediaParser", self.media_parser.clone()));

        MetadataDocument {
            name: context.title.clone(),
            description: context.description.clone(),
            rights: context.rights.clone(),
            minter: MINTER_CONTRACT.to_string(),
            date: date.into(),
            tags: tags_to_array(&context.tags),
            symbol: OBJKT_SYMBOL.to_string(),
            artifact_uri,
            display_uri,
            thumbnail_uri,
            creators: vec![context.creator.clone()],
            formats,
            attributes,
            decimals: 0,
            is_boolean_amount: false,
            should_prefer_symbol: false,
        }
    }
}

/// `"a, b ,c"` -> `["a", "b", "c"]`. All whitespace is dropped and empty
/// tags are skipped.
pub fn tags_to_array(tags: &str) -> Vec<String> {
    let compact: String = tags.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole seconds as `HH:MM:SS`; fractions are dropped.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

fn rendition_format(
    uri: String,
    file_name: String,
    rendition: Option<&UploadedRendition>,
) -> Format {
    let mut format = Format::new(uri, IMAGE_JPEG);
    format.file_name = Some(file_name);
    if let Some(rendition) = rendition {
        if rendition.asset.size() > 0 {
            format.file_size = Some(rendition.asset.size() as u64);
        }
        format.dimensions = rendition.asset.dimensions.map(pixels);
    }
    format
}

fn pixels(dimensions: Dimensions) -> Measure {
    Measure {
        value: dimensions.to_string(),
        unit: PIXEL_UNIT.to_string(),
    }
}

fn attribute_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Bits per second to kilobits, kept integral when it divides evenly.
fn kilobits(bits: f64) -> Option<Number> {
    let bits = bits.trunc() as i64;
    if bits % 1000 == 0 {
        Some(Number::from(bits / 1000))
    } else {
        Number::from_f64(bits as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    const ARTIFACT_CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
    const COVER_CID: &str = "QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgnd";
    const THUMBNAIL_CID: &str = "QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgne";
    const CREATOR: &str = "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb";
    const DATE: &str = "2021-09-27T14:46:19.842Z";

    fn track(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("track must be an object"),
        }
    }

    fn image_context() -> MetadataContext {
        MetadataContext {
            title: "Burn".to_string(),
            description: "A fire".to_string(),
            rights: "CC0".to_string(),
            tags: " fire, red ,,art ".to_string(),
            creator: CREATOR.to_string(),
            artifact: UploadedArtifact {
                cid: ContentIdentifier::new(ARTIFACT_CID),
                mime_type: "image/png".to_string(),
                file_name: "burn5.png".to_string(),
                file_size: 251_460,
                dimensions: Some(Dimensions {
                    width: 1080,
                    height: 731,
                }),
            },
            cover: Some(UploadedRendition {
                cid: ContentIdentifier::new(COVER_CID),
                asset: Asset::new(vec![0u8; 90], IMAGE_JPEG, "cover-burn5.jpg").with_dimensions(
                    Dimensions {
                        width: 1024,
                        height: 693,
                    },
                ),
            }),
            thumbnail: Some(UploadedRendition {
                cid: ContentIdentifier::new(THUMBNAIL_CID),
                asset: Asset::new(vec![0u8; 30], IMAGE_JPEG, "thumbnail-burn5.jpg")
                    .with_dimensions(Dimensions {
                        width: 350,
                        height: 237,
                    }),
            }),
            probe: ProbeReport {
                tracks: vec![
                    track(json!({"@type": "General", "Format": "PNG", "FileSize": "251460"})),
                    track(json!({"@type": "Image", "Width": "1080", "extra": {"Gamma": "0.455"}})),
                ],
            },
        }
    }

    #[test]
    fn test_tags_to_array() {
        assert_eq!(tags_to_array("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(tags_to_array(" fire, red ,,art "), vec!["fire", "red", "art"]);
        assert!(tags_to_array("").is_empty());
        assert!(tags_to_array("  ").is_empty());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(754.9), "00:12:34");
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(0.4), "00:00:00");
        // Hours keep counting past a day.
        assert_eq!(format_duration(86_400.0), "24:00:00");
        assert_eq!(format_duration(90_061.5), "25:01:01");
        assert_eq!(format_duration(-3.0), "00:00:00");
    }

    #[test]
    fn test_image_with_renditions() {
        let document = MetadataSynthesizer::default().assemble(&image_context(), DATE);

        assert_eq!(document.symbol, "OBJKT");
        assert_eq!(document.minter, MINTER_CONTRACT);
        assert_eq!(document.creators, vec![CREATOR]);
        assert_eq!(document.tags, vec!["fire", "red", "art"]);
        assert_eq!(document.artifact_uri, format!("ipfs://{}", ARTIFACT_CID));
        assert_eq!(document.display_uri, format!("ipfs://{}", COVER_CID));
        assert_eq!(document.thumbnail_uri, format!("ipfs://{}", THUMBNAIL_CID));

        assert_eq!(document.formats.len(), 3);
        let artifact = &document.formats[0];
        assert_eq!(artifact.dimensions.as_ref().unwrap().value, "1080x731");
        assert_eq!(artifact.file_size, Some(251_460));
        assert_eq!(artifact.file_name.as_deref(), Some("burn5.png"));

        let cover = &document.formats[1];
        assert_eq!(cover.uri, document.display_uri);
        assert_eq!(cover.mime_type, "image/jpeg");
        assert_eq!(cover.file_name.as_deref(), Some("cover-burn5.jpg"));
        assert_eq!(cover.dimensions.as_ref().unwrap().value, "1024x693");
        assert_eq!(cover.file_size, Some(90));

        let thumbnail = &document.formats[2];
        assert_eq!(thumbnail.file_name.as_deref(), Some("thumbnail-burn5.jpg"));
        assert_eq!(thumbnail.dimensions.as_ref().unwrap().value, "350x237");

        verify_metadata(&document.to_json().unwrap()).unwrap();
    }

    #[test]
    fn test_attributes_skip_type_and_end_with_provenance() {
        let document = MetadataSynthesizer::new("mediainfo 23.04").assemble(&image_context(), DATE);

        let keys: Vec<&str> = document.attributes.iter().map(|a| a.key.as_str()).collect();
        assert!(!keys.contains(&"@type"));
        assert_eq!(&keys[keys.len() - 2..], &["@minter", "@mediaParser"]);

        let extra = document.attributes.iter().find(|a| a.key == "extra").unwrap();
        assert_eq!(extra.value, r#"{"Gamma":"0.455"}"#);

        let minter = &document.attributes[keys.len() - 2];
        assert_eq!(minter.value, format!("mintpack v{}", env!("CARGO_PKG_VERSION")));
        assert_eq!(document.attributes[keys.len() - 1].value, "mediainfo 23.04");
    }

    #[test]
    fn test_without_renditions_only_artifact_format() {
        let mut context = image_context();
        context.cover = None;
        context.thumbnail = None;

        let document = MetadataSynthesizer::default().assemble(&context, DATE);

        assert_eq!(document.formats.len(), 1);
        assert_eq!(document.display_uri, "");
        assert_eq!(document.thumbnail_uri, IPFS_DEFAULT_THUMBNAIL_URI);
    }

    #[test]
    fn test_cover_without_thumbnail_adds_no_rendition_formats() {
        let mut context = image_context();
        context.thumbnail = None;

        let document = MetadataSynthesizer::default().assemble(&context, DATE);

        assert_eq!(document.formats.len(), 1);
        assert_eq!(document.display_uri, format!("ipfs://{}", COVER_CID));
        assert_eq!(document.thumbnail_uri, IPFS_DEFAULT_THUMBNAIL_URI);
    }

    #[test]
    fn test_empty_display_uri_fails_validation() {
        let mut context = image_context();
        context.cover = None;
        context.thumbnail = None;

        match MetadataSynthesizer::default().synthesize(&context) {
            Err(MetadataError::InvalidMetadata { validation_errors }) => {
                assert_eq!(validation_errors.len(), 1);
            }
            other => panic!("expected invalid metadata, got {other:?}"),
        }
    }

    #[test]
    fn test_audio_sets_data_rate_and_duration() {
        let mut context = image_context();
        context.artifact.mime_type = "audio/mpeg".to_string();
        context.artifact.file_name = "song.mp3".to_string();
        context.artifact.dimensions = None;
        context.probe = ProbeReport {
            tracks: vec![track(json!({
                "@type": "General",
                "Duration": "754.123",
                "OverallBitRate": "320000"
            }))],
        };

        let document = MetadataSynthesizer::default().assemble(&context, DATE);
        let artifact = &document.formats[0];

        assert!(artifact.dimensions.is_none());
        assert_eq!(artifact.duration.as_deref(), Some("00:12:34"));
        let rate = artifact.data_rate.as_ref().unwrap();
        assert_eq!(rate.value, Number::from(320));
        assert_eq!(rate.unit, "kbps");

        let json = document.to_json().unwrap();
        assert_eq!(json["formats"][0]["dataRate"]["value"], json!(320));
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_null_media_field_is_skipped_and_logged() {
        let mut context = image_context();
        context.artifact.mime_type = "audio/mpeg".to_string();
        context.artifact.file_name = "song.mp3".to_string();
        context.probe = ProbeReport {
            tracks: vec![track(json!({
                "@type": "General",
                "Duration": null,
                "OverallBitRate": "320000"
            }))],
        };

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let document = tracing::subscriber::with_default(subscriber, || {
            MetadataSynthesizer::default().assemble(&context, DATE)
        });

        assert!(document.formats[0].duration.is_none());
        assert!(document.attributes.iter().all(|a| a.key != "Duration"));
        assert!(document.formats[0].data_rate.is_some());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("attribute skipped"));
        assert!(output.contains("field=Duration"));
    }

    #[test]
    fn test_uneven_bitrate_keeps_fraction() {
        assert_eq!(kilobits(128_500.0), Number::from_f64(128.5));
        assert_eq!(kilobits(96_000.9), Some(Number::from(96)));
    }

    #[test]
    fn test_non_audio_ignores_bitrate() {
        let mut context = image_context();
        context.probe = ProbeReport {
            tracks: vec![track(json!({"@type": "General", "OverallBitRate": "320000"}))],
        };

        let document = MetadataSynthesizer::default().assemble(&context, DATE);

        assert!(document.formats[0].data_rate.is_none());
        assert!(document.attributes.iter().any(|a| a.key == "OverallBitRate"));
    }

    #[test]
    fn test_directory_artifact_has_no_dimensions() {
        let mut context = image_context();
        context.artifact.mime_type = "application/x-directory".to_string();
        context.artifact.file_name = "site.zip".to_string();

        let document = MetadataSynthesizer::default().assemble(&context, DATE);

        assert!(document.formats[0].dimensions.is_none());
        assert_eq!(document.formats[0].mime_type, "application/x-directory");
        assert_eq!(document.formats[1].file_name.as_deref(), Some("cover-site.jpg"));
    }

    #[test]
    fn test_synthesize_dates_in_utc_with_millis() {
        let document = MetadataSynthesizer::default()
            .synthesize(&image_context())
            .unwrap();

        assert!(document.date.ends_with('Z'));
        assert_eq!(document.date.len(), "2021-09-27T14:46:19.842Z".len());
    }

    #[test]
    fn test_serialized_field_order() {
        let document = MetadataSynthesizer::default().assemble(&image_context(), DATE);
        let json = serde_json::to_string(&document).unwrap();

        let name = json.find("\"name\"").unwrap();
        let artifact = json.find("\"artifactUri\"").unwrap();
        let boolean = json.find("\"shouldPreferSymbol\"").unwrap();
        assert!(name < artifact && artifact < boolean);
        assert!(!json.contains("dataRate"));
    }
}
