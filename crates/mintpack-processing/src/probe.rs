//! Media probing through the `mediainfo` command line tool.

use async_trait::async_trait;
use mintpack_core::constants::MEDIA_PARSER_NAME;
use mintpack_core::Asset;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::process::Command;

pub const DEFAULT_MEDIAINFO_PATH: &str = "mediainfo";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to stage probe input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run {tool}: {cause}")]
    Spawn { tool: String, cause: String },

    #[error("{tool} failed: {stderr}")]
    Failed { tool: String, stderr: String },

    #[error("Failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Track records reported for one payload, in tool order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub tracks: Vec<Map<String, Value>>,
}

impl ProbeReport {
    /// Parse `mediainfo --Output=JSON` output.
    pub fn from_json(raw: &[u8]) -> Result<Self, ProbeError> {
        let output: MediaInfoOutput = serde_json::from_slice(raw)?;
        let tracks = output
            .media
            .map(|media| media.track)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|track| match track {
                Value::Object(fields) => Some(fields),
                _ => None,
            })
            .collect();
        Ok(Self { tracks })
    }
}

#[derive(Debug, Deserialize)]
struct MediaInfoOutput {
    media: Option<MediaInfoMedia>,
}

#[derive(Debug, Deserialize)]
struct MediaInfoMedia {
    #[serde(default)]
    track: Vec<Value>,
}

#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, asset: &Asset) -> Result<ProbeReport, ProbeError>;

    /// Name recorded as the `@mediaParser` attribute.
    fn parser_name(&self) -> &str {
        MEDIA_PARSER_NAME
    }
}

pub struct MediaInfoProbe {
    mediainfo_path: String,
}

impl MediaInfoProbe {
    pub fn new(mediainfo_path: impl Into<String>) -> Self {
        Self {
            mediainfo_path: mediainfo_path.into(),
        }
    }
}

impl Default for MediaInfoProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIAINFO_PATH)
    }
}

#[async_trait]
impl MediaProbe for MediaInfoProbe {
    #[tracing::instrument(skip(self, asset), fields(file_name = %asset.file_name))]
    async fn probe(&self, asset: &Asset) -> Result<ProbeReport, ProbeError> {
        // mediainfo reads from a path, so the payload is staged in a temp file
        let temp_file = tempfile::NamedTempFile::new()?;
        tokio::fs::write(temp_file.path(), &asset.data).await?;

        let output = Command::new(&self.mediainfo_path)
            .arg("--Output=JSON")
            .arg(temp_file.path())
            .output()
            .await
            .map_err(|e| ProbeError::Spawn {
                tool: self.mediainfo_path.clone(),
                cause: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::error!(stderr = %stderr, "mediainfo failed");
            return Err(ProbeError::Failed {
                tool: self.mediainfo_path.clone(),
                stderr,
            });
        }

        let report = ProbeReport::from_json(&output.stdout)?;
        tracing::debug!(tracks = report.tracks.len(), "Media probed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUDIO_REPORT: &str = r#"{
        "creatingLibrary": {"name": "MediaInfoLib", "version": "21.09"},
        "media": {
            "@ref": "/tmp/x",
            "track": [
                {"@type": "General", "Format": "MPEG Audio", "Duration": "754.123", "OverallBitRate": "320000",
                 "extra": {"Encoded_Library": "LAME"}},
                {"@type": "Audio", "Format": "MPEG Audio", "Channels": "2"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_tracks() {
        let report = ProbeReport::from_json(AUDIO_REPORT.as_bytes()).unwrap();

        assert_eq!(report.tracks.len(), 2);
        assert_eq!(report.tracks[0]["@type"], "General");
        assert_eq!(report.tracks[0]["OverallBitRate"], "320000");
        assert!(report.tracks[0]["extra"].is_object());
        assert_eq!(report.tracks[1]["Channels"], "2");
    }

    #[test]
    fn test_missing_media_yields_no_tracks() {
        let report = ProbeReport::from_json(br#"{"creatingLibrary": {}}"#).unwrap();
        assert!(report.tracks.is_empty());

        let report = ProbeReport::from_json(br#"{"media": {"@ref": "x"}}"#).unwrap();
        assert!(report.tracks.is_empty());
    }

    #[test]
    fn test_invalid_output_is_an_error() {
        assert!(matches!(
            ProbeReport::from_json(b"General\nFormat : PNG"),
            Err(ProbeError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let probe = MediaInfoProbe::new("/nonexistent/mediainfo-binary");
        let asset = Asset::new(vec![0u8; 16], "image/png", "x.png");

        assert!(matches!(
            probe.probe(&asset).await,
            Err(ProbeError::Spawn { .. })
        ));
    }
}
