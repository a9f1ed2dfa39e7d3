use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::{fs, process::Command};
use tracing::debug;

use crate::{
    error::ServiceError,
    services::TranscriptService,
    types::{ContentId, TranscriptSegment},
};

const TOOL: &str = "yt-dlp";

/// Fetches captions with `yt-dlp`, preferring uploaded subtitles over auto-generated ones.
#[derive(Debug, Clone)]
pub struct YtDlpTranscripts {
    binary: PathBuf,
}

impl Default for YtDlpTranscripts {
    fn default() -> Self {
        Self::new(TOOL)
    }
}

impl YtDlpTranscripts {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn download_captions(
        &self,
        content_id: &ContentId,
        language: &str,
        out_dir: &Path,
    ) -> Result<(), ServiceError> {
        let output_template = out_dir.join("%(id)s.%(ext)s");
        let output = Command::new(&self.binary)
            .arg(content_id.watch_url())
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(language)
            .arg("--sub-format")
            .arg("json3")
            .arg("--no-warnings")
            .arg("-o")
            .arg(&output_template)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ServiceError::Tool {
                tool: TOOL,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

async fn find_caption_file(dir: &Path) -> Result<Option<PathBuf>, ServiceError> {
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json3") {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[async_trait]
impl TranscriptService for YtDlpTranscripts {
    async fn fetch_transcript(
        &self,
        content_id: &ContentId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, ServiceError> {
        let tmp = tempfile::tempdir()?;
        self.download_captions(content_id, language, tmp.path())
            .await?;

        let Some(path) = find_caption_file(tmp.path()).await? else {
            return Err(ServiceError::NoCaptions {
                language: language.to_string(),
            });
        };

        debug!(file = %path.display(), "parsing captions");
        let raw = fs::read_to_string(&path).await?;
        parse_json3(&raw)
    }
}

#[derive(Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse YouTube's `json3` caption format into timed segments.
pub fn parse_json3(raw: &str) -> Result<Vec<TranscriptSegment>, ServiceError> {
    let captions: Json3 = serde_json::from_str(raw)?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text: text.to_string(),
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json3_skips_window_and_newline_events() {
        let raw = r#"{
            "wireMagic": "pb3",
            "events": [
                { "tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1 },
                { "tStartMs": 160, "dDurationMs": 4000, "wWinId": 1,
                  "segs": [ { "utf8": "hello", "acAsrConf": 0 }, { "utf8": " world", "tOffsetMs": 400 } ] },
                { "tStartMs": 2000, "dDurationMs": 2160, "wWinId": 1, "aAppend": 1,
                  "segs": [ { "utf8": "\n" } ] },
                { "tStartMs": 4160, "dDurationMs": 1500,
                  "segs": [ { "utf8": "second\nline" } ] }
            ]
        }"#;

        let segments = parse_json3(raw).unwrap();
        assert_eq!(
            segments,
            vec![
                TranscriptSegment {
                    text: "hello world".into(),
                    start: 0.16,
                    duration: 4.0,
                },
                TranscriptSegment {
                    text: "second line".into(),
                    start: 4.16,
                    duration: 1.5,
                },
            ]
        );
    }

    #[test]
    fn json3_garbage_is_an_error() {
        assert!(matches!(parse_json3("<html>"), Err(ServiceError::Json(_))));
    }

    #[tokio::test]
    async fn missing_binary_surfaces_as_io_error() {
        let service = YtDlpTranscripts::new("/nonexistent/yt-dlp-binary");
        let id = ContentId::new("abc123").unwrap();

        let err = service.fetch_transcript(&id, "en").await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)), "{err}");
    }
}
