//! Outbound collaborators: where transcripts come from and who translates them.

pub mod translate;
pub mod ytdlp;

use async_trait::async_trait;

use crate::{error::ServiceError, types::ContentId, types::TranscriptSegment};

pub use translate::HttpTranslator;
pub use ytdlp::YtDlpTranscripts;

#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// Caption segments for `content_id` in exactly `language`.
    async fn fetch_transcript(
        &self,
        content_id: &ContentId,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, ServiceError>;
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Human readable backend name, used in errors and logs.
    fn name(&self) -> &'static str;

    async fn detect_language(&self, text: &str) -> Result<String, ServiceError>;

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceError>;
}
