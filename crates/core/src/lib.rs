//! Konspekt Core Library
//!
//! Fetches YouTube transcripts with language fallback, brings them into a
//! target language and condenses them into a short extractive summary.

pub mod acquire;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod services;
pub mod summarizer;
pub mod types;

// Re-export commonly used items at crate root
pub use acquire::acquire;
pub use config::PipelineConfig;
pub use error::{KonspektError, Result, ServiceError};
pub use format::{format_report_readable, format_timestamp, format_transcript_with_timestamps};
pub use input::parse_video_link;
pub use normalize::normalize;
pub use pipeline::Pipeline;
pub use provider::{ProviderConfig, TranslationProvider};
pub use services::{HttpTranslator, TranscriptService, TranslationService, YtDlpTranscripts};
pub use summarizer::{Summarizer, summarize};
pub use types::{
    AttemptOutcome, ContentId, LanguageAttempt, NormalizedText, Report, Summary, Transcript,
    TranscriptRequest, TranscriptSegment,
};
