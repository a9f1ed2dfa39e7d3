use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KonspektError, Result};

/// Opaque video identifier, e.g. `dQw4w9WgXcQ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(KonspektError::invalid_input(id, "video id is empty"));
        }
        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            let reason = format!("unexpected character {bad:?} in video id");
            return Err(KonspektError::invalid_input(id, reason));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentId {
    type Error = KonspektError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptRequest {
    pub content_id: ContentId,
    /// Tried in order, first hit wins.
    pub language_preferences: Vec<String>,
}

impl TranscriptRequest {
    pub fn new(content_id: ContentId, language_preferences: Vec<String>) -> Self {
        Self {
            content_id,
            language_preferences,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: String,
    /// Languages tried before this one was found, ending with the hit.
    #[serde(default)]
    pub attempts: Vec<LanguageAttempt>,
}

impl Transcript {
    /// Joins segment texts with a single space, in the order received.
    pub fn from_segments(language: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            text,
            segments,
            language: language.into(),
            attempts: Vec::new(),
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.start + s.duration)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Found { segments: usize },
    Failed { reason: String },
}

/// One language tried by the acquirer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageAttempt {
    pub language: String,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedText {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl NormalizedText {
    pub fn was_translated(&self) -> bool {
        !crate::normalize::same_language(&self.source_language, &self.target_language)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub sentence_count: usize,
}

/// Everything one pipeline run hands to the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub content_id: ContentId,
    pub thumbnail_url: String,
    pub transcript: Transcript,
    pub normalized: NormalizedText,
    pub summary: Summary,
}
