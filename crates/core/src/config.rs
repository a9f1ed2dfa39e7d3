use crate::summarizer::DEFAULT_SENTENCE_COUNT;

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub target_language: String,
    /// Transcript languages to try, in order.
    pub language_preferences: Vec<String>,
    pub sentence_count: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_language(DEFAULT_TARGET_LANGUAGE)
    }
}

impl PipelineConfig {
    /// Summarize into `target_language`, fetching transcripts in that language only.
    pub fn for_language(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            language_preferences: vec![target_language.to_string()],
            sentence_count: DEFAULT_SENTENCE_COUNT,
        }
    }

    pub fn with_language_preferences(mut self, languages: Vec<String>) -> Self {
        self.language_preferences = languages;
        self
    }

    pub fn with_sentence_count(mut self, sentence_count: usize) -> Self {
        self.sentence_count = sentence_count;
        self
    }
}
