//! Extractive summaries: pick the highest-ranked sentences and keep them in
//! document order.

pub mod lsa;
pub mod tokenizer;

use tracing::debug;

use crate::{
    error::{KonspektError, Result},
    types::Summary,
};

pub use tokenizer::Tokenizer;

pub const DEFAULT_SENTENCE_COUNT: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedSentence {
    pub index: usize,
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct Summarizer {
    tokenizer: Tokenizer,
    sentence_count: usize,
}

impl Summarizer {
    pub fn new(language: &str) -> Self {
        Self {
            tokenizer: Tokenizer::new(language),
            sentence_count: DEFAULT_SENTENCE_COUNT,
        }
    }

    pub fn with_sentence_count(mut self, sentence_count: usize) -> Self {
        self.sentence_count = sentence_count;
        self
    }

    /// Every sentence with its LSA score, in document order.
    pub fn rank(&self, text: &str) -> Vec<RankedSentence> {
        let sentences = self.tokenizer.sentences(text);
        let words: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| self.tokenizer.words(s))
            .collect();
        let scores = lsa::sentence_ranks(&words);

        sentences
            .into_iter()
            .zip(scores)
            .enumerate()
            .map(|(index, (text, score))| RankedSentence {
                index,
                text: text.to_string(),
                score,
            })
            .collect()
    }

    pub fn summarize(&self, text: &str) -> Result<Summary> {
        if self.sentence_count == 0 {
            return Err(KonspektError::invalid_input(
                self.sentence_count.to_string(),
                "sentence count must be at least 1",
            ));
        }

        let mut ranked = self.rank(text);
        if ranked.is_empty() {
            return Err(KonspektError::EmptyInput);
        }
        let total = ranked.len();

        // stable: equal scores keep the earlier sentence first
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.sentence_count);
        ranked.sort_by_key(|s| s.index);

        debug!(
            language = self.tokenizer.language(),
            sentences = total,
            picked = ranked.len(),
            "summary selected"
        );

        Ok(Summary {
            text: ranked
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            sentence_count: ranked.len(),
        })
    }
}

/// Summarize `text` written in `language` down to `sentence_count` sentences.
pub fn summarize(text: &str, language: &str, sentence_count: usize) -> Result<Summary> {
    Summarizer::new(language)
        .with_sentence_count(sentence_count)
        .summarize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "Rust is a systems programming language. \
        The weather in the valley was mild. \
        Ownership and borrowing let Rust guarantee memory safety without a garbage collector. \
        Memory safety in Rust comes from the ownership system and the borrow checker.";

    #[test]
    fn single_sentence_is_verbatim_from_input() {
        let summary = summarize(ARTICLE, "en", 1).unwrap();

        assert_eq!(summary.sentence_count, 1);
        assert!(!summary.text.is_empty());
        assert!(ARTICLE.contains(&summary.text));
        assert!(summary.text.ends_with('.'));
    }

    #[test]
    fn multiple_sentences_keep_document_order() {
        let summary = summarize(ARTICLE, "en", 2).unwrap();
        assert_eq!(summary.sentence_count, 2);

        let ranked = Summarizer::new("en").rank(ARTICLE);
        let positions: Vec<usize> = ranked
            .iter()
            .filter(|s| summary.text.contains(&s.text))
            .map(|s| s.index)
            .collect();
        assert_eq!(positions.len(), 2);
        assert!(positions[0] < positions[1]);

        let first = &ranked[positions[0]].text;
        let second = &ranked[positions[1]].text;
        assert_eq!(summary.text, format!("{first} {second}"));
    }

    #[test]
    fn off_topic_sentence_is_not_picked() {
        let summary = summarize(ARTICLE, "en", 1).unwrap();
        assert!(!summary.text.contains("weather"));
    }

    #[test]
    fn asking_for_more_than_available_returns_everything() {
        let text = "First point here. Second point there.";
        let summary = summarize(text, "en", 10).unwrap();

        assert_eq!(summary.sentence_count, 2);
        assert_eq!(summary.text, text);
    }

    #[test]
    fn unpunctuated_text_is_one_sentence() {
        let summary = summarize("Hello world this is a test", "en", 1).unwrap();
        assert_eq!(summary.text, "Hello world this is a test");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(summarize("", "en", 1), Err(KonspektError::EmptyInput)));
        assert!(matches!(
            summarize("  ... ?! ", "en", 1),
            Err(KonspektError::EmptyInput)
        ));
    }

    #[test]
    fn zero_sentences_is_invalid() {
        assert!(matches!(
            summarize(ARTICLE, "en", 0),
            Err(KonspektError::InvalidInput { .. })
        ));
    }

    #[test]
    fn lowercase_transcript_is_condensed() {
        let text = "we tried the first approach. it failed badly. then we switched to rust.";
        let summary = summarize(text, "en", 1).unwrap();

        assert_eq!(summary.sentence_count, 1);
        assert!(summary.text.len() < text.len());
        assert!(text.contains(&summary.text));
    }

    #[test]
    fn equal_scores_prefer_earlier_sentence() {
        let summary = summarize("Alpha beta. Gamma delta.", "en", 1).unwrap();
        assert_eq!(summary.text, "Alpha beta.");
    }
}
