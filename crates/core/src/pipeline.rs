use tracing::{Instrument, info, info_span};

use crate::{
    acquire::acquire,
    config::PipelineConfig,
    error::Result,
    normalize::normalize,
    services::{TranscriptService, TranslationService},
    summarizer::Summarizer,
    types::{ContentId, Report, TranscriptRequest},
};

/// One linear pass: transcript, then language normalization, then summary.
///
/// Collaborators are borrowed for the duration of the run; nothing is kept
/// between calls to [`Pipeline::run`].
pub struct Pipeline<'a> {
    transcripts: &'a dyn TranscriptService,
    translator: &'a dyn TranslationService,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        transcripts: &'a dyn TranscriptService,
        translator: &'a dyn TranslationService,
        config: PipelineConfig,
    ) -> Self {
        Self {
            transcripts,
            translator,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run(&self, content_id: &ContentId) -> Result<Report> {
        let request = TranscriptRequest::new(
            content_id.clone(),
            self.config.language_preferences.clone(),
        );

        let transcript = acquire(self.transcripts, &request)
            .instrument(info_span!("acquire", %content_id))
            .await?;

        let normalized = normalize(
            self.translator,
            &transcript.text,
            &self.config.target_language,
        )
        .instrument(info_span!("normalize", target = %self.config.target_language))
        .await?;

        let summary = info_span!("summarize", sentences = self.config.sentence_count).in_scope(
            || {
                Summarizer::new(&normalized.target_language)
                    .with_sentence_count(self.config.sentence_count)
                    .summarize(&normalized.text)
            },
        )?;

        info!(
            %content_id,
            transcript_language = %transcript.language,
            translated = normalized.was_translated(),
            "pipeline finished"
        );

        Ok(Report {
            content_id: content_id.clone(),
            thumbnail_url: content_id.thumbnail_url(),
            transcript,
            normalized,
            summary,
        })
    }
}
