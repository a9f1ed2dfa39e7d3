use tracing::{debug, info, warn};

use crate::{
    error::{KonspektError, Result},
    services::TranscriptService,
    types::{AttemptOutcome, LanguageAttempt, Transcript, TranscriptRequest},
};

/// Fetch the transcript in the first preferred language that has one.
///
/// Languages are tried strictly in order and nothing after the first hit is
/// requested. A failure for one language only moves on to the next; when the
/// list is exhausted the error carries every attempt with its reason. On
/// success the transcript keeps the attempts that led to it.
pub async fn acquire(
    service: &dyn TranscriptService,
    request: &TranscriptRequest,
) -> Result<Transcript> {
    let content_id = &request.content_id;
    let mut attempts = Vec::with_capacity(request.language_preferences.len());

    for language in &request.language_preferences {
        debug!(%content_id, language = %language, "fetching transcript");

        let outcome = match service.fetch_transcript(content_id, language).await {
            Ok(segments) => {
                let mut transcript = Transcript::from_segments(language.as_str(), segments);
                if transcript.text.trim().is_empty() {
                    AttemptOutcome::Failed {
                        reason: "transcript is empty".to_string(),
                    }
                } else {
                    info!(
                        %content_id,
                        language = %language,
                        segments = transcript.segments.len(),
                        "transcript acquired"
                    );
                    attempts.push(LanguageAttempt {
                        language: language.clone(),
                        outcome: AttemptOutcome::Found {
                            segments: transcript.segments.len(),
                        },
                    });
                    transcript.attempts = attempts;
                    return Ok(transcript);
                }
            }
            Err(e) => AttemptOutcome::Failed {
                reason: e.to_string(),
            },
        };

        if let AttemptOutcome::Failed { reason } = &outcome {
            warn!(
                %content_id,
                language = %language,
                reason = %reason,
                "no transcript, trying next language"
            );
        }
        attempts.push(LanguageAttempt {
            language: language.clone(),
            outcome,
        });
    }

    Err(KonspektError::NoTranscriptAvailable {
        content_id: content_id.to_string(),
        attempts,
    })
}
