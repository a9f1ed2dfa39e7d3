use tracing::{debug, info};

use crate::{
    error::{KonspektError, Result},
    services::TranslationService,
    types::NormalizedText,
};

/// Code returned by detectors that could not make up their mind.
const UNDETERMINED: &str = "und";

/// Compare language codes, letting a bare primary subtag match any region
/// (`en` == `en-US`) while two explicit regions must agree (`zh-CN` != `zh-TW`).
pub fn same_language(a: &str, b: &str) -> bool {
    let a = a.trim().replace('_', "-").to_ascii_lowercase();
    let b = b.trim().replace('_', "-").to_ascii_lowercase();
    if a == b {
        return true;
    }
    match (a.split_once('-'), b.split_once('-')) {
        (Some((primary, _)), None) => primary == b,
        (None, Some((primary, _))) => primary == a,
        _ => false,
    }
}

/// Bring `text` into `target_language`.
///
/// The detector's verdict alone decides whether a translation happens; when it
/// already names the target the text is returned untouched and the translator
/// is never called.
pub async fn normalize(
    translator: &dyn TranslationService,
    text: &str,
    target_language: &str,
) -> Result<NormalizedText> {
    if text.trim().is_empty() {
        return Err(KonspektError::Detection {
            reason: "text is empty".to_string(),
        });
    }

    let detected = translator
        .detect_language(text)
        .await
        .map_err(|e| KonspektError::Detection {
            reason: format!("{} detection failed: {e}", translator.name()),
        })?;
    let detected = detected.trim();

    if detected.is_empty() || detected.eq_ignore_ascii_case(UNDETERMINED) {
        return Err(KonspektError::Detection {
            reason: format!("{} could not determine the language", translator.name()),
        });
    }

    if same_language(detected, target_language) {
        debug!(detected, target = target_language, "already in target language");
        return Ok(NormalizedText {
            text: text.to_string(),
            source_language: target_language.to_string(),
            target_language: target_language.to_string(),
        });
    }

    let translated = translator
        .translate(text, target_language)
        .await
        .map_err(|source| KonspektError::Translation {
            provider: translator.name(),
            source,
        })?;

    info!(
        from = detected,
        to = target_language,
        chars = translated.len(),
        "text translated"
    );

    Ok(NormalizedText {
        text: translated,
        source_language: detected.to_string(),
        target_language: target_language.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ServiceError;

    /// Treats text starting with "Bonjour" as French and translates by table lookup.
    #[derive(Default)]
    struct FakeTranslator {
        detections: AtomicUsize,
        translations: AtomicUsize,
        fail_detect: bool,
        fail_translate: bool,
        detect_as: Option<&'static str>,
    }

    #[async_trait]
    impl TranslationService for FakeTranslator {
        fn name(&self) -> &'static str {
            "Fake"
        }

        async fn detect_language(&self, text: &str) -> std::result::Result<String, ServiceError> {
            self.detections.fetch_add(1, Ordering::SeqCst);
            if self.fail_detect {
                return Err(ServiceError::Status {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            if let Some(code) = self.detect_as {
                return Ok(code.to_string());
            }
            Ok(if text.starts_with("Bonjour") { "fr" } else { "en" }.to_string())
        }

        async fn translate(
            &self,
            text: &str,
            _target_language: &str,
        ) -> std::result::Result<String, ServiceError> {
            self.translations.fetch_add(1, Ordering::SeqCst);
            if self.fail_translate {
                return Err(ServiceError::Status {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(text.replace("Bonjour le monde", "Hello world"))
        }
    }

    #[tokio::test]
    async fn text_in_target_language_is_not_translated() {
        let translator = FakeTranslator::default();

        let normalized = normalize(&translator, "Hello world this is a test", "en")
            .await
            .unwrap();

        assert_eq!(normalized.text, "Hello world this is a test");
        assert_eq!(normalized.source_language, "en");
        assert!(!normalized.was_translated());
        assert_eq!(translator.translations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn foreign_text_is_translated() {
        let translator = FakeTranslator::default();

        let normalized = normalize(&translator, "Bonjour le monde", "en")
            .await
            .unwrap();

        assert_eq!(normalized.text, "Hello world");
        assert_eq!(normalized.source_language, "fr");
        assert_eq!(normalized.target_language, "en");
        assert!(normalized.was_translated());
        assert_eq!(translator.translations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn normalizing_twice_is_a_no_op() {
        let translator = FakeTranslator::default();

        let first = normalize(&translator, "Bonjour le monde", "en")
            .await
            .unwrap();
        let second = normalize(&translator, &first.text, "en").await.unwrap();

        assert_eq!(second.text, first.text);
        assert_eq!(translator.translations.load(Ordering::SeqCst), 1);
        assert_eq!(translator.detections.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn regional_detection_matches_bare_target() {
        let translator = FakeTranslator {
            detect_as: Some("en-US"),
            ..Default::default()
        };

        normalize(&translator, "Howdy", "en").await.unwrap();
        assert_eq!(translator.translations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_text_fails_detection_without_calling_service() {
        let translator = FakeTranslator::default();

        let err = normalize(&translator, "   ", "en").await.unwrap_err();

        assert!(matches!(err, KonspektError::Detection { .. }));
        assert_eq!(translator.detections.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn undetermined_language_is_a_detection_error() {
        let translator = FakeTranslator {
            detect_as: Some("und"),
            ..Default::default()
        };

        let err = normalize(&translator, "???", "en").await.unwrap_err();
        assert!(matches!(err, KonspektError::Detection { .. }));
    }

    #[tokio::test]
    async fn unreachable_detector_is_a_detection_error() {
        let translator = FakeTranslator {
            fail_detect: true,
            ..Default::default()
        };

        let err = normalize(&translator, "Bonjour le monde", "en")
            .await
            .unwrap_err();

        match err {
            KonspektError::Detection { reason } => assert!(reason.contains("503")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(translator.detections.load(Ordering::SeqCst), 1);
        assert_eq!(translator.translations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn translation_failure_propagates_cause() {
        let translator = FakeTranslator {
            fail_translate: true,
            ..Default::default()
        };

        let err = normalize(&translator, "Bonjour le monde", "en")
            .await
            .unwrap_err();

        match err {
            KonspektError::Translation { provider, source } => {
                assert_eq!(provider, "Fake");
                assert!(matches!(source, ServiceError::Status { status: 503, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn language_code_comparison() {
        assert!(same_language("en", "EN"));
        assert!(same_language("en", "en-US"));
        assert!(same_language("pt_BR", "pt-br"));
        assert!(!same_language("zh-CN", "zh-TW"));
        assert!(!same_language("en", "de"));
    }
}
