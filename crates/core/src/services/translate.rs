use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{KonspektError, ServiceError},
    provider::TranslationProvider,
    services::TranslationService,
};

/// Translation backend speaking either the Google v2 or the LibreTranslate REST dialect.
pub struct HttpTranslator {
    client: reqwest::Client,
    provider: TranslationProvider,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    /// Build a translator for `provider`, reading its key from the environment.
    pub fn from_env(provider: TranslationProvider) -> Result<Self, KonspektError> {
        let api_key = provider.validate_api_key()?;
        Ok(Self::new(provider, provider.base_url(), api_key))
    }

    pub fn new(provider: TranslationProvider, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    async fn post(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<serde_json::Value, ServiceError> {
        let mut request = self.client.post(self.endpoint(path)).json(body);
        if self.provider == TranslationProvider::Google {
            if let Some(key) = &self.api_key {
                request = request.query(&[("key", key)]);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl TranslationService for HttpTranslator {
    fn name(&self) -> &'static str {
        self.provider.name()
    }

    async fn detect_language(&self, text: &str) -> Result<String, ServiceError> {
        debug!(provider = self.name(), chars = text.len(), "detecting language");
        match self.provider {
            TranslationProvider::Google => {
                let response = self.post("detect", &GoogleQuery { q: text }).await?;
                parse_google_detection(response)
            }
            TranslationProvider::Libre => {
                let body = LibreDetectRequest {
                    q: text,
                    api_key: self.api_key.as_deref(),
                };
                let response = self.post("detect", &body).await?;
                parse_libre_detection(response)
            }
        }
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceError> {
        debug!(
            provider = self.name(),
            target = target_language,
            chars = text.len(),
            "translating"
        );
        match self.provider {
            TranslationProvider::Google => {
                let body = GoogleTranslateRequest {
                    q: text,
                    target: target_language,
                    format: "text",
                };
                // v2 translate lives at the API root
                let response = self.post("", &body).await?;
                parse_google_translation(response)
            }
            TranslationProvider::Libre => {
                let body = LibreTranslateRequest {
                    q: text,
                    source: "auto",
                    target: target_language,
                    format: "text",
                    api_key: self.api_key.as_deref(),
                };
                let response = self.post("translate", &body).await?;
                parse_libre_translation(response)
            }
        }
    }
}

#[derive(Serialize)]
struct GoogleQuery<'a> {
    q: &'a str,
}

#[derive(Serialize)]
struct GoogleTranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Serialize)]
struct LibreDetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct GoogleEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct GoogleDetections {
    detections: Vec<Vec<Detection>>,
}

#[derive(Deserialize)]
struct GoogleTranslations {
    translations: Vec<GoogleTranslation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

#[derive(Deserialize)]
struct Detection {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreTranslation {
    translated_text: String,
}

fn parse_google_detection(response: serde_json::Value) -> Result<String, ServiceError> {
    let envelope: GoogleEnvelope<GoogleDetections> = serde_json::from_value(response)?;
    envelope
        .data
        .detections
        .into_iter()
        .flatten()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| d.language)
        .ok_or_else(|| ServiceError::InvalidResponse("no detections returned".to_string()))
}

fn parse_libre_detection(response: serde_json::Value) -> Result<String, ServiceError> {
    let detections: Vec<Detection> = serde_json::from_value(response)?;
    detections
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| d.language)
        .ok_or_else(|| ServiceError::InvalidResponse("no detections returned".to_string()))
}

fn parse_google_translation(response: serde_json::Value) -> Result<String, ServiceError> {
    let envelope: GoogleEnvelope<GoogleTranslations> = serde_json::from_value(response)?;
    envelope
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| ServiceError::InvalidResponse("no translations returned".to_string()))
}

fn parse_libre_translation(response: serde_json::Value) -> Result<String, ServiceError> {
    let translation: LibreTranslation = serde_json::from_value(response)?;
    Ok(translation.translated_text)
}
