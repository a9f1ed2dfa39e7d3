use crate::error::KonspektError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TranslationProvider {
    #[default]
    Google,
    Libre,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    /// Overrides `api_url` when set.
    pub url_env_var: Option<&'static str>,
    pub env_var: &'static str,
    pub key_required: bool,
}

impl TranslationProvider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            TranslationProvider::Google => ProviderConfig {
                api_url: "https://translation.googleapis.com/language/translate/v2",
                url_env_var: None,
                env_var: "GOOGLE_TRANSLATE_API_KEY",
                key_required: true,
            },
            TranslationProvider::Libre => ProviderConfig {
                api_url: "https://libretranslate.com",
                url_env_var: Some("LIBRETRANSLATE_URL"),
                env_var: "LIBRETRANSLATE_API_KEY",
                key_required: false,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TranslationProvider::Google => "Google",
            TranslationProvider::Libre => "LibreTranslate",
        }
    }

    /// Base URL, honoring the provider's override variable.
    pub fn base_url(&self) -> String {
        let config = self.config();
        config
            .url_env_var
            .and_then(|var| std::env::var(var).ok())
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| config.api_url.to_string())
    }

    /// Read the API key, failing early when the provider cannot work without one.
    pub fn validate_api_key(&self) -> Result<Option<String>, KonspektError> {
        let config = self.config();
        let key = std::env::var(config.env_var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        match key {
            None if config.key_required => Err(KonspektError::MissingApiKey {
                env_var: config.env_var,
            }),
            key => Ok(key),
        }
    }
}
