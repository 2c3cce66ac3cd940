use crate::errors::TranslationError;

/// Translate one string into `language`. One best-effort call, no retries.
#[allow(async_fn_in_trait)]
pub trait Translator {
    async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError>;
}

/// What a missing key ends up holding.
#[derive(Debug)]
pub enum Translation {
    Translated(String),
    /// The reference text, kept because the service failed.
    Fallback { text: String, reason: TranslationError },
}

impl Translation {
    pub async fn resolve<T: Translator>(translator: &T, text: &str, language: &str) -> Self {
        match translator.translate(text, language).await {
            Ok(tx) => Translation::Translated(tx),
            Err(reason) => Translation::Fallback { text: text.to_string(), reason },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Translation::Fallback { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            Translation::Translated(text) | Translation::Fallback { text, .. } => text,
        }
    }
}
