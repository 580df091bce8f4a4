//! Fact-checking summaries.
//!
//! [`Summarizer::summarize`] never fails. A missing credential or any error
//! along the way is reported as a human-readable placeholder in place of the
//! summary, so the prediction is still shown.

use std::sync::Arc;

use crate::config::SummaryConfig;
use crate::error::Result;
use crate::summary::generator::{ChatMessage, TextGenerator};
use crate::summary::openai::OpenAIChatClient;

/// Returned when no API key is configured.
pub const MISSING_API_KEY_PLACEHOLDER: &str =
    "No hay API key de OpenAI configurada. Para generar resumen activa OPENAI_API_KEY.";

/// System message framing the model as a fact-checker.
pub const SYSTEM_PROMPT: &str = "Eres un experto en verificación de información y periodismo.";

const INSTRUCTION: &str = "Resume la siguiente noticia en 2-3 frases en español. \
Luego, en 1 frase, indica si observas señales de manipulación \
(ej: falta de fuentes, lenguaje emocional, afirmaciones extraordinarias) y por qué.";

/// The user prompt for `raw_text`.
pub fn build_prompt(raw_text: &str) -> String {
    format!("{INSTRUCTION}\n\nNOTICIA:\n{raw_text}\n\nRESPUESTA:")
}

/// Placeholder shown when generation fails.
pub fn error_placeholder(reason: &str) -> String {
    format!("⚠️ Error generando resumen: {reason}")
}

/// Requests summaries from a text generator, if one is configured.
#[derive(Clone, Default)]
pub struct Summarizer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .finish()
    }
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A summarizer without credentials; always returns the placeholder.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    /// Build the OpenAI-backed summarizer, or a disabled one without a key.
    pub fn from_config(config: &SummaryConfig) -> Result<Self> {
        if !config.has_api_key() {
            log::warn!("OPENAI_API_KEY is not set; summaries are disabled");
            return Ok(Self::disabled());
        }
        let client = OpenAIChatClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize `raw_text` and flag manipulation signals.
    pub async fn summarize(&self, raw_text: &str) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_API_KEY_PLACEHOLDER.to_string();
        };

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(raw_text)),
        ];

        match generator.generate(&messages).await {
            Ok(summary) => summary.trim().to_string(),
            Err(e) => {
                log::warn!("summary request via {} failed: {e}", generator.name());
                error_placeholder(&e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::VerazError;
    use crate::summary::generator::ChatRole;

    struct Recording {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl TextGenerator for Recording {
        async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            self.reply.clone().map_err(VerazError::other)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("El cielo es verde.");
        assert!(prompt.starts_with("Resume la siguiente noticia en 2-3 frases en español."));
        assert!(prompt.contains("falta de fuentes, lenguaje emocional, afirmaciones extraordinarias"));
        assert!(prompt.ends_with("NOTICIA:\nEl cielo es verde.\n\nRESPUESTA:"));
    }

    #[tokio::test]
    async fn test_disabled_returns_placeholder() {
        let summary = Summarizer::disabled().summarize("texto").await;
        assert_eq!(summary, MISSING_API_KEY_PLACEHOLDER);

        let summarizer = Summarizer::from_config(&SummaryConfig::default()).unwrap();
        assert!(!summarizer.is_enabled());
    }

    #[tokio::test]
    async fn test_reply_is_trimmed_and_prompt_sent() {
        let generator = Arc::new(Recording {
            reply: Ok("  Resumen breve.\n".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let summarizer = Summarizer::new(generator.clone());

        assert_eq!(summarizer.summarize("Noticia X").await, "Resumen breve.");

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, ChatRole::System);
        assert_eq!(seen[0].content, SYSTEM_PROMPT);
        assert!(seen[1].content.contains("NOTICIA:\nNoticia X"));
    }

    #[tokio::test]
    async fn test_failure_becomes_placeholder() {
        let summarizer = Summarizer::new(Arc::new(Recording {
            reply: Err("quota exceeded".to_string()),
            seen: Mutex::new(Vec::new()),
        }));

        let summary = summarizer.summarize("texto").await;
        assert!(summary.starts_with("⚠️ Error generando resumen: "));
        assert!(summary.contains("quota exceeded"));
    }
}
