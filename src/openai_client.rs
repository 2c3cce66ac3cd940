use crate::errors::TranslationError;
use crate::placeholders;
use crate::translator::Translator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Clone)]
pub struct OpenAiTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    source_language: String,
}

impl OpenAiTranslator {
    pub fn new(
        api_key: String,
        model: String,
        source_language: String,
        endpoint: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TranslationError> {
        let mut builder =
            Client::builder().user_agent(concat!("fillang/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.unwrap_or_else(|| CHAT_COMPLETIONS_URL.to_string()),
            api_key,
            model,
            source_language,
        })
    }

    fn system_prompt(&self, language: &str, required_placeholders: &[String]) -> String {
        let mut system = format!(
            concat!(
                "You are a professional localization engine.\n",
                "- Translate from {} to {}.\n",
                "- Preserve placeholders unchanged (verbatim), e.g. {{{{like_this}}}}, {{like_this}}, :named, %s.\n",
                "- Output MUST be only the translated text: no quotes, no code fences, no labels, no explanations.\n",
            ),
            self.source_language, language,
        );
        if !required_placeholders.is_empty() {
            system.push_str(&format!(
                "- Required placeholders (must appear verbatim): {}\n",
                required_placeholders.join(", ")
            ));
        }
        system
    }
}

impl Translator for OpenAiTranslator {
    async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError> {
        let required = placeholders::extract(text);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: self.system_prompt(language, &required),
                },
                ChatMessage { role: "user".into(), content: text.to_string() },
            ],
            temperature: 1.0,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslationError::Status { status: status.as_u16(), body });
        }
        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| TranslationError::Malformed(e.to_string()))?;
        let raw = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        decode(text, &raw)
    }
}

fn decode(reference: &str, raw: &str) -> Result<String, TranslationError> {
    let reply = sanitize(raw).ok_or(TranslationError::Empty)?;
    placeholders::verify(reference, &reply)
}

/// First non-empty line with one pair of surrounding quotes stripped.
fn sanitize(raw: &str) -> Option<String> {
    let mut first_line = raw.lines().find(|l| !l.trim().is_empty())?.trim().to_string();
    for (lq, rq) in [("\"", "\""), ("“", "”"), ("'", "'")] {
        if first_line.starts_with(lq)
            && first_line.ends_with(rq)
            && first_line.len() >= lq.len() + rq.len()
        {
            first_line = first_line[lq.len()..first_line.len() - rq.len()].trim().to_string();
        }
    }
    if first_line.is_empty() { None } else { Some(first_line) }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
