//! LLM client: the single point of entry for all OpenAI calls in the interview service.
//!
//! ARCHITECTURAL RULE: No other module may call the Chat Completions API directly.
//! Orchestration code depends on `ChatCompleter`, never on `LlmClient` itself,
//! so every pipeline can be exercised against a scripted completer in tests.
//!
//! Models are hardcoded per task (vision vs. chat). Do not make them configurable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Vision-capable model: portfolio analysis and company verification.
pub const VISION_MODEL: &str = "gpt-4o";
/// Text model: interview turns and company profile generation.
pub const CHAT_MODEL: &str = "gpt-4o-mini";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 180;

/// Phrases the model uses when it declines to look at the uploaded material.
const REFUSAL_MARKERS: [&str; 2] = ["i'm sorry", "i can't assist"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Message body: a plain string, or typed parts when images are attached.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(data_url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: data_url.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self::plain(ChatRole::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(ChatRole::User, text)
    }

    pub fn plain(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: ChatRole::User,
            content: MessageContent::Parts(parts),
        }
    }
}

#[cfg(test)]
impl ChatMessage {
    /// All text carried by this message, parts joined with newlines.
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn image_count(&self) -> usize {
        match &self.content {
            MessageContent::Text(_) => 0,
            MessageContent::Parts(parts) => parts
                .iter()
                .filter(|p| matches!(p, ContentPart::ImageUrl { .. }))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Text of the first choice plus the metadata callers branch on.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub finish_reason: Option<String>,
}

impl Completion {
    /// The provider's safety filter cut the answer.
    pub fn is_content_filtered(&self) -> bool {
        self.finish_reason.as_deref() == Some("content_filter")
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Seam between orchestration and the provider. `AppState` carries an
/// `Arc<dyn ChatCompleter>`; production uses `LlmClient`.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<Completion, LlmError>;
}

/// The single LLM client used by all services.
/// Wraps the Chat Completions API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            api_url,
        })
    }
}

#[async_trait]
impl ChatCompleter for LlmClient {
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    async fn complete(&self, request: ChatRequest) -> Result<Completion, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<OpenAiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: ChatCompletionResponse = response.json().await?;
            let choice = parsed
                .choices
                .into_iter()
                .next()
                .ok_or(LlmError::EmptyContent)?;

            if let Some(usage) = &parsed.usage {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                    request.model, usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(Completion {
                text: choice.message.content.unwrap_or_default(),
                finish_reason: choice.finish_reason,
            });
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Calls the model and deserializes the text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    llm: &dyn ChatCompleter,
    request: ChatRequest,
) -> Result<T, LlmError> {
    let completion = llm.complete(request).await?;
    if completion.text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }

    serde_json::from_str(strip_json_fences(&completion.text)).map_err(LlmError::Parse)
}

/// True when the model answered with a canned apology instead of doing the task.
pub fn is_refusal(text: &str) -> bool {
    let lowered = text.to_lowercase();
    REFUSAL_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Scripted stand-in for the provider, shared by the pipeline tests.
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    type Responder = dyn Fn(&ChatRequest) -> Result<Completion, LlmError> + Send + Sync;

    pub struct ScriptedCompleter {
        responder: Box<Responder>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedCompleter {
        pub fn new(
            responder: impl Fn(&ChatRequest) -> Result<Completion, LlmError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                responder: Box::new(responder),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Answers every request with the same text.
        pub fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::new(move |_| Ok(reply(&text)))
        }

        pub fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatCompleter for ScriptedCompleter {
        async fn complete(&self, request: ChatRequest) -> Result<Completion, LlmError> {
            let result = (self.responder)(&request);
            self.requests.lock().unwrap().push(request);
            result
        }
    }

    pub fn reply(text: &str) -> Completion {
        Completion {
            text: text.to_string(),
            finish_reason: Some("stop".to_string()),
        }
    }

    pub fn filtered() -> Completion {
        Completion {
            text: String::new(),
            finish_reason: Some("content_filter".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{reply, ScriptedCompleter};
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_is_refusal_is_case_insensitive() {
        assert!(is_refusal("I'm sorry, but I can't help with that."));
        assert!(is_refusal("Unfortunately I CAN'T ASSIST with this image."));
        assert!(!is_refusal("Hello :) Nice to meet you."));
    }

    #[test]
    fn test_image_parts_serialize_as_openai_content_array() {
        let message = ChatMessage::user_parts(vec![
            ContentPart::text("Analyze this"),
            ContentPart::image("data:image/png;base64,AAAA"),
        ]);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Analyze this");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(
            json["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(message.image_count(), 1);
    }

    #[test]
    fn test_plain_message_serializes_as_string_content() {
        let json = serde_json::to_value(ChatMessage::system("Be an interviewer")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "Be an interviewer");
    }

    #[test]
    fn test_completion_content_filter_detection() {
        let mut completion = reply("");
        assert!(!completion.is_content_filtered());
        completion.finish_reason = Some("content_filter".to_string());
        assert!(completion.is_content_filtered());
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        status: String,
    }

    #[tokio::test]
    async fn test_complete_json_strips_fences_and_parses() {
        let llm = ScriptedCompleter::replying("```json\n{\"status\": \"exists\"}\n```");
        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![ChatMessage::user("check")],
            max_tokens: 10,
            temperature: 0.0,
        };
        let probe: Probe = complete_json(&llm, request).await.unwrap();
        assert_eq!(probe.status, "exists");
    }

    #[tokio::test]
    async fn test_complete_json_rejects_blank_reply() {
        let llm = ScriptedCompleter::replying("   ");
        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![ChatMessage::user("check")],
            max_tokens: 10,
            temperature: 0.0,
        };
        let result = complete_json::<Probe>(&llm, request).await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }
}
