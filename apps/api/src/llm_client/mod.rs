/// LLM Client — the single point of entry for completion calls in Dub News.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// All LLM interactions MUST go through `CompletionService`.
///
/// Model: gpt-4o (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod credential;

pub use credential::ApiKey;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all completion calls.
pub const MODEL: &str = "gpt-4o";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The completion capability the generation pipeline depends on.
///
/// Carried in `AppState` as `Arc<dyn CompletionService>`. One call, no retries:
/// a failure surfaces to the caller immediately.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends `system` + `user` and returns the raw text of the first choice.
    /// `json_mode` asks the provider to constrain output to a JSON object.
    async fn complete(
        &self,
        api_key: &ApiKey,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text content of the first choice, if non-empty.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Chat completions client for an OpenAI-compatible endpoint.
/// Holds no credential: the caller's key is passed with every call.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_url: api_url.into(),
        })
    }

    /// Makes a single call to the chat completions API, returning the full response object.
    pub async fn call(
        &self,
        api_key: &ApiKey,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = build_request(system, user, json_mode);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key.expose())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: provider_error_message(body),
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(
        &self,
        api_key: &ApiKey,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let response = self.call(api_key, system, user, json_mode).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_request<'a>(system: &'a str, user: &'a str, json_mode: bool) -> ChatRequest<'a> {
    ChatRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
        response_format: json_mode.then_some(ResponseFormat {
            format_type: "json_object",
        }),
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn provider_error_message(body: String) -> String {
    serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_sets_response_format() {
        let value = serde_json::to_value(build_request("sys", "user", true)).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "user");
    }

    #[test]
    fn test_plain_mode_omits_response_format() {
        let value = serde_json::to_value(build_request("sys", "user", false)).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn test_provider_error_message_extracted() {
        let body = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}}"#;
        assert_eq!(
            provider_error_message(body.to_string()),
            "You exceeded your current quota"
        );
    }

    #[test]
    fn test_provider_error_message_falls_back_to_body() {
        assert_eq!(provider_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_chat_response_text_skips_blank_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "  "}}], "usage": null}"#,
        )
        .unwrap();
        assert!(response.text().is_none());

        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "{\"headline\": \"A\"}"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5}}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("{\"headline\": \"A\"}"));
    }
}
