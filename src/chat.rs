use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;

/// Instruction prepended to a message when LaTeX math formatting is wanted.
pub const LATEX_HINT: &str = "Please format any mathematical expressions, equations, or physics \
formulas using LaTeX notation enclosed in $ symbols. For example, use $F = ma$ for Newton's \
second law. Here's the question: ";

const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f64 = 0.96;
const TOP_P: f64 = 0.9;
const TOP_K: u32 = 0;
const REPETITION_PENALTY: f64 = 1.05;
const MIN_P: f64 = 0.0;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One message of the completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// JSON body of a chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub repetition_penalty: f64,
    pub min_p: f64,
}

/// Errors from the chat client. All of them are recoverable; the UI renders
/// them inline in the transcript.
#[derive(Debug)]
pub enum ChatError {
    /// Empty user input; no request is issued.
    EmptyMessage,
    /// No bearer token configured; no request is issued.
    MissingApiKey,
    /// The endpoint answered with a non-200 status.
    Status(u16),
    /// Connection, DNS, or timeout failure.
    Transport(String),
    /// The response body did not have the expected shape.
    BadResponse(String),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::EmptyMessage => write!(f, "please enter a message"),
            ChatError::MissingApiKey => write!(
                f,
                "no API key configured; set ENGLAB_API_KEY or the [api] section of config.toml"
            ),
            ChatError::Status(code) => {
                write!(f, "error {code}: unable to communicate with the AI service")
            }
            ChatError::Transport(msg) => write!(f, "network error: {msg}"),
            ChatError::BadResponse(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

/// Blocking client for the remote chat completion endpoint. Cloneable so a
/// worker thread can own a copy while the UI keeps the original.
#[derive(Clone)]
pub struct ChatClient {
    endpoint: String,
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

impl ChatClient {
    pub fn new(api: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build();
        Self {
            endpoint: api.endpoint.clone(),
            api_key: api.api_key.clone(),
            model: api.model.clone(),
            agent,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Builds the request body for a user message. Rejects empty input before
    /// any network activity.
    pub fn build_request(&self, message: &str, latex_hint: bool) -> Result<ChatRequest, ChatError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let content = if latex_hint {
            format!("{LATEX_HINT}{trimmed}")
        } else {
            trimmed.to_string()
        };
        Ok(ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            repetition_penalty: REPETITION_PENALTY,
            min_p: MIN_P,
        })
    }

    /// Sends a user message and returns the first completion's content.
    pub fn send(&self, message: &str, latex_hint: bool) -> Result<String, ChatError> {
        let request = self.build_request(message, latex_hint)?;
        if !self.has_api_key() {
            return Err(ChatError::MissingApiKey);
        }
        log::info!("chat request to {} (model {})", self.endpoint, self.model);
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(&request);
        match response {
            Ok(resp) => {
                let body: serde_json::Value = resp
                    .into_json()
                    .map_err(|e| ChatError::BadResponse(e.to_string()))?;
                extract_reply(&body)
            }
            Err(ureq::Error::Status(code, _)) => {
                log::warn!("chat endpoint returned status {code}");
                Err(ChatError::Status(code))
            }
            Err(other) => Err(ChatError::Transport(other.to_string())),
        }
    }
}

/// Pulls `choices[0].message.content` out of a completion response body.
pub fn extract_reply(body: &serde_json::Value) -> Result<String, ChatError> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| ChatError::BadResponse("missing choices[0].message.content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ChatClient {
        ChatClient::new(&ApiConfig {
            endpoint: "https://example.invalid/v1/chat/completions".into(),
            api_key: "sk-test".into(),
            model: "test-model".into(),
        })
    }

    #[test]
    fn empty_message_is_rejected_before_any_request() {
        assert!(matches!(
            client().build_request("   ", true),
            Err(ChatError::EmptyMessage)
        ));
    }

    #[test]
    fn latex_hint_prepends_instruction() {
        let req = client().build_request("what is F = ma?", true).unwrap();
        assert!(req.messages[0].content.starts_with(LATEX_HINT));
        assert!(req.messages[0].content.ends_with("what is F = ma?"));
        let plain = client().build_request("hello", false).unwrap();
        assert_eq!(plain.messages[0].content, "hello");
    }

    #[test]
    fn request_payload_carries_fixed_sampling_parameters() {
        let req = client().build_request("hi", false).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["temperature"], 0.96);
        assert_eq!(json["top_p"], 0.9);
        assert_eq!(json["top_k"], 0);
        assert_eq!(json["repetition_penalty"], 1.05);
        assert_eq!(json["min_p"], 0.0);
    }

    #[test]
    fn extract_reply_happy_path() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hello there"}}]
        });
        assert_eq!(extract_reply(&body).unwrap(), "hello there");
    }

    #[test]
    fn malformed_body_degrades_to_error() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({"choices": []}),
            serde_json::json!({"choices": [{"message": {}}]}),
            serde_json::json!({"choices": [{"message": {"content": 42}}]}),
        ] {
            assert!(matches!(
                extract_reply(&body),
                Err(ChatError::BadResponse(_))
            ));
        }
    }

    #[test]
    fn missing_api_key_blocks_send() {
        let client = ChatClient::new(&ApiConfig {
            api_key: String::new(),
            ..ApiConfig::default()
        });
        assert!(matches!(
            client.send("hello", false),
            Err(ChatError::MissingApiKey)
        ));
    }
}
