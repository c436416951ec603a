use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::messages::Message;

/// A chat-completion provider client.
///
/// The orchestrator treats a completion as a single awaited operation that
/// either returns a response or fails; retries, timeouts, and authentication
/// are the implementation's concern. Streaming is not interpreted here — an
/// implementation backed by a streaming API must buffer to a full response.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// A non-streaming chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,

    pub messages: Vec<Message>,

    /// Translated tool schemas; omitted entirely when the agent has no tools.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<u32>,

    pub stream: bool,
}

/// A chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,

    /// Provider fields we don't explicitly model.
    #[serde(flatten)]
    pub extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: Message,

    #[serde(flatten)]
    pub extra: Value,
}

impl CompletionResponse {
    /// Wrap a single assistant message, for tests and simple clients.
    pub fn from_message(message: Message) -> Self {
        Self {
            choices: vec![Choice {
                message,
                extra: empty_object(),
            }],
            extra: empty_object(),
        }
    }

    /// The first candidate's message, or `EmptyCompletion` if there is none.
    pub fn into_message(self) -> Result<Message> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or(Error::EmptyCompletion)
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::messages::{Role, ToolCall};

    #[test]
    fn request_omits_tool_fields_when_absent() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![Message::user("hi")],
            tools: None,
            tool_choice: None,
            parallel_tool_calls: None,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("tool_choice").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn response_parses_provider_payload() {
        let raw = serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [
                        {"id": "call_1", "type": "function",
                         "function": {"name": "lookup", "arguments": "{}"}}
                    ]
                }
            }]
        });
        let response: CompletionResponse = serde_json::from_value(raw).unwrap();
        let message = response.into_message().unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(
            message.tool_calls,
            vec![ToolCall::new("call_1", "lookup", "{}")]
        );
    }

    #[test]
    fn empty_choices_is_an_error() {
        let response = CompletionResponse {
            choices: vec![],
            extra: Value::Null,
        };
        assert!(matches!(response.into_message(), Err(Error::EmptyCompletion)));
    }
}
