use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single chat message in a run transcript.
///
/// `name` is attribution for downstream consumers of the transcript (the
/// active agent's name on assistant messages, the tool's name on tool
/// messages). Provider APIs restrict the character set of name fields, so
/// names are sanitized before transmission; see [`Message::sanitized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Tool invocations requested by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// A tool-role message answering the tool call with the given id.
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::new(Role::Tool, content)
        }
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Copy of this message with `name` reduced to `[A-Za-z0-9_-]`.
    ///
    /// Provider APIs reject other characters in name fields; anything else
    /// becomes an underscore.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut msg = self.clone();
        if let Some(name) = &msg.name {
            msg.name = Some(sanitize_name(name));
        }
        msg
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Opaque provider-issued id, echoed back on the tool-role reply.
    pub id: String,

    #[serde(rename = "type", default = "function_call_type")]
    pub call_type: String,

    pub function: FunctionCall,
}

fn function_call_type() -> String {
    "function".into()
}

/// The function half of a tool call: name plus raw serialized arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,

    /// Raw JSON object text as produced by the model; parsed at execution time.
    #[serde(default)]
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: function_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_disallowed_characters() {
        let msg = Message::assistant("hi").with_name("Triage Agent #1");
        assert_eq!(msg.sanitized().name.as_deref(), Some("Triage_Agent__1"));
    }

    #[test]
    fn sanitize_keeps_allowed_characters() {
        let msg = Message::assistant("hi").with_name("agent_B-2");
        assert_eq!(msg.sanitized().name.as_deref(), Some("agent_B-2"));
    }

    #[test]
    fn serialize_omits_empty_optional_fields() {
        let json = serde_json::to_value(Message::user("hello")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "content": "hello"})
        );
    }

    #[test]
    fn deserialize_assistant_with_tool_calls() {
        let raw = serde_json::json!({
            "role": "assistant",
            "content": "",
            "tool_calls": [
                {"id": "call_1", "type": "function",
                 "function": {"name": "lookup", "arguments": "{\"city\":\"SF\"}"}}
            ]
        });
        let msg: Message = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.tool_calls.len(), 1);
        assert_eq!(msg.tool_calls[0].function.name, "lookup");
    }

    #[test]
    fn tool_message_carries_call_id() {
        let msg = Message::tool("ok", "call_9");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_9"));
    }
}
