use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::agent::AgentDefinition;
use crate::types::context::ContextVariables;

/// Reserved parameter name through which the orchestrator injects the live
/// shared context. Never advertised to the model and never accepted from it.
pub const CONTEXT_VARIABLES: &str = "context_variables";

/// A declared tool parameter.
///
/// Tools declare their parameters explicitly at registration time rather than
/// having them inferred from a function signature; every parameter is
/// advertised to the model as type "string".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParam {
    pub name: String,
    /// Required means the parameter has no default the tool can fall back on.
    pub required: bool,
}

impl ToolParam {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }

    /// The reserved shared-context parameter.
    pub fn context() -> Self {
        Self::required(CONTEXT_VARIABLES)
    }
}

/// Arguments passed to a tool handler: the model-supplied values keyed by
/// parameter name, with the shared context injected under
/// [`CONTEXT_VARIABLES`] when the tool declares it.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub(crate) fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String value of an argument, if present and a string.
    pub fn str_arg(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// The injected shared context, empty if the tool doesn't declare it.
    pub fn context_variables(&self) -> ContextVariables {
        match self.values.get(CONTEXT_VARIABLES) {
            Some(Value::Object(map)) => map.clone().into(),
            _ => ContextVariables::new(),
        }
    }
}

/// Async handler for a tool invocation.
pub type ToolHandler =
    Arc<dyn Fn(ToolArguments) -> Pin<Box<dyn Future<Output = ToolOutput> + Send>> + Send + Sync>;

/// A host-side function exposed to the model via a generated schema.
pub struct Tool {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParam>,
    pub handler: ToolHandler,
}

impl Tool {
    /// Whether this tool declares the reserved shared-context parameter.
    pub fn takes_context(&self) -> bool {
        self.parameters.iter().any(|p| p.name == CONTEXT_VARIABLES)
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Create a Tool with a typed async handler.
pub fn new_tool<F, Fut, O>(
    name: impl Into<String>,
    description: impl Into<String>,
    parameters: Vec<ToolParam>,
    handler: F,
) -> Tool
where
    F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: Into<ToolOutput>,
{
    Tool {
        name: name.into(),
        description: description.into(),
        parameters,
        handler: Arc::new(move |args| {
            let fut = handler(args);
            Box::pin(async move { fut.await.into() })
        }),
    }
}

/// Raw return value of a tool, before normalization.
///
/// A tagged union instead of runtime shape probing: the normalizer matches
/// on the variant to build the uniform [`ToolResult`] envelope.
#[derive(Debug, Clone)]
pub enum ToolOutput {
    /// Plain text reply.
    Text(String),
    /// Arbitrary JSON value, coerced to its string form.
    Json(Value),
    /// Already-normalized result.
    Result(ToolResult),
    /// Hand control to a different agent.
    Handoff(Arc<AgentDefinition>),
}

impl ToolOutput {
    pub fn handoff(agent: Arc<AgentDefinition>) -> Self {
        ToolOutput::Handoff(agent)
    }

    /// Map this raw value into the uniform result envelope.
    ///
    /// A handoff serializes as a marker naming the target agent so the model
    /// sees who it is now talking through. `Json(Null)` carries no coercible
    /// value and is rejected as a type mismatch.
    pub fn normalize(self, tool: &str) -> Result<ToolResult> {
        match self {
            ToolOutput::Text(value) => Ok(ToolResult::new(value)),
            ToolOutput::Json(Value::Null) => Err(Error::TypeMismatch { tool: tool.into() }),
            ToolOutput::Json(Value::String(value)) => Ok(ToolResult::new(value)),
            ToolOutput::Json(value) => Ok(ToolResult::new(value.to_string())),
            ToolOutput::Result(result) => Ok(result),
            ToolOutput::Handoff(agent) => {
                let marker = serde_json::json!({ "assistant": agent.name }).to_string();
                Ok(ToolResult::new(marker).with_agent(agent))
            }
        }
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        ToolOutput::Text(value)
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        ToolOutput::Text(value.to_string())
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        ToolOutput::Json(value)
    }
}

impl From<ToolResult> for ToolOutput {
    fn from(result: ToolResult) -> Self {
        ToolOutput::Result(result)
    }
}

impl From<Arc<AgentDefinition>> for ToolOutput {
    fn from(agent: Arc<AgentDefinition>) -> Self {
        ToolOutput::Handoff(agent)
    }
}

/// Uniform result of one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolResult {
    /// Content of the tool-role message appended to the transcript.
    pub value: String,
    /// Agent to hand control to, if any.
    pub agent: Option<Arc<AgentDefinition>>,
    /// Updates merged into the shared context after the batch.
    pub context_variables: ContextVariables,
}

impl ToolResult {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            agent: None,
            context_variables: ContextVariables::new(),
        }
    }

    #[must_use]
    pub fn with_agent(mut self, agent: Arc<AgentDefinition>) -> Self {
        self.agent = Some(agent);
        self
    }

    #[must_use]
    pub fn with_context_variables(mut self, context_variables: ContextVariables) -> Self {
        self.context_variables = context_variables;
        self
    }
}
