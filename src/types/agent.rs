use std::fmt;
use std::sync::Arc;

use crate::tool::Tool;
use crate::types::context::ContextVariables;

/// Model used when an agent doesn't name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// System-prompt source for an agent: a fixed string or a function of the
/// shared context, re-rendered at the start of every turn.
#[derive(Clone)]
pub enum Instructions {
    Text(String),
    Render(InstructionsFn),
}

/// Renders an agent's system prompt from the live shared context.
pub type InstructionsFn = Arc<dyn Fn(&ContextVariables) -> String + Send + Sync>;

impl Instructions {
    pub fn render(&self, context: &ContextVariables) -> String {
        match self {
            Instructions::Text(text) => text.clone(),
            Instructions::Render(f) => f(context),
        }
    }
}

impl From<&str> for Instructions {
    fn from(text: &str) -> Self {
        Instructions::Text(text.to_string())
    }
}

impl From<String> for Instructions {
    fn from(text: String) -> Self {
        Instructions::Text(text)
    }
}

/// Helper to create context-dependent instructions from a closure.
pub fn instructions_fn<F>(f: F) -> Instructions
where
    F: Fn(&ContextVariables) -> String + Send + Sync + 'static,
{
    Instructions::Render(Arc::new(f))
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instructions::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Instructions::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// A named persona the orchestrator can be active under.
///
/// Agents are built up front and never mutated during a run; a handoff
/// installs a *different* `Arc<AgentDefinition>`, so concurrent runs may
/// safely share the same instances.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    /// Unique within a run; used for transcript attribution.
    pub name: String,

    pub instructions: Instructions,

    /// Tools the model may call. Names must be unique within the agent;
    /// duplicates surface as `InvalidArgument` when the agent becomes active.
    pub tools: Vec<Arc<Tool>>,

    pub model: String,

    /// Tool-invocation policy sent with the completion request.
    pub tool_choice: String,

    pub parallel_tool_calls: u32,
}

impl AgentDefinition {
    pub fn new(name: impl Into<String>, instructions: impl Into<Instructions>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            model: DEFAULT_MODEL.into(),
            tool_choice: "auto".into(),
            parallel_tool_calls: 1,
        }
    }

    #[must_use]
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    #[must_use]
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Tool>) -> Self {
        self.tools.extend(tools.into_iter().map(Arc::new));
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_tool_choice(mut self, tool_choice: impl Into<String>) -> Self {
        self.tool_choice = tool_choice.into();
        self
    }

    #[must_use]
    pub fn with_parallel_tool_calls(mut self, n: u32) -> Self {
        self.parallel_tool_calls = n;
        self
    }
}
