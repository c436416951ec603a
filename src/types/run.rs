use std::sync::Arc;

use crate::types::agent::AgentDefinition;
use crate::types::context::ContextVariables;
use crate::types::messages::Message;

/// Inputs for one orchestration run.
///
/// Use the builder-style methods for the optional fields:
///
/// ```
/// use std::sync::Arc;
/// use swarm_rs::{AgentDefinition, Message, RunRequest};
///
/// let agent = Arc::new(AgentDefinition::new("helper", "You are helpful."));
/// let request = RunRequest::new(agent, vec![Message::user("hi")])
///     .with_max_turns(5);
/// assert_eq!(request.max_turns, Some(5));
/// assert!(request.execute_tools);
/// ```
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Agent active at the start of the run.
    pub agent: Arc<AgentDefinition>,

    /// Caller-supplied message history; must be non-empty.
    pub messages: Vec<Message>,

    /// Initial shared context.
    pub context_variables: ContextVariables,

    /// Model used for the whole run instead of each agent's own.
    pub model_override: Option<String>,

    /// Maximum loop iterations; `None` runs until the model stops
    /// requesting tools.
    pub max_turns: Option<u32>,

    /// When false, the run ends after the first completion even if it
    /// requested tool calls.
    pub execute_tools: bool,
}

impl RunRequest {
    pub fn new(agent: Arc<AgentDefinition>, messages: Vec<Message>) -> Self {
        Self {
            agent,
            messages,
            context_variables: ContextVariables::new(),
            model_override: None,
            max_turns: None,
            execute_tools: true,
        }
    }

    #[must_use]
    pub fn with_context_variables(mut self, context_variables: ContextVariables) -> Self {
        self.context_variables = context_variables;
        self
    }

    #[must_use]
    pub fn with_model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    #[must_use]
    pub fn with_execute_tools(mut self, execute_tools: bool) -> Self {
        self.execute_tools = execute_tools;
        self
    }
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Messages appended during this run, excluding the caller's initial
    /// history.
    pub messages: Vec<Message>,

    /// Agent active when the run ended (differs from the starting agent
    /// after a handoff).
    pub agent: Arc<AgentDefinition>,

    /// Shared context after all tool-batch merges.
    pub context_variables: ContextVariables,
}
