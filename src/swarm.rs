use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::provider::{CompletionClient, CompletionRequest};
use crate::schema::tool_schema;
use crate::tool::{Tool, ToolArguments, CONTEXT_VARIABLES};
use crate::types::agent::AgentDefinition;
use crate::types::context::ContextVariables;
use crate::types::messages::{Message, ToolCall};
use crate::types::run::{RunRequest, RunResult};

/// Drives the turn loop: completion, tool execution, context merge, handoff.
///
/// A `Swarm` holds only the provider client, so one instance can serve many
/// concurrent runs; each run owns its history and context, and agents are
/// shared read-only.
pub struct Swarm {
    client: Arc<dyn CompletionClient>,
}

impl Swarm {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Run the orchestration loop to completion.
    ///
    /// Each iteration requests a completion for the active agent, appends the
    /// assistant reply, then executes any requested tool calls in provider
    /// order: one tool-role message per call, context updates merged last
    /// writer wins, and the last handoff in the batch installs the next
    /// active agent. The loop ends when the model stops requesting tools,
    /// when `execute_tools` is off, or when `max_turns` is reached. With no
    /// `max_turns` bound the loop runs as long as the model keeps calling
    /// tools; callers bound it explicitly.
    ///
    /// Structural errors (`InvalidArgument`, `ParseError`, `TypeMismatch`)
    /// and provider failures abort the run. A call to an unregistered tool
    /// does not: it becomes an in-conversation error message the model can
    /// react to.
    pub async fn run(&self, request: RunRequest) -> Result<RunResult> {
        let RunRequest {
            agent,
            messages,
            context_variables,
            model_override,
            max_turns,
            execute_tools,
        } = request;

        let mut active_agent = agent;
        let mut context_variables = context_variables;
        let mut history = messages;
        let init_len = history.len();
        let mut turns_taken: u32 = 0;

        loop {
            if let Some(max) = max_turns {
                if turns_taken >= max {
                    debug!(turns_taken, "max turns reached");
                    break;
                }
            }

            let mut assistant = self
                .get_completion(
                    &active_agent,
                    &history,
                    &context_variables,
                    model_override.as_deref(),
                )
                .await?;
            assistant.name = Some(active_agent.name.clone());
            debug!(agent = %active_agent.name, tool_calls = assistant.tool_calls.len(), "received completion");

            let tool_calls = assistant.tool_calls.clone();
            history.push(assistant);

            if tool_calls.is_empty() || !execute_tools {
                debug!("ending turn");
                break;
            }

            let outcome = self
                .execute_tool_calls(&tool_calls, &active_agent, &context_variables)
                .await?;

            history.extend(outcome.messages);
            context_variables.merge(outcome.context_updates);
            if let Some(next) = outcome.handoff {
                debug!(from = %active_agent.name, to = %next.name, "agent handoff");
                active_agent = next;
            }

            turns_taken += 1;
        }

        Ok(RunResult {
            messages: history.split_off(init_len),
            agent: active_agent,
            context_variables,
        })
    }

    /// Build and send the completion request for one turn.
    async fn get_completion(
        &self,
        agent: &AgentDefinition,
        history: &[Message],
        context_variables: &ContextVariables,
        model_override: Option<&str>,
    ) -> Result<Message> {
        let instructions = agent.instructions.render(context_variables);

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(instructions));
        messages.extend(history.iter().map(Message::sanitized));

        let tools = translate_tools(agent)?;
        let request = CompletionRequest {
            model: model_override.unwrap_or(&agent.model).to_string(),
            messages,
            tool_choice: tools.as_ref().map(|_| agent.tool_choice.clone()),
            parallel_tool_calls: tools.as_ref().map(|_| agent.parallel_tool_calls),
            tools,
            stream: false,
        };

        debug!(agent = %agent.name, model = %request.model, "requesting completion");
        self.client.complete(request).await?.into_message()
    }

    /// Execute one batch of tool calls in the order the provider returned
    /// them. Request order, not completion order, decides the context merge
    /// and the handoff tie-break, which keeps batches deterministic.
    async fn execute_tool_calls(
        &self,
        calls: &[ToolCall],
        agent: &AgentDefinition,
        context_variables: &ContextVariables,
    ) -> Result<ToolBatchOutcome> {
        let tools: HashMap<&str, &Arc<Tool>> =
            agent.tools.iter().map(|t| (t.name.as_str(), t)).collect();

        let mut outcome = ToolBatchOutcome::default();

        for call in calls {
            let name = call.function.name.as_str();
            let Some(tool) = tools.get(name) else {
                warn!(tool = name, "tool not found");
                outcome.messages.push(
                    Message::tool(format!("Error: Tool {name} not found."), &call.id)
                        .with_name(name),
                );
                continue;
            };

            let mut args = parse_arguments(&call.function.arguments, name)?;
            if tool.takes_context() {
                // The live context always wins over anything model-supplied.
                args.insert(CONTEXT_VARIABLES, context_variables.as_value());
            }

            debug!(tool = name, id = %call.id, "executing tool call");
            let result = (tool.handler)(args).await.normalize(name)?;

            outcome
                .messages
                .push(Message::tool(result.value, &call.id).with_name(name));
            outcome.context_updates.merge(result.context_variables);
            if let Some(next) = result.agent {
                outcome.handoff = Some(next);
            }
        }

        Ok(outcome)
    }
}

/// What one tool-call batch produced.
#[derive(Default)]
struct ToolBatchOutcome {
    messages: Vec<Message>,
    context_updates: ContextVariables,
    /// Last handoff processed in the batch, if any.
    handoff: Option<Arc<AgentDefinition>>,
}

/// Schemas for the agent's tools, or `None` so the field is left off the
/// request entirely when the agent has none.
fn translate_tools(agent: &AgentDefinition) -> Result<Option<Vec<Value>>> {
    if agent.tools.is_empty() {
        return Ok(None);
    }

    let mut seen = std::collections::HashSet::new();
    let mut schemas = Vec::with_capacity(agent.tools.len());
    for tool in &agent.tools {
        if !seen.insert(tool.name.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "agent {} has duplicate tool name {}",
                agent.name, tool.name
            )));
        }
        schemas.push(tool_schema(tool)?);
    }
    Ok(Some(schemas))
}

fn parse_arguments(raw: &str, tool: &str) -> Result<ToolArguments> {
    let values: serde_json::Map<String, Value> =
        serde_json::from_str(raw).map_err(|source| Error::ParseError {
            tool: tool.to_string(),
            source,
        })?;
    Ok(ToolArguments::new(values))
}
