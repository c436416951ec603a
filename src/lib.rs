pub mod error;
pub mod provider;
pub mod schema;
pub mod swarm;
pub mod tool;
pub mod types;

// Re-export key types at crate root for ergonomic use.
pub use error::{Error, Result};
pub use types::{
    instructions_fn, AgentDefinition, ContextVariables, Instructions, Message, Role, RunRequest,
    RunResult, ToolCall,
};

// Re-export primary APIs.
pub use swarm::Swarm;

// Re-export the tool registration surface.
pub use tool::{new_tool, Tool, ToolArguments, ToolOutput, ToolParam, ToolResult, CONTEXT_VARIABLES};

// Re-export the provider seam.
pub use provider::{CompletionClient, CompletionRequest, CompletionResponse};

// Re-export the schema translator.
pub use schema::tool_schema;
