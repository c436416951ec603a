pub mod agent;
pub mod context;
pub mod messages;
pub mod run;

// Re-exports for convenience.
pub use agent::{instructions_fn, AgentDefinition, Instructions, InstructionsFn, DEFAULT_MODEL};
pub use context::ContextVariables;
pub use messages::{FunctionCall, Message, Role, ToolCall};
pub use run::{RunRequest, RunResult};
