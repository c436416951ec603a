/// All errors that can occur while running a swarm.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid tool or agent configuration: {0}")]
    InvalidArgument(String),

    #[error("failed to parse arguments for tool {tool}: {source}")]
    ParseError {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("tool {tool} returned a value that cannot be coerced to a string")]
    TypeMismatch { tool: String },

    #[error("completion response contained no choices")]
    EmptyCompletion,

    #[error("provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a provider-side failure so it reaches the run caller unchanged.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
