use thiserror::Error;

pub type Result<T> = std::result::Result<T, ObfuscationError>;

#[derive(Debug, Error)]
pub enum ObfuscationError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to spawn {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {status:?}: {stderr}")]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("{tool} did not finish within {secs}s")]
    ToolTimeout { tool: String, secs: u64 },

    #[error("randomness source unavailable: {0}")]
    RandomSource(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl ObfuscationError {
    /// Whether running the same step again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ObfuscationError::ToolTimeout { .. })
    }
}

impl From<regex::Error> for ObfuscationError {
    fn from(err: regex::Error) -> Self {
        ObfuscationError::InvalidPattern(err.to_string())
    }
}

impl From<aho_corasick::BuildError> for ObfuscationError {
    fn from(err: aho_corasick::BuildError) -> Self {
        ObfuscationError::InvalidPattern(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("obfuscation error: {0}")]
    Obfuscation(#[from] ObfuscationError),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
