//! Client error types.

use thiserror::Error;

use icsorg_providers::ProviderError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// The output file a render error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// The aggregate org file.
    OrgFile,
    /// A per-event note file.
    RoamFile,
    /// A daily log file.
    DailyFile,
}

impl Sink {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrgFile => "createOrgFile",
            Self::RoamFile => "createRoamFile",
            Self::DailyFile => "writeToDailyFile",
        }
    }
}

impl std::fmt::Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Fetching or expanding the calendar failed.
    #[error("{0}")]
    Fetch(#[from] ProviderError),

    /// Writing one of the output files failed.
    #[error("{sink}: {source}")]
    Render {
        sink: Sink,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the event dump failed.
    #[error("failed to serialize events: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error outside of the sinks.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Wraps an IO error with the sink it happened in.
    pub fn render(sink: Sink, source: std::io::Error) -> Self {
        Self::Render { sink, source }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
