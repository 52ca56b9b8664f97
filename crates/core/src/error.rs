use crate::graph::InstanceKind;
use crate::host::HostError;

/// Errors that can occur while executing catalog operators
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} index {index} is out of range, {available} available")]
    IndexOutOfRange {
        entity: String,
        index: i64,
        available: usize,
    },

    #[error("No plug '{0}' on this operator")]
    UnknownPlug(String),

    #[error("Plug '{code}' holds a {found} value, expected {expected}")]
    PlugType {
        code: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("A {expected} instance is required on plug '{code}'")]
    MissingInstance {
        code: String,
        expected: InstanceKind,
    },

    #[error("The {expected} input is not valid, got {found}")]
    WrongInstance {
        expected: InstanceKind,
        found: InstanceKind,
    },

    #[error("The host scripting interface is not available")]
    HostUnavailable,

    #[error("{context}: {source}")]
    Host {
        context: String,
        source: HostError,
    },
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap a host-side failure with the operation that was in flight.
    pub fn host(context: impl Into<String>, source: HostError) -> Self {
        Self::Host {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for reelgraph operations
pub type Result<T> = std::result::Result<T, Error>;
