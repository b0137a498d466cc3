use crate::state::StateError;

/// Errors reported to the ledger host by a contract invocation.
///
/// The host is expected to abort the surrounding transaction on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Failed to write state. {0}")]
    HostWrite(#[source] StateError),

    #[error("Failed to read state. {0}")]
    HostRead(#[source] StateError),

    #[error("TLE does not exist: {0}")]
    NotFound(String),

    #[error("Stored value at '{key}' is not a TLE record. {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode TLE record. {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Unknown contract function '{0}'")]
    UnknownFunction(String),

    #[error("Function '{function}' expects {expected} argument(s), got {actual}")]
    IncorrectArgCount {
        function: String,
        expected: usize,
        actual: usize,
    },
}
