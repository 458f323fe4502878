use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted data parsed fine but breaks the chain's index invariant.
    #[error("corrupt chain file: {0}")]
    CorruptChain(String),

    #[error("chain has no blocks")]
    EmptyChain,

    #[error("mining cancelled by shutdown")]
    MiningCancelled,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
