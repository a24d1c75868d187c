/// Failure of a ledger read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    /// Connection-level failures that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Failure of a transaction submission.
///
/// Kept distinct so callers can tell a declined signature from a dropped connection or
/// a program-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("signature request rejected by the user")]
    UserRejected,
    #[error("network error: {0}")]
    Network(String),
    #[error("program rejected transaction (code {code:?}): {message}")]
    ProgramRejected { code: Option<u32>, message: String },
}

/// Ledger failures during submission are node or transport problems. Program rejections
/// only come from the submitter's own structured error, never from a JSON-RPC error code.
impl From<LedgerError> for SubmitError {
    fn from(err: LedgerError) -> Self {
        Self::Network(err.to_string())
    }
}
