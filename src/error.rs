use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Why a hire or unhire request was turned down before any write was issued.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RejectReason {
    /// Wallet total is below the crew member's cost.
    InsufficientFunds,
    /// Hire requested for a crew member already on the roster.
    AlreadyHired,
    /// Unhire requested for a crew member that was never hired.
    NotHired,
    /// No crew member with the requested id exists.
    UnknownCrewMember,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InsufficientFunds => write!(f, "insufficient funds"),
            RejectReason::AlreadyHired => write!(f, "crew member is already hired"),
            RejectReason::NotHired => write!(f, "crew member is not hired"),
            RejectReason::UnknownCrewMember => write!(f, "unknown crew member"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid money value: {0}")]
    ValidationError(String),
    #[error("transaction rejected: {0}")]
    RejectedTransaction(RejectReason),
    #[error("failed to read from store: {0}")]
    ReadFailure(String),
    #[error("failed to write to store: {0}")]
    WriteFailure(String),
    /// One of the two writes of a transaction persisted while the other did
    /// not, and the compensating write could not undo it. The store now holds
    /// inconsistent wallet/roster state that needs reconciliation.
    #[error("transaction partially applied, store state is inconsistent: {0}")]
    PartialTransactionFailure(String),
    #[error("no wallet row found in store")]
    MissingWallet,
}

impl LedgerError {
    /// True when the error is a precondition rejection rather than a store
    /// failure, i.e. nothing was written and nothing needs reconciling.
    pub fn is_rejection(&self) -> bool {
        matches!(self, LedgerError::RejectedTransaction(_))
    }
}
