use super::engine::{HiringEngine, TransactionOutcome};
use crate::error::{LedgerError, Result};

/// A user intent against one crew member, decoupled from any input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiringIntent {
    Hire(u64),
    Unhire(u64),
}

/// How a single intent from a sequential stream landed.
#[derive(Debug)]
pub enum IntentOutcome {
    /// Both writes committed.
    Applied(TransactionOutcome),
    /// Precondition rejection; nothing was written.
    Skipped(LedgerError),
    /// Store failure with persisted state still consistent (including
    /// flag-write failures that were compensated).
    Failed(LedgerError),
}

/// Applies one intent and classifies the result for the caller's loop.
///
/// Rejections and clean store failures leave the run able to continue;
/// a partial transaction failure comes back as `Err` because the persisted
/// wallet and roster no longer agree and further intents would compound
/// the damage.
pub async fn apply_intent(engine: &HiringEngine, intent: HiringIntent) -> Result<IntentOutcome> {
    let result = match intent {
        HiringIntent::Hire(crew_id) => engine.hire(crew_id).await,
        HiringIntent::Unhire(crew_id) => engine.unhire(crew_id).await,
    };

    match result {
        Ok(outcome) => Ok(IntentOutcome::Applied(outcome)),
        Err(e @ LedgerError::PartialTransactionFailure(_)) => Err(e),
        Err(e) if e.is_rejection() => Ok(IntentOutcome::Skipped(e)),
        Err(e) => Ok(IntentOutcome::Failed(e)),
    }
}
