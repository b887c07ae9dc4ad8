use super::money::{Copper, Money};
use crate::error::{LedgerError, RejectReason, Result};
use serde::{Deserialize, Serialize};

/// The single party wallet.
///
/// Only hire/unhire transactions mutate it; creation and deletion belong to
/// the external store. Funds are kept canonical after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: u64,
    pub funds: Money,
}

impl Wallet {
    pub fn new(id: u64, funds: Money) -> Self {
        Self { id, funds }
    }

    pub fn total(&self) -> Copper {
        self.funds.to_base_units()
    }

    /// Total order on base units; an exact match is affordable.
    pub fn can_afford(&self, cost: &Money) -> bool {
        self.total() >= cost.to_base_units()
    }

    /// Deducts `cost`, leaving the funds normalized.
    pub fn debit(&mut self, cost: &Money) -> Result<()> {
        let remaining = self
            .total()
            .checked_sub(cost.to_base_units())
            .ok_or(LedgerError::RejectedTransaction(
                RejectReason::InsufficientFunds,
            ))?;
        self.funds = Money::from_base_units(remaining);
        Ok(())
    }

    /// Refunds `refund`, leaving the funds normalized. Fails without
    /// changing the funds when the refund would push the total past the
    /// base-unit range.
    pub fn credit(&mut self, refund: &Money) -> Result<()> {
        let total = self
            .total()
            .checked_add(refund.to_base_units())
            .ok_or_else(|| {
                LedgerError::ValidationError(
                    "refund would push the wallet past the representable base-unit range"
                        .to_string(),
                )
            })?;
        self.funds = Money::from_base_units(total);
        Ok(())
    }
}
