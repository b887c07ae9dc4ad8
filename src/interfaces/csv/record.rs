use crate::domain::crew::CrewMember;
use crate::domain::money::MoneyFields;
use crate::domain::wallet::Wallet;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// A crew row as it appears in roster CSV files: money as raw string
/// fields, hired state as a boolean flag. Mirrors the shape the hosted
/// store serves.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct CrewRecord {
    pub id: u64,
    pub name: String,
    pub gold: String,
    pub silver: Option<String>,
    pub copper: Option<String>,
    #[serde(default)]
    pub image: String,
    pub is_hired: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub levels: String,
}

impl TryFrom<CrewRecord> for CrewMember {
    type Error = LedgerError;

    fn try_from(record: CrewRecord) -> Result<Self> {
        let cost = MoneyFields {
            gold: record.gold,
            silver: record.silver,
            copper: record.copper,
        }
        .parse()?;

        Ok(CrewMember {
            id: record.id,
            name: record.name,
            cost,
            image: record.image,
            status: record.is_hired.into(),
            description: record.description,
            class: record.class,
            level_range: record.levels,
        })
    }
}

impl From<&CrewMember> for CrewRecord {
    fn from(member: &CrewMember) -> Self {
        let cost = MoneyFields::from(&member.cost);
        Self {
            id: member.id,
            name: member.name.clone(),
            gold: cost.gold,
            silver: cost.silver,
            copper: cost.copper,
            image: member.image.clone(),
            is_hired: member.status.is_hired(),
            description: member.description.clone(),
            class: member.class.clone(),
            levels: member.level_range.clone(),
        }
    }
}

/// The wallet row in its store shape.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct WalletRecord {
    pub id: u64,
    pub gold: String,
    pub silver: Option<String>,
    pub copper: Option<String>,
}

impl TryFrom<WalletRecord> for Wallet {
    type Error = LedgerError;

    fn try_from(record: WalletRecord) -> Result<Self> {
        let funds = MoneyFields {
            gold: record.gold,
            silver: record.silver,
            copper: record.copper,
        }
        .parse()?;
        Ok(Wallet::new(record.id, funds))
    }
}

impl From<&Wallet> for WalletRecord {
    fn from(wallet: &Wallet) -> Self {
        let funds = MoneyFields::from(&wallet.funds);
        Self {
            id: wallet.id,
            gold: funds.gold,
            silver: funds.silver,
            copper: funds.copper,
        }
    }
}
