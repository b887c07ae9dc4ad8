use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Base copper units per silver piece.
pub const COPPER_PER_SILVER: u64 = 100;
/// Base copper units per gold piece. Intentional game-balance rate, not the
/// conventional 1:10:100 ladder.
pub const COPPER_PER_GOLD: u64 = 10_000;

/// A currency total in base copper units.
///
/// All arithmetic in the ledger happens on this type; the per-denomination
/// form is only produced at the store boundary. Keeping totals as a single
/// integer makes affordability a plain comparison and rules out rounding
/// error entirely.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Copper(pub u64);

impl Copper {
    pub const ZERO: Self = Self(0);

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl std::fmt::Display for Copper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A currency amount in gold/silver/copper denominations.
///
/// Canonical form keeps silver and copper below 100 each; `from_base_units`
/// is the only constructor that guarantees it. Non-canonical amounts (say a
/// cost quoted as 150 silver) are legal inputs and collapse to the same
/// base-unit total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Money {
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl Money {
    pub const ZERO: Self = Self {
        gold: 0,
        silver: 0,
        copper: 0,
    };

    pub fn new(gold: u64, silver: u64, copper: u64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    /// Normalizes a base-unit total into the unique minimal denomination
    /// breakdown.
    pub fn from_base_units(total: Copper) -> Self {
        let after_gold = total.0 % COPPER_PER_GOLD;
        Self {
            gold: total.0 / COPPER_PER_GOLD,
            silver: after_gold / COPPER_PER_SILVER,
            copper: after_gold % COPPER_PER_SILVER,
        }
    }

    /// Total in base units. Callers hold amounts that came through
    /// `from_base_units` or a validated parse, so the sum fits.
    pub fn to_base_units(&self) -> Copper {
        Copper(self.gold * COPPER_PER_GOLD + self.silver * COPPER_PER_SILVER + self.copper)
    }

    /// Like `to_base_units` but refuses totals that do not fit in the
    /// base-unit range. The boundary parser runs every incoming amount
    /// through this before it can reach the arithmetic.
    pub fn checked_base_units(&self) -> Option<Copper> {
        let gold = self.gold.checked_mul(COPPER_PER_GOLD)?;
        let silver = self.silver.checked_mul(COPPER_PER_SILVER)?;
        gold.checked_add(silver)?
            .checked_add(self.copper)
            .map(Copper)
    }

    pub fn is_canonical(&self) -> bool {
        self.silver < COPPER_PER_SILVER && self.copper < COPPER_PER_SILVER
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Gold, {} Silver, {} Copper",
            self.gold, self.silver, self.copper
        )
    }
}

/// Raw denomination fields as the store holds them: strings, with silver and
/// copper possibly absent. Parsed into `Money` at the boundary so nulls never
/// reach the arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoneyFields {
    pub gold: String,
    pub silver: Option<String>,
    pub copper: Option<String>,
}

impl MoneyFields {
    pub fn parse(&self) -> Result<Money> {
        let money = Money {
            gold: parse_field("gold", &self.gold)?,
            silver: parse_optional_field("silver", self.silver.as_deref())?,
            copper: parse_optional_field("copper", self.copper.as_deref())?,
        };
        if money.checked_base_units().is_none() {
            return Err(LedgerError::ValidationError(
                "total value exceeds the representable base-unit range".to_string(),
            ));
        }
        Ok(money)
    }
}

impl From<&Money> for MoneyFields {
    fn from(money: &Money) -> Self {
        Self {
            gold: money.gold.to_string(),
            silver: Some(money.silver.to_string()),
            copper: Some(money.copper.to_string()),
        }
    }
}

fn parse_field(name: &str, raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>().map_err(|_| {
        LedgerError::ValidationError(format!("{name} must be a non-negative integer, got {raw:?}"))
    })
}

fn parse_optional_field(name: &str, raw: Option<&str>) -> Result<u64> {
    match raw {
        Some(value) => parse_field(name, value),
        None => Ok(0),
    }
}
