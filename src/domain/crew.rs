use super::money::Money;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum HireStatus {
    #[default]
    Available,
    Hired,
}

impl HireStatus {
    pub fn is_hired(&self) -> bool {
        *self == HireStatus::Hired
    }
}

impl From<bool> for HireStatus {
    fn from(hired: bool) -> Self {
        if hired {
            HireStatus::Hired
        } else {
            HireStatus::Available
        }
    }
}

/// A hireable character.
///
/// The ledger only reads `cost` and toggles `status`; everything else is
/// descriptive and passes through untouched. Stored costs may omit silver or
/// copper, which the boundary parser treats as zero before a `CrewMember` is
/// ever constructed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub cost: Money,
    pub image: String,
    #[serde(
        rename = "is_hired",
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: HireStatus,
    pub description: String,
    pub class: String,
    /// Display range like "10-12"; never parsed.
    pub level_range: String,
}

fn serialize_status<S>(status: &HireStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(status.is_hired())
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<HireStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let hired = bool::deserialize(deserializer)?;
    Ok(HireStatus::from(hired))
}
