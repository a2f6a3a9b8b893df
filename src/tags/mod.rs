pub mod classifier;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Qualitative customer archetypes derived from the raw assessment profile.
/// A profile can carry any combination of tags, including none.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTag {
    HighIncome,
    LowIncome,
    Senior,
    Student,
    Family,
    RuralResident,
    UrbanResident,
    HealthConscious,
    FrequentClaimant,
    NewCustomer,
    LoyalCustomer,
}

impl ProfileTag {
    pub const ALL: [ProfileTag; 11] = [
        ProfileTag::HighIncome,
        ProfileTag::LowIncome,
        ProfileTag::Senior,
        ProfileTag::Student,
        ProfileTag::Family,
        ProfileTag::RuralResident,
        ProfileTag::UrbanResident,
        ProfileTag::HealthConscious,
        ProfileTag::FrequentClaimant,
        ProfileTag::NewCustomer,
        ProfileTag::LoyalCustomer,
    ];
}

impl Display for ProfileTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::HighIncome => "HighIncome",
            Self::LowIncome => "LowIncome",
            Self::Senior => "Senior",
            Self::Student => "Student",
            Self::Family => "Family",
            Self::RuralResident => "RuralResident",
            Self::UrbanResident => "UrbanResident",
            Self::HealthConscious => "HealthConscious",
            Self::FrequentClaimant => "FrequentClaimant",
            Self::NewCustomer => "NewCustomer",
            Self::LoyalCustomer => "LoyalCustomer",
        };
        write!(f, "{display}")
    }
}
