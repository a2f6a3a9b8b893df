pub mod builder;
pub mod encoder;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Urban,
    Rural,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Qualification {
    HighSchool,
    Graduate,
    PostGraduate,
    Doctorate,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum IncomeBracket {
    #[serde(rename = "below-2L")]
    Below2L,
    #[serde(rename = "2L-5L")]
    TwoToFiveL,
    #[serde(rename = "5L-10L")]
    FiveToTenL,
    #[serde(rename = "10L-15L")]
    TenToFifteenL,
    #[serde(rename = "above-15L")]
    AboveFifteenL,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyType {
    Individual,
    FamilyFloater,
    Group,
    Corporate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl Gender {
    pub fn encoder_index(self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
            Self::Other => 2,
        }
    }

    // Unknown codes collapse to the first encoder entry.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "female" => Self::Female,
            "other" => Self::Other,
            _ => Self::Male,
        }
    }
}

impl Area {
    pub fn encoder_index(self) -> u8 {
        match self {
            Self::Urban => 0,
            Self::Rural => 1,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "rural" => Self::Rural,
            _ => Self::Urban,
        }
    }
}

impl Qualification {
    pub fn encoder_index(self) -> u8 {
        match self {
            Self::HighSchool => 0,
            Self::Graduate => 1,
            Self::PostGraduate => 2,
            Self::Doctorate => 3,
            Self::Other => 4,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "graduate" => Self::Graduate,
            "post-graduate" => Self::PostGraduate,
            "doctorate" => Self::Doctorate,
            "other" => Self::Other,
            _ => Self::HighSchool,
        }
    }
}

impl IncomeBracket {
    pub fn encoder_index(self) -> u8 {
        match self {
            Self::Below2L => 0,
            Self::TwoToFiveL => 1,
            Self::FiveToTenL => 2,
            Self::TenToFifteenL => 3,
            Self::AboveFifteenL => 4,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "2L-5L" => Self::TwoToFiveL,
            "5L-10L" => Self::FiveToTenL,
            "10L-15L" => Self::TenToFifteenL,
            "above-15L" => Self::AboveFifteenL,
            _ => Self::Below2L,
        }
    }
}

impl PolicyType {
    pub fn encoder_index(self) -> u8 {
        match self {
            Self::Individual => 0,
            Self::FamilyFloater => 1,
            Self::Group => 2,
            Self::Corporate => 3,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "family-floater" => Self::FamilyFloater,
            "group" => Self::Group,
            "corporate" => Self::Corporate,
            _ => Self::Individual,
        }
    }
}

impl MaritalStatus {
    pub fn encoder_index(self) -> u8 {
        match self {
            Self::Single => 0,
            Self::Married => 1,
            Self::Divorced => 2,
            Self::Widowed => 3,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "married" => Self::Married,
            "divorced" => Self::Divorced,
            "widowed" => Self::Widowed,
            _ => Self::Single,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentProfile {
    pub customer_ref: String,
    pub gender: Gender,
    pub area: Area,
    pub qualification: Qualification,
    pub income: IncomeBracket,
    pub vintage: u32,
    pub claim_amount: u64,
    pub policies_count: u32,
    pub policies_chosen: String,
    pub policy_type: PolicyType,
    pub marital_status: MaritalStatus,
}

impl AssessmentProfile {
    pub fn sample(customer_ref: impl Into<String>) -> Self {
        Self {
            customer_ref: customer_ref.into(),
            gender: Gender::Male,
            area: Area::Urban,
            qualification: Qualification::Graduate,
            income: IncomeBracket::FiveToTenL,
            vintage: 3,
            claim_amount: 0,
            policies_count: 1,
            policies_chosen: "health".to_string(),
            policy_type: PolicyType::Individual,
            marital_status: MaritalStatus::Single,
        }
    }

    /// Categories already held by the customer, parsed from the canonical
    /// comma-joined form. Empty pieces are ignored.
    pub fn chosen_categories(&self) -> Vec<Category> {
        self.policies_chosen
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(Category::from_code)
            .collect()
    }

    pub fn holds(&self, category: &Category) -> bool {
        self.chosen_categories().iter().any(|c| c == category)
    }

    pub fn chosen_count(&self) -> usize {
        self.chosen_categories().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_default_to_first_encoder_entry() {
        assert_eq!(IncomeBracket::from_code("seven-figures"), IncomeBracket::Below2L);
        assert_eq!(Qualification::from_code("phd"), Qualification::HighSchool);
        assert_eq!(Gender::from_code(""), Gender::Male);
        assert_eq!(MaritalStatus::from_code("separated"), MaritalStatus::Single);
    }

    #[test]
    fn income_brackets_are_ordered() {
        assert!(IncomeBracket::Below2L < IncomeBracket::AboveFifteenL);
        assert_eq!(IncomeBracket::AboveFifteenL.encoder_index(), 4);
    }

    #[test]
    fn chosen_categories_skip_empty_pieces() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.policies_chosen = "health, life,,vehicle".to_string();
        assert_eq!(profile.chosen_count(), 3);
        assert!(profile.holds(&Category::Life));
        assert!(!profile.holds(&Category::Crop));
    }

    #[test]
    fn income_codes_round_trip_through_serde() {
        let json = serde_json::to_string(&IncomeBracket::AboveFifteenL).expect("serialize");
        assert_eq!(json, "\"above-15L\"");
        let parsed: IncomeBracket = serde_json::from_str("\"2L-5L\"").expect("deserialize");
        assert_eq!(parsed, IncomeBracket::TwoToFiveL);
    }
}
