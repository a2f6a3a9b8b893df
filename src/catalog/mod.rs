pub mod migrations;
pub mod seed;
pub mod store;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy line-of-business code. Codes outside the known set are carried as
/// `Other` and score zero during recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Health,
    Life,
    Vehicle,
    Accident,
    Crop,
    Home,
    Investment,
    Other(String),
}

impl Category {
    pub fn code(&self) -> &str {
        match self {
            Self::Health => "health",
            Self::Life => "life",
            Self::Vehicle => "vehicle",
            Self::Accident => "accident",
            Self::Crop => "crop",
            Self::Home => "home",
            Self::Investment => "investment",
            Self::Other(code) => code.as_str(),
        }
    }

    pub fn from_code(code: &str) -> Self {
        let normalized = code.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "health" => Self::Health,
            "life" => Self::Life,
            "vehicle" => Self::Vehicle,
            "accident" => Self::Accident,
            "crop" => Self::Crop,
            "home" => Self::Home,
            "investment" => Self::Investment,
            _ => Self::Other(normalized),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error)]
#[error("empty category code")]
pub struct CategoryParseError;

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(CategoryParseError);
        }
        Ok(Self::from_code(s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub provider: String,
    pub premium: Option<i64>,
    pub coverage: Option<i64>,
    pub eligibility_criteria: serde_json::Value,
    pub benefits: serde_json::Value,
    pub is_government_policy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPolicy {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub provider: String,
    pub premium: Option<i64>,
    pub coverage: Option<i64>,
    pub eligibility_criteria: serde_json::Value,
    pub benefits: serde_json::Value,
    pub is_government_policy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub customer_ref: String,
    pub is_prominent: bool,
    pub prominence_score: u8,
    pub predictor: String,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_customers: u64,
    pub prominent_customers: u64,
    pub conversion_rate_pct: u64,
    pub average_policy_premium: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip() {
        assert_eq!(Category::from_code("Health"), Category::Health);
        assert_eq!(Category::from_code(" crop "), Category::Crop);
        assert_eq!(
            Category::from_code("pet"),
            Category::Other("pet".to_string())
        );
        assert_eq!(Category::Investment.code(), "investment");
    }

    #[test]
    fn empty_category_code_is_rejected() {
        assert!("  ".parse::<Category>().is_err());
        assert_eq!("home".parse::<Category>().expect("parse"), Category::Home);
    }
}
