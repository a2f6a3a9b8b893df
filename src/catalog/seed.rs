use serde_json::json;

use crate::catalog::{Category, NewPolicy};

/// Launch catalog: the government schemes and private products the advisory
/// application ships with before any policies are loaded from elsewhere.
pub fn seed_policies() -> Vec<NewPolicy> {
    vec![
        NewPolicy {
            name: "Pradhan Mantri Jeevan Jyoti Bima Yojana (PMJJBY)".to_string(),
            description: "Government-backed life insurance scheme with low premium and high coverage."
                .to_string(),
            category: Category::Life,
            provider: "Government of India".to_string(),
            premium: Some(330),
            coverage: Some(200_000),
            eligibility_criteria: json!({ "age_min": 18, "age_max": 50 }),
            benefits: json!({ "life_covers": ["Natural death", "Accidental death"] }),
            is_government_policy: true,
        },
        NewPolicy {
            name: "Pradhan Mantri Suraksha Bima Yojana (PMSBY)".to_string(),
            description: "Accident insurance coverage with minimal premium payment.".to_string(),
            category: Category::Accident,
            provider: "Government of India".to_string(),
            premium: Some(12),
            coverage: Some(200_000),
            eligibility_criteria: json!({ "age_min": 18, "age_max": 70 }),
            benefits: json!({ "accident_covers": ["Accidental death", "Permanent disability"] }),
            is_government_policy: true,
        },
        NewPolicy {
            name: "Ayushman Bharat - Pradhan Mantri Jan Arogya Yojana".to_string(),
            description: "Health insurance scheme that provides coverage for hospitalization expenses."
                .to_string(),
            category: Category::Health,
            provider: "Government of India".to_string(),
            premium: Some(0),
            coverage: Some(500_000),
            eligibility_criteria: json!({ "income_criteria": "Below poverty line families" }),
            benefits: json!({
                "family_coverage": true,
                "hospitalization_covers": [
                    "Pre and post hospitalization expenses",
                    "Medicine costs"
                ]
            }),
            is_government_policy: true,
        },
        NewPolicy {
            name: "Premium Health Insurance".to_string(),
            description: "Comprehensive health coverage with special benefits for prominent customers."
                .to_string(),
            category: Category::Health,
            provider: "InsureTech".to_string(),
            premium: Some(15_000),
            coverage: Some(1_000_000),
            eligibility_criteria: json!({ "age_min": 18, "age_max": 70 }),
            benefits: json!({
                "cashless": true,
                "maternity": true,
                "pre_existing_conditions": "Covered after 3 years"
            }),
            is_government_policy: false,
        },
        NewPolicy {
            name: "Premium Life Insurance".to_string(),
            description: "Tailored life insurance solutions with enhanced benefits and coverage options."
                .to_string(),
            category: Category::Life,
            provider: "InsureTech".to_string(),
            premium: Some(20_000),
            coverage: Some(2_000_000),
            eligibility_criteria: json!({ "age_min": 18, "age_max": 65 }),
            benefits: json!({
                "term_period": "10-30 years",
                "critical_illness_cover": true
            }),
            is_government_policy: false,
        },
        NewPolicy {
            name: "Vehicle Insurance - Comprehensive".to_string(),
            description: "Full coverage for your vehicle including third-party liability and own damage."
                .to_string(),
            category: Category::Vehicle,
            provider: "InsureTech".to_string(),
            premium: Some(8_000),
            coverage: Some(500_000),
            eligibility_criteria: json!({ "vehicle_age": "Less than 15 years" }),
            benefits: json!({
                "own_damage": true,
                "third_party": true,
                "zero_depreciation": true
            }),
            is_government_policy: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_both_pools() {
        let policies = seed_policies();
        assert_eq!(policies.len(), 6);
        assert_eq!(policies.iter().filter(|p| p.is_government_policy).count(), 3);
        assert!(policies.iter().any(|p| p.category == Category::Vehicle));
    }
}
