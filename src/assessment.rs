use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Policy};
use crate::profile::AssessmentProfile;
use crate::prominence::predictor::Predictor;
use crate::prominence::scorer::score_prominence;
use crate::prominence::ProminenceResult;
use crate::recommend::engine::recommend_policies;
use crate::recommend::reasons::{recommendation_reasons, suggest_additional_coverage};
use crate::tags::classifier::classify_profile;
use crate::tags::ProfileTag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub customer: String,
    pub prominence: ProminenceResult,
    pub predictor: String,
    pub tags: Vec<ProfileTag>,
    pub government_policies: Vec<Policy>,
    pub private_policies: Vec<Policy>,
    pub reasons: BTreeMap<Category, String>,
    pub suggestions: Vec<String>,
}

/// Full assessment pipeline: score prominence, classify, rank the catalog,
/// and attach the human-readable reasoning.
pub fn run_assessment(
    profile: &AssessmentProfile,
    predictor: &dyn Predictor,
    catalog: &[Policy],
) -> AssessmentOutcome {
    let prominence = score_prominence(profile, predictor);
    let tags = classify_profile(profile);
    let recommendations = recommend_policies(profile, prominence.prominence_score, catalog);
    let reasons = recommendation_reasons(profile, prominence.prominence_score);
    let suggestions = suggest_additional_coverage(profile, prominence.prominence_score);

    AssessmentOutcome {
        customer: profile.customer_ref.clone(),
        prominence,
        predictor: predictor.name().to_string(),
        tags: tags.into_iter().collect(),
        government_policies: recommendations.government_policies,
        private_policies: recommendations.private_policies,
        reasons,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::seed_policies;
    use crate::catalog::NewPolicy;
    use crate::profile::{Area, IncomeBracket, MaritalStatus};
    use crate::prominence::predictor::FormulaPredictor;

    fn catalog() -> Vec<Policy> {
        seed_policies()
            .into_iter()
            .enumerate()
            .map(|(idx, seed)| to_policy(idx as i64 + 1, seed))
            .collect()
    }

    fn to_policy(id: i64, seed: NewPolicy) -> Policy {
        Policy {
            id,
            name: seed.name,
            description: seed.description,
            category: seed.category,
            provider: seed.provider,
            premium: seed.premium,
            coverage: seed.coverage,
            eligibility_criteria: seed.eligibility_criteria,
            benefits: seed.benefits,
            is_government_policy: seed.is_government_policy,
        }
    }

    #[test]
    fn prominent_family_assessment_is_coherent_end_to_end() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.income = IncomeBracket::AboveFifteenL;
        profile.vintage = 6;
        profile.policies_count = 4;
        profile.marital_status = MaritalStatus::Married;
        profile.area = Area::Urban;
        profile.policies_chosen = "health,life".to_string();

        let outcome = run_assessment(&profile, &FormulaPredictor, &catalog());
        assert_eq!(outcome.prominence.prominence_score, 78);
        assert!(outcome.prominence.is_prominent);
        assert_eq!(outcome.predictor, "formula");
        assert!(outcome.tags.contains(&ProfileTag::HighIncome));
        assert!(outcome.tags.contains(&ProfileTag::Family));
        // Family flags health and life government-recommended, so the
        // government schemes survive the prominence gate.
        assert!(!outcome.government_policies.is_empty());
        assert!(!outcome.private_policies.is_empty());
        assert_eq!(outcome.reasons.len(), 4);
        assert!(outcome
            .suggestions
            .iter()
            .any(|s| s.contains("investment-linked")));
    }

    #[test]
    fn assessment_with_empty_catalog_still_explains() {
        let profile = AssessmentProfile::sample("cust-2");
        let outcome = run_assessment(&profile, &FormulaPredictor, &[]);
        assert!(outcome.government_policies.is_empty());
        assert!(outcome.private_policies.is_empty());
        assert_eq!(outcome.reasons.len(), 4);
    }
}
