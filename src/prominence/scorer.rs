use tracing::{error, warn};

use crate::profile::encoder::{encode_features, FeatureVector};
use crate::profile::AssessmentProfile;
use crate::prominence::predictor::{FormulaPredictor, Predictor};
use crate::prominence::ProminenceResult;

/// Scores a customer's prominence. Never fails: a predictor error falls back
/// to the deterministic formula, and if even that cannot produce a usable
/// number the safe default `{is_prominent: false, prominence_score: 0}` is
/// returned.
pub fn score_prominence(
    profile: &AssessmentProfile,
    predictor: &dyn Predictor,
) -> ProminenceResult {
    let features = encode_features(profile);

    match predictor.predict(&features) {
        Ok(p) if p.is_finite() => from_propensity(p),
        Ok(_) => {
            warn!(
                "prominence model returned a non-finite value for {}, using fallback formula",
                profile.customer_ref
            );
            formula_fallback(profile, &features)
        }
        Err(error) => {
            if predictor.name() != FormulaPredictor.name() {
                warn!(
                    "prominence prediction failed for {}: {error}; using fallback formula",
                    profile.customer_ref
                );
            }
            formula_fallback(profile, &features)
        }
    }
}

fn formula_fallback(profile: &AssessmentProfile, features: &FeatureVector) -> ProminenceResult {
    match FormulaPredictor.predict(features) {
        Ok(p) if p.is_finite() => from_propensity(p),
        _ => {
            error!(
                "prominence scoring failed entirely for {}, returning safe default",
                profile.customer_ref
            );
            ProminenceResult::default()
        }
    }
}

fn from_propensity(propensity: f64) -> ProminenceResult {
    let prominence_score = (propensity.clamp(0.0, 1.0) * 100.0).round() as u8;
    ProminenceResult::from_score(prominence_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::encoder::FeatureVector;
    use crate::profile::{Area, AssessmentProfile, IncomeBracket, MaritalStatus};
    use crate::prominence::predictor::PredictError;

    struct BrokenPredictor;

    impl Predictor for BrokenPredictor {
        fn name(&self) -> &'static str {
            "model"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictError> {
            Err(PredictError::NonFinite)
        }
    }

    fn scenario_profile() -> AssessmentProfile {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.income = IncomeBracket::AboveFifteenL;
        profile.vintage = 6;
        profile.claim_amount = 0;
        profile.policies_count = 4;
        profile.marital_status = MaritalStatus::Married;
        profile.area = Area::Urban;
        profile.policies_chosen = "health,life".to_string();
        profile
    }

    #[test]
    fn fallback_scores_the_reference_scenario_prominent() {
        let result = score_prominence(&scenario_profile(), &FormulaPredictor);
        assert_eq!(result.prominence_score, 78);
        assert!(result.is_prominent);
    }

    #[test]
    fn large_claims_pull_the_same_profile_below_threshold() {
        let mut profile = scenario_profile();
        profile.claim_amount = 100_000;
        let result = score_prominence(&profile, &FormulaPredictor);
        assert_eq!(result.prominence_score, 58);
        assert!(!result.is_prominent);
    }

    #[test]
    fn scoring_is_deterministic() {
        let profile = scenario_profile();
        let first = score_prominence(&profile, &FormulaPredictor);
        let second = score_prominence(&profile, &FormulaPredictor);
        assert_eq!(first, second);
    }

    #[test]
    fn score_stays_in_bounds_and_matches_flag() {
        for (vintage, claim, count) in [
            (0u32, 0u64, 0u32),
            (50, 10_000_000, 99),
            (6, 100_000, 4),
            (2, 25_000, 1),
        ] {
            let mut profile = scenario_profile();
            profile.vintage = vintage;
            profile.claim_amount = claim;
            profile.policies_count = count;
            let result = score_prominence(&profile, &FormulaPredictor);
            assert!(result.prominence_score <= 100);
            assert_eq!(result.is_prominent, result.prominence_score >= 70);
        }
    }

    #[test]
    fn more_policies_never_lowers_the_score() {
        let mut previous = 0u8;
        for count in 0..10u32 {
            let mut profile = scenario_profile();
            profile.policies_count = count;
            let score = score_prominence(&profile, &FormulaPredictor).prominence_score;
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn larger_claims_never_raise_the_score() {
        let mut previous = 100u8;
        for claim in (0..10u64).map(|n| n * 25_000) {
            let mut profile = scenario_profile();
            profile.claim_amount = claim;
            let score = score_prominence(&profile, &FormulaPredictor).prominence_score;
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn broken_model_falls_back_to_the_formula() {
        let result = score_prominence(&scenario_profile(), &BrokenPredictor);
        assert_eq!(result.prominence_score, 78);
        assert!(result.is_prominent);
    }
}
