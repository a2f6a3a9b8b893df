use crate::profile::AssessmentProfile;

pub const FEATURE_COUNT: usize = 10;

/// Fixed-order numeric feature vector consumed by the predictor:
/// [gender, area, qualification, income, vintage, claim_amount,
///  policies_count, policies_chosen_count, policy_type, marital_status].
pub type FeatureVector = [f64; FEATURE_COUNT];

pub fn encode_features(profile: &AssessmentProfile) -> FeatureVector {
    [
        f64::from(profile.gender.encoder_index()),
        f64::from(profile.area.encoder_index()),
        f64::from(profile.qualification.encoder_index()),
        f64::from(profile.income.encoder_index()),
        f64::from(profile.vintage),
        profile.claim_amount as f64,
        f64::from(profile.policies_count),
        profile.chosen_count() as f64,
        f64::from(profile.policy_type.encoder_index()),
        f64::from(profile.marital_status.encoder_index()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Area, IncomeBracket, MaritalStatus};

    #[test]
    fn vector_follows_the_fixed_field_order() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.area = Area::Rural;
        profile.income = IncomeBracket::TenToFifteenL;
        profile.vintage = 7;
        profile.claim_amount = 120_000;
        profile.policies_count = 2;
        profile.policies_chosen = "health,life,crop".to_string();
        profile.marital_status = MaritalStatus::Married;

        let features = encode_features(&profile);
        assert_eq!(features[1], 1.0);
        assert_eq!(features[3], 3.0);
        assert_eq!(features[4], 7.0);
        assert_eq!(features[5], 120_000.0);
        assert_eq!(features[6], 2.0);
        assert_eq!(features[7], 3.0);
        assert_eq!(features[9], 1.0);
    }

    #[test]
    fn sample_profile_encodes_without_surprises() {
        let features = encode_features(&AssessmentProfile::sample("cust-1"));
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 0.0);
        assert_eq!(features[7], 1.0);
    }
}
