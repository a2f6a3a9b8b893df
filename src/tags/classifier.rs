use std::collections::BTreeSet;

use crate::catalog::Category;
use crate::profile::{Area, AssessmentProfile, IncomeBracket, MaritalStatus, Qualification};
use crate::tags::ProfileTag;

/// Claim totals above this mark a customer as a frequent claimant.
pub const FREQUENT_CLAIM_THRESHOLD: u64 = 50_000;

/// Derives the customer's profile tags. Every rule is independent and the
/// empty set is a valid result. The `Senior` tag has no producing rule: the
/// profile carries no age field to derive it from.
pub fn classify_profile(profile: &AssessmentProfile) -> BTreeSet<ProfileTag> {
    let mut tags = BTreeSet::new();

    match profile.income {
        IncomeBracket::AboveFifteenL | IncomeBracket::TenToFifteenL => {
            tags.insert(ProfileTag::HighIncome);
        }
        IncomeBracket::Below2L => {
            tags.insert(ProfileTag::LowIncome);
        }
        _ => {}
    }

    if profile.qualification == Qualification::HighSchool && profile.vintage < 2 {
        tags.insert(ProfileTag::Student);
    }

    if profile.marital_status == MaritalStatus::Married {
        tags.insert(ProfileTag::Family);
    }

    match profile.area {
        Area::Rural => {
            tags.insert(ProfileTag::RuralResident);
        }
        Area::Urban => {
            tags.insert(ProfileTag::UrbanResident);
        }
    }

    if profile.holds(&Category::Health) {
        tags.insert(ProfileTag::HealthConscious);
    }

    if profile.claim_amount > FREQUENT_CLAIM_THRESHOLD {
        tags.insert(ProfileTag::FrequentClaimant);
    }

    if profile.vintage < 1 {
        tags.insert(ProfileTag::NewCustomer);
    } else if profile.vintage >= 5 {
        tags.insert(ProfileTag::LoyalCustomer);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Gender, PolicyType};

    fn profile() -> AssessmentProfile {
        AssessmentProfile {
            customer_ref: "cust-1".to_string(),
            gender: Gender::Female,
            area: Area::Urban,
            qualification: Qualification::Graduate,
            income: IncomeBracket::FiveToTenL,
            vintage: 3,
            claim_amount: 0,
            policies_chosen: "vehicle".to_string(),
            policies_count: 1,
            policy_type: PolicyType::Individual,
            marital_status: MaritalStatus::Single,
        }
    }

    #[test]
    fn middle_of_the_road_profile_gets_only_location_tag() {
        let tags = classify_profile(&profile());
        assert_eq!(tags.len(), 1);
        assert!(tags.contains(&ProfileTag::UrbanResident));
    }

    #[test]
    fn income_tags_cover_both_ends_of_the_scale() {
        let mut p = profile();
        p.income = IncomeBracket::TenToFifteenL;
        assert!(classify_profile(&p).contains(&ProfileTag::HighIncome));

        p.income = IncomeBracket::Below2L;
        let tags = classify_profile(&p);
        assert!(tags.contains(&ProfileTag::LowIncome));
        assert!(!tags.contains(&ProfileTag::HighIncome));
    }

    #[test]
    fn student_requires_high_school_and_short_vintage() {
        let mut p = profile();
        p.qualification = Qualification::HighSchool;
        p.vintage = 1;
        assert!(classify_profile(&p).contains(&ProfileTag::Student));

        p.vintage = 2;
        assert!(!classify_profile(&p).contains(&ProfileTag::Student));
    }

    #[test]
    fn tenure_tags_are_mutually_exclusive() {
        let mut p = profile();
        p.vintage = 0;
        let tags = classify_profile(&p);
        assert!(tags.contains(&ProfileTag::NewCustomer));
        assert!(!tags.contains(&ProfileTag::LoyalCustomer));

        p.vintage = 5;
        let tags = classify_profile(&p);
        assert!(tags.contains(&ProfileTag::LoyalCustomer));
        assert!(!tags.contains(&ProfileTag::NewCustomer));

        p.vintage = 3;
        let tags = classify_profile(&p);
        assert!(!tags.contains(&ProfileTag::NewCustomer));
        assert!(!tags.contains(&ProfileTag::LoyalCustomer));
    }

    #[test]
    fn tags_can_stack() {
        let mut p = profile();
        p.area = Area::Rural;
        p.marital_status = MaritalStatus::Married;
        p.policies_chosen = "health,crop".to_string();
        p.claim_amount = 60_000;
        let tags = classify_profile(&p);
        assert!(tags.contains(&ProfileTag::RuralResident));
        assert!(tags.contains(&ProfileTag::Family));
        assert!(tags.contains(&ProfileTag::HealthConscious));
        assert!(tags.contains(&ProfileTag::FrequentClaimant));
    }

    #[test]
    fn claim_threshold_is_exclusive() {
        let mut p = profile();
        p.claim_amount = FREQUENT_CLAIM_THRESHOLD;
        assert!(!classify_profile(&p).contains(&ProfileTag::FrequentClaimant));
        p.claim_amount = FREQUENT_CLAIM_THRESHOLD + 1;
        assert!(classify_profile(&p).contains(&ProfileTag::FrequentClaimant));
    }

    #[test]
    fn senior_is_never_produced() {
        // Exhaustive-ish sweep over rule-relevant extremes.
        for vintage in [0, 1, 4, 5, 40] {
            for income in [IncomeBracket::Below2L, IncomeBracket::AboveFifteenL] {
                let mut p = profile();
                p.vintage = vintage;
                p.income = income;
                assert!(!classify_profile(&p).contains(&ProfileTag::Senior));
            }
        }
    }
}
