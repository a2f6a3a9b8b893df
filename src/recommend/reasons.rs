use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Category;
use crate::profile::AssessmentProfile;
use crate::recommend::Explanation;
use crate::tags::classifier::classify_profile;
use crate::tags::ProfileTag;

/// Categories that always receive a recommendation reason, whatever the
/// customer actually selected.
pub const EXPLAINED_CATEGORIES: [Category; 4] = [
    Category::Health,
    Category::Life,
    Category::Vehicle,
    Category::Accident,
];

/// One reason per explained category, chosen by a fixed first-match-wins
/// chain of tag checks with a generic default at the end.
pub fn recommendation_reasons(
    profile: &AssessmentProfile,
    _prominence_score: u8,
) -> BTreeMap<Category, String> {
    let tags = classify_profile(profile);
    let mut reasons = BTreeMap::new();

    let health = if tags.contains(&ProfileTag::Family) {
        "Health insurance is essential for protecting your entire family from unexpected medical expenses."
    } else if tags.contains(&ProfileTag::HealthConscious) {
        "Based on your health-conscious choices, we recommend comprehensive health coverage to maintain your wellbeing."
    } else if tags.contains(&ProfileTag::FrequentClaimant) {
        "Your history suggests you would benefit from a robust health insurance policy with wide coverage."
    } else {
        "Health insurance provides financial protection against unexpected medical costs."
    };
    reasons.insert(Category::Health, health.to_string());

    let life = if tags.contains(&ProfileTag::Family) {
        "Life insurance provides financial security for your family's future in case of unexpected events."
    } else if tags.contains(&ProfileTag::HighIncome) {
        "Protect your wealth and ensure your legacy with a comprehensive life insurance policy."
    } else {
        "Life insurance offers peace of mind and financial protection for your loved ones."
    };
    reasons.insert(Category::Life, life.to_string());

    let vehicle = if tags.contains(&ProfileTag::UrbanResident) {
        "Living in an urban area means higher traffic and accident risks - comprehensive vehicle insurance is recommended."
    } else {
        "Vehicle insurance protects against damages and liability while driving."
    };
    reasons.insert(Category::Vehicle, vehicle.to_string());

    let accident = if tags.contains(&ProfileTag::Student) || tags.contains(&ProfileTag::NewCustomer)
    {
        "Accident insurance provides affordable protection against unexpected injuries and related expenses."
    } else {
        "Accident insurance covers medical costs and provides income protection if you're injured."
    };
    reasons.insert(Category::Accident, accident.to_string());

    reasons
}

/// Additional-coverage suggestions, emitted in rule-declaration order. Each
/// rule is independent; anywhere from none to all of them may fire.
pub fn suggest_additional_coverage(
    profile: &AssessmentProfile,
    _prominence_score: u8,
) -> Vec<String> {
    let tags = classify_profile(profile);
    let held: BTreeSet<Category> = profile.chosen_categories().into_iter().collect();
    let mut suggestions = Vec::new();

    if !held.contains(&Category::Health) {
        suggestions.push(
            "Consider adding health insurance to your portfolio for comprehensive medical coverage."
                .to_string(),
        );
    }

    if tags.contains(&ProfileTag::Family) && !held.contains(&Category::Life) {
        suggestions.push(
            "As someone with a family, life insurance is crucial for protecting your loved ones financially."
                .to_string(),
        );
    }

    if tags.contains(&ProfileTag::HighIncome) && !held.contains(&Category::Investment) {
        suggestions.push(
            "With your income level, an investment-linked insurance policy could help grow your wealth while providing protection."
                .to_string(),
        );
    }

    if tags.contains(&ProfileTag::RuralResident) && !held.contains(&Category::Crop) {
        suggestions.push(
            "Living in a rural area, you might benefit from agricultural or crop insurance coverage."
                .to_string(),
        );
    }

    if tags.contains(&ProfileTag::UrbanResident) && !held.contains(&Category::Home) {
        suggestions.push(
            "For urban residents, home insurance provides protection against theft, damage, and liability."
                .to_string(),
        );
    }

    suggestions
}

pub fn explain_recommendations(
    profile: &AssessmentProfile,
    prominence_score: u8,
) -> Explanation {
    Explanation {
        reasons: recommendation_reasons(profile, prominence_score),
        suggestions: suggest_additional_coverage(profile, prominence_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Area, IncomeBracket, MaritalStatus};

    #[test]
    fn every_fixed_category_gets_a_reason() {
        let profile = AssessmentProfile::sample("cust-1");
        let reasons = recommendation_reasons(&profile, 10);
        for category in EXPLAINED_CATEGORIES {
            let reason = reasons.get(&category).expect("reason present");
            assert!(!reason.is_empty());
        }
        assert_eq!(reasons.len(), EXPLAINED_CATEGORIES.len());
    }

    #[test]
    fn family_reason_wins_over_health_conscious() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.marital_status = MaritalStatus::Married;
        profile.policies_chosen = "health".to_string();
        let reasons = recommendation_reasons(&profile, 80);
        assert!(reasons
            .get(&Category::Health)
            .expect("health reason")
            .contains("entire family"));
        assert!(reasons
            .get(&Category::Life)
            .expect("life reason")
            .contains("family's future"));
    }

    #[test]
    fn urban_residents_get_the_traffic_warning() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.area = Area::Urban;
        let reasons = recommendation_reasons(&profile, 50);
        assert!(reasons
            .get(&Category::Vehicle)
            .expect("vehicle reason")
            .contains("urban area"));

        profile.area = Area::Rural;
        let reasons = recommendation_reasons(&profile, 50);
        assert!(reasons
            .get(&Category::Vehicle)
            .expect("vehicle reason")
            .contains("damages and liability"));
    }

    #[test]
    fn suggestions_fire_in_declaration_order() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.income = IncomeBracket::AboveFifteenL;
        profile.marital_status = MaritalStatus::Married;
        profile.area = Area::Urban;
        profile.policies_chosen = "vehicle".to_string();
        let suggestions = suggest_additional_coverage(&profile, 80);
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].contains("health insurance"));
        assert!(suggestions[1].contains("life insurance"));
        assert!(suggestions[2].contains("investment-linked"));
        assert!(suggestions[3].contains("home insurance"));
    }

    #[test]
    fn held_categories_suppress_their_suggestions() {
        let mut profile = AssessmentProfile::sample("cust-1");
        profile.income = IncomeBracket::AboveFifteenL;
        profile.marital_status = MaritalStatus::Married;
        profile.area = Area::Rural;
        profile.policies_chosen = "health,life,investment,crop".to_string();
        let suggestions = suggest_additional_coverage(&profile, 80);
        assert!(suggestions.is_empty());
    }
}
