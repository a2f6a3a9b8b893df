use crate::catalog::Policy;
use crate::profile::AssessmentProfile;
use crate::prominence::PROMINENT_THRESHOLD;
use crate::recommend::scoring::{accumulate_category_scores, adjust_for_prominence};
use crate::recommend::PolicyRecommendations;
use crate::tags::classifier::classify_profile;

/// Ranks the catalog against the customer's tag-derived category affinities
/// and partitions it into government and private recommendation lists.
///
/// A government policy whose category never accumulated the
/// government-recommended flag is dropped from both lists for prominent
/// customers; prominent customers are steered toward private products.
pub fn recommend_policies(
    profile: &AssessmentProfile,
    prominence_score: u8,
    catalog: &[Policy],
) -> PolicyRecommendations {
    let tags = classify_profile(profile);
    let mut category_scores = accumulate_category_scores(&tags);
    adjust_for_prominence(&mut category_scores, prominence_score);

    let mut scored: Vec<(&Policy, f64, bool)> = catalog
        .iter()
        .map(|policy| {
            let entry = category_scores.get(&policy.category);
            let score = entry.map_or(0.0, |e| e.score);
            let government_recommended = entry.is_some_and(|e| e.government_recommended);
            (policy, score, government_recommended)
        })
        .collect();
    // Stable sort: ties keep catalog order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut recommendations = PolicyRecommendations::default();
    for (policy, _, government_recommended) in scored {
        if policy.is_government_policy {
            if government_recommended || prominence_score < PROMINENT_THRESHOLD {
                recommendations.government_policies.push(policy.clone());
            }
        } else {
            recommendations.private_policies.push(policy.clone());
        }
    }
    recommendations
}
