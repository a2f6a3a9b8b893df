use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Category;
use crate::prominence::PROMINENT_THRESHOLD;
use crate::recommend::{CategoryScore, TagAffinity};
use crate::tags::ProfileTag;

/// Prominent customers get private-leaning categories boosted by 25% and
/// government-leaning ones dampened by 10%; everyone else gets the
/// government-leaning categories boosted instead.
const PRIVATE_BOOST: f64 = 1.25;
const GOVERNMENT_DAMPING: f64 = 0.9;
const GOVERNMENT_BOOST: f64 = 1.25;

/// Fixed affinity table: which policy categories each profile tag pulls
/// toward, whether a government-backed product suits that pull, and how hard
/// it pulls.
pub fn tag_affinities(tag: ProfileTag) -> Vec<TagAffinity> {
    match tag {
        ProfileTag::HighIncome => vec![
            TagAffinity::new(Category::Life, false, 9.0),
            TagAffinity::new(Category::Health, false, 8.0),
            TagAffinity::new(Category::Investment, false, 9.0),
            TagAffinity::new(Category::Vehicle, false, 7.0),
        ],
        ProfileTag::LowIncome => vec![
            TagAffinity::new(Category::Life, true, 9.0),
            TagAffinity::new(Category::Health, true, 10.0),
            TagAffinity::new(Category::Accident, true, 8.0),
        ],
        ProfileTag::Senior => vec![
            TagAffinity::new(Category::Health, true, 10.0),
            TagAffinity::new(Category::Life, true, 7.0),
        ],
        ProfileTag::Student => vec![
            TagAffinity::new(Category::Accident, true, 8.0),
            TagAffinity::new(Category::Health, true, 7.0),
        ],
        ProfileTag::Family => vec![
            TagAffinity::new(Category::Health, true, 10.0),
            TagAffinity::new(Category::Life, true, 9.0),
            TagAffinity::new(Category::Home, false, 7.0),
        ],
        ProfileTag::RuralResident => vec![
            TagAffinity::new(Category::Crop, true, 9.0),
            TagAffinity::new(Category::Health, true, 10.0),
        ],
        ProfileTag::UrbanResident => vec![
            TagAffinity::new(Category::Vehicle, false, 8.0),
            TagAffinity::new(Category::Home, false, 7.0),
        ],
        ProfileTag::HealthConscious => vec![
            TagAffinity::new(Category::Health, false, 10.0),
            TagAffinity::new(Category::Accident, false, 8.0),
        ],
        ProfileTag::FrequentClaimant => vec![
            TagAffinity::new(Category::Health, true, 9.0),
            TagAffinity::new(Category::Accident, true, 8.0),
        ],
        ProfileTag::NewCustomer => vec![
            TagAffinity::new(Category::Health, true, 8.0),
            TagAffinity::new(Category::Accident, true, 7.0),
        ],
        ProfileTag::LoyalCustomer => vec![
            TagAffinity::new(Category::Life, false, 9.0),
            TagAffinity::new(Category::Health, false, 9.0),
            TagAffinity::new(Category::Vehicle, false, 8.0),
        ],
    }
}

pub fn accumulate_category_scores(
    tags: &BTreeSet<ProfileTag>,
) -> BTreeMap<Category, CategoryScore> {
    let mut scores: BTreeMap<Category, CategoryScore> = BTreeMap::new();
    for tag in tags {
        for affinity in tag_affinities(*tag) {
            let entry = scores.entry(affinity.category).or_insert(CategoryScore {
                score: 0.0,
                government_recommended: false,
            });
            entry.score += affinity.priority;
            entry.government_recommended =
                entry.government_recommended || affinity.government_recommended;
        }
    }
    scores
}

pub fn adjust_for_prominence(
    scores: &mut BTreeMap<Category, CategoryScore>,
    prominence_score: u8,
) {
    if prominence_score >= PROMINENT_THRESHOLD {
        for entry in scores.values_mut() {
            if entry.government_recommended {
                entry.score *= GOVERNMENT_DAMPING;
            } else {
                entry.score *= PRIVATE_BOOST;
            }
        }
    } else {
        for entry in scores.values_mut() {
            if entry.government_recommended {
                entry.score *= GOVERNMENT_BOOST;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[ProfileTag]) -> BTreeSet<ProfileTag> {
        list.iter().copied().collect()
    }

    #[test]
    fn every_tag_has_affinities() {
        for tag in ProfileTag::ALL {
            assert!(!tag_affinities(tag).is_empty());
        }
    }

    #[test]
    fn scores_sum_and_government_flag_is_sticky() {
        // Family marks life government-recommended; HighIncome does not.
        // Once set, the flag survives further accumulation.
        let scores = accumulate_category_scores(&tags(&[
            ProfileTag::HighIncome,
            ProfileTag::Family,
            ProfileTag::UrbanResident,
        ]));
        let life = scores.get(&Category::Life).expect("life score");
        assert_eq!(life.score, 18.0);
        assert!(life.government_recommended);

        let health = scores.get(&Category::Health).expect("health score");
        assert_eq!(health.score, 18.0);
        assert!(health.government_recommended);

        let vehicle = scores.get(&Category::Vehicle).expect("vehicle score");
        assert_eq!(vehicle.score, 15.0);
        assert!(!vehicle.government_recommended);
    }

    #[test]
    fn prominent_customers_boost_private_categories() {
        // Both life contributors are private-leaning here: 18 * 1.25 = 22.5.
        let mut scores = accumulate_category_scores(&tags(&[
            ProfileTag::HighIncome,
            ProfileTag::LoyalCustomer,
        ]));
        adjust_for_prominence(&mut scores, 78);
        let life = scores.get(&Category::Life).expect("life score");
        assert!((life.score - 22.5).abs() < 1e-9);
        assert!(!life.government_recommended);
    }

    #[test]
    fn prominent_customers_dampen_government_categories() {
        let mut scores = accumulate_category_scores(&tags(&[
            ProfileTag::HighIncome,
            ProfileTag::Family,
        ]));
        adjust_for_prominence(&mut scores, 78);
        let life = scores.get(&Category::Life).expect("life score");
        assert!((life.score - 16.2).abs() < 1e-9);
    }

    #[test]
    fn low_income_health_gets_the_government_boost_below_threshold() {
        let mut scores = accumulate_category_scores(&tags(&[ProfileTag::LowIncome]));
        adjust_for_prominence(&mut scores, 42);
        let health = scores.get(&Category::Health).expect("health score");
        assert!((health.score - 12.5).abs() < 1e-9);
        assert!(health.government_recommended);
    }

    #[test]
    fn private_categories_are_untouched_below_threshold() {
        let mut scores = accumulate_category_scores(&tags(&[ProfileTag::UrbanResident]));
        adjust_for_prominence(&mut scores, 42);
        let vehicle = scores.get(&Category::Vehicle).expect("vehicle score");
        assert_eq!(vehicle.score, 8.0);
    }

    #[test]
    fn no_tags_means_no_scores() {
        assert!(accumulate_category_scores(&BTreeSet::new()).is_empty());
    }
}
