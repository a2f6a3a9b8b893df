pub mod engine;
pub mod reasons;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Policy};

/// Per-category affinity accumulated from the customer's profile tags.
/// Once a contributing rule marks a category government-recommended, the
/// flag stays set for the rest of the computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryScore {
    pub score: f64,
    pub government_recommended: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAffinity {
    pub category: Category,
    pub government_recommended: bool,
    pub priority: f64,
}

impl TagAffinity {
    pub fn new(category: Category, government_recommended: bool, priority: f64) -> Self {
        Self {
            category,
            government_recommended,
            priority,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyRecommendations {
    pub government_policies: Vec<Policy>,
    pub private_policies: Vec<Policy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Explanation {
    pub reasons: std::collections::BTreeMap<Category, String>,
    pub suggestions: Vec<String>,
}
