pub mod predictor;
pub mod scorer;

use serde::{Deserialize, Serialize};

/// Scores at or above this are classified as prominent.
pub const PROMINENT_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProminenceResult {
    pub is_prominent: bool,
    pub prominence_score: u8,
}

impl ProminenceResult {
    pub fn from_score(prominence_score: u8) -> Self {
        Self {
            is_prominent: prominence_score >= PROMINENT_THRESHOLD,
            prominence_score,
        }
    }
}

impl Default for ProminenceResult {
    fn default() -> Self {
        Self {
            is_prominent: false,
            prominence_score: 0,
        }
    }
}
