use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::profile::encoder::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model artifact not found at {0}")]
    ArtifactMissing(PathBuf),
    #[error("model artifact is malformed: {0}")]
    ArtifactMalformed(String),
    #[error("model expects {expected} features, artifact has {got} weights")]
    FeatureShape { expected: usize, got: usize },
    #[error("prediction produced a non-finite value")]
    NonFinite,
}

/// Maps a feature vector to a propensity in [0, 1].
pub trait Predictor: Send + Sync {
    fn name(&self) -> &'static str;
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError>;
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    weights: Vec<f64>,
    bias: f64,
}

/// Logistic-regression predictor backed by a JSON weight artifact. The
/// artifact is read once at load; no file handle survives construction.
#[derive(Debug)]
pub struct ModelPredictor {
    weights: Vec<f64>,
    bias: f64,
    artifact_hash: String,
}

impl ModelPredictor {
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        if !path.exists() {
            return Err(PredictError::ArtifactMissing(path.to_path_buf()));
        }
        let raw = fs::read(path)
            .map_err(|error| PredictError::ArtifactMalformed(error.to_string()))?;
        let artifact: ModelArtifact = serde_json::from_slice(&raw)
            .map_err(|error| PredictError::ArtifactMalformed(error.to_string()))?;
        if artifact.weights.len() != FEATURE_COUNT {
            return Err(PredictError::FeatureShape {
                expected: FEATURE_COUNT,
                got: artifact.weights.len(),
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(&raw);
        let artifact_hash = format!("{:x}", hasher.finalize());

        Ok(Self {
            weights: artifact.weights,
            bias: artifact.bias,
            artifact_hash,
        })
    }

    pub fn artifact_hash(&self) -> &str {
        &self.artifact_hash
    }
}

impl Predictor for ModelPredictor {
    fn name(&self) -> &'static str {
        "model"
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let logit: f64 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        let propensity = sigmoid(logit);
        if !propensity.is_finite() {
            return Err(PredictError::NonFinite);
        }
        Ok(propensity)
    }
}

/// Deterministic additive formula over the feature vector, used whenever no
/// predictive artifact is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaPredictor;

impl Predictor for FormulaPredictor {
    fn name(&self) -> &'static str {
        "formula"
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let income_index = features[3];
        let vintage = features[4];
        let claim_amount = features[5];
        let policies_count = features[6];

        let mut score = 0.0;
        score += income_index * 10.0;
        score += (policies_count * 5.0).min(30.0);
        score += (vintage * 3.0).min(30.0);
        score -= ((claim_amount / 50_000.0) * 10.0).min(20.0);
        let score = score.clamp(0.0, 100.0);

        if !score.is_finite() {
            return Err(PredictError::NonFinite);
        }
        Ok(score / 100.0)
    }
}

/// Probes the artifact once and picks the predictor for the process lifetime.
/// A missing or broken artifact is a normal condition, not an error.
pub fn select_predictor(artifact_path: &Path) -> Arc<dyn Predictor> {
    match ModelPredictor::load(artifact_path) {
        Ok(model) => {
            info!(
                "loaded prominence model from {} (sha256 {})",
                artifact_path.display(),
                model.artifact_hash()
            );
            Arc::new(model)
        }
        Err(error) => {
            warn!("predictive model unavailable, using fallback formula: {error}");
            Arc::new(FormulaPredictor)
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(income_index: f64, vintage: f64, claim: f64, count: f64) -> FeatureVector {
        [0.0, 0.0, 1.0, income_index, vintage, claim, count, 1.0, 0.0, 0.0]
    }

    #[test]
    fn formula_matches_the_reference_breakdown() {
        // 40 income + 20 policies + 18 vintage - 0 claim = 78
        let predictor = FormulaPredictor;
        let p = predictor
            .predict(&features(4.0, 6.0, 0.0, 4.0))
            .expect("predict");
        assert!((p - 0.78).abs() < 1e-9);
    }

    #[test]
    fn formula_caps_each_component() {
        let predictor = FormulaPredictor;
        // 40 + 30 (capped) + 30 (capped) - 20 (capped) = 80
        let p = predictor
            .predict(&features(4.0, 50.0, 10_000_000.0, 99.0))
            .expect("predict");
        assert!((p - 0.80).abs() < 1e-9);
    }

    #[test]
    fn formula_never_goes_negative() {
        let predictor = FormulaPredictor;
        let p = predictor
            .predict(&features(0.0, 0.0, 5_000_000.0, 0.0))
            .expect("predict");
        assert_eq!(p, 0.0);
    }

    #[test]
    fn missing_artifact_is_reported_as_such() {
        let error = ModelPredictor::load(Path::new("/nonexistent/prominence_model.json"))
            .expect_err("load should fail");
        assert!(matches!(error, PredictError::ArtifactMissing(_)));
    }

    #[test]
    fn selection_falls_back_when_artifact_is_absent() {
        let predictor = select_predictor(Path::new("/nonexistent/prominence_model.json"));
        assert_eq!(predictor.name(), "formula");
    }

    #[test]
    fn sigmoid_stays_in_unit_interval() {
        for logit in [-50.0, -1.0, 0.0, 1.0, 50.0] {
            let p = sigmoid(logit);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
