//! Feature scaler artifact.
//!
//! The scaler is a transform fitted during training; this module only replays
//! its forward direction. Two fitted forms are supported, matching what the
//! training pipeline may have serialized:
//!
//! - standardization: `(x - mean) / scale`, per feature
//! - min-max: `(x - data_min) / (data_max - data_min)`, per feature

use std::path::Path;

use nalgebra::DVector;
use serde::Deserialize;

use crate::error::AppError;

/// A fitted per-feature scaler.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureScaler {
    /// Standardization to zero mean / unit variance.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// Min-max scaling onto [0, 1].
    Minmax { data_min: Vec<f64>, data_max: Vec<f64> },
}

impl FeatureScaler {
    /// Number of features this scaler was fitted on.
    pub fn feature_count(&self) -> usize {
        match self {
            FeatureScaler::Standard { mean, .. } => mean.len(),
            FeatureScaler::Minmax { data_min, .. } => data_min.len(),
        }
    }

    /// Apply the fitted forward transform.
    ///
    /// Fails with exit code 5 when the input length differs from the fitted
    /// feature count; the scaler and the caller's feature order were fixed
    /// together at training time, so a width mismatch means the artifacts and
    /// the pipeline disagree about the feature set.
    pub fn transform(&self, x: &DVector<f64>) -> Result<DVector<f64>, AppError> {
        let n = self.feature_count();
        if x.len() != n {
            return Err(AppError::new(
                5,
                format!("Scaler was fitted on {n} features, got {}.", x.len()),
            ));
        }

        let out = match self {
            FeatureScaler::Standard { mean, scale } => DVector::from_iterator(
                n,
                (0..n).map(|i| (x[i] - mean[i]) / scale[i]),
            ),
            FeatureScaler::Minmax { data_min, data_max } => DVector::from_iterator(
                n,
                (0..n).map(|i| (x[i] - data_min[i]) / (data_max[i] - data_min[i])),
            ),
        };

        Ok(out)
    }
}

/// Read and validate a scaler JSON file.
pub fn read_scaler_json(path: &Path) -> Result<FeatureScaler, AppError> {
    let file = super::open_artifact(path, "scaler")?;
    let scaler: FeatureScaler = serde_json::from_reader(file)
        .map_err(|e| AppError::new(4, format!("Invalid scaler JSON '{}': {e}", path.display())))?;
    validate(&scaler).map_err(|msg| {
        AppError::new(
            4,
            format!("Inconsistent scaler artifact '{}': {msg}", path.display()),
        )
    })?;
    Ok(scaler)
}

fn validate(scaler: &FeatureScaler) -> Result<(), String> {
    match scaler {
        FeatureScaler::Standard { mean, scale } => {
            if mean.is_empty() {
                return Err("empty mean vector.".to_string());
            }
            if mean.len() != scale.len() {
                return Err(format!(
                    "mean has {} entries but scale has {}.",
                    mean.len(),
                    scale.len()
                ));
            }
            if !mean.iter().chain(scale.iter()).all(|v| v.is_finite()) {
                return Err("non-finite mean/scale entry.".to_string());
            }
            if scale.iter().any(|&s| s == 0.0) {
                return Err("zero scale entry (division by zero at transform time).".to_string());
            }
        }
        FeatureScaler::Minmax { data_min, data_max } => {
            if data_min.is_empty() {
                return Err("empty data_min vector.".to_string());
            }
            if data_min.len() != data_max.len() {
                return Err(format!(
                    "data_min has {} entries but data_max has {}.",
                    data_min.len(),
                    data_max.len()
                ));
            }
            if !data_min.iter().chain(data_max.iter()).all(|v| v.is_finite()) {
                return Err("non-finite data_min/data_max entry.".to_string());
            }
            if data_min
                .iter()
                .zip(data_max.iter())
                .any(|(lo, hi)| hi <= lo)
            {
                return Err("data_max <= data_min for some feature.".to_string());
            }
        }
    }
    Ok(())
}
