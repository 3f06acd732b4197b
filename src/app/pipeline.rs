//! Shared evaluation pipeline used by every front-end (CLI, batch, TUI).
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! features -> scale -> forward pass -> percentage -> {band, advisories, radar}
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use rayon::prelude::*;

use crate::artifacts::ArtifactSet;
use crate::assess;
use crate::domain::{AdmissionEstimate, StudentProfile};
use crate::error::AppError;
use crate::features::{radar, vector};

/// All computed outputs of a single evaluation.
#[derive(Debug, Clone)]
pub struct EvalOutput {
    pub profile: StudentProfile,
    /// Raw network output before the percentage mapping (nominally in [0, 1]).
    pub raw_output: f64,
    pub estimate: AdmissionEstimate,
    /// Per-feature 0–100 radar axes (visualization only).
    pub radar: [f64; vector::FEATURE_COUNT],
}

/// Run the full evaluation pipeline for one profile.
pub fn evaluate(profile: &StudentProfile, artifacts: &ArtifactSet) -> Result<EvalOutput, AppError> {
    // 1) Raw feature vector in the fitted column order.
    let raw = vector::build(profile);

    // 2) Replay the fitted scaler transform (width-checked on first use).
    let scaled = artifacts.scaler.transform(&raw)?;

    // 3) Forward pass through the regression network.
    let raw_output = artifacts.network.predict(&scaled)?;

    // 4) Map to a percentage. Deliberately unclamped: the network was trained
    //    to emit [0, 1] but is not architecturally constrained to it, and a
    //    clamp here would hide a miscalibrated artifact.
    let percent = raw_output * 100.0;

    // 5) Band and advisories are pure functions of profile + percentage.
    let category = assess::classify(percent);
    let advisories = assess::recommend(profile, percent);

    // 6) Radar axes for the presentation layers.
    let radar = radar::normalize(profile);

    Ok(EvalOutput {
        profile: profile.clone(),
        raw_output,
        estimate: AdmissionEstimate {
            probability_percent: percent,
            category,
            advisories,
        },
        radar,
    })
}

/// One batch row: the ingest (or sample) id plus its evaluation.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub id: String,
    pub output: EvalOutput,
}

/// Evaluate many profiles, preserving input order.
///
/// Evaluations are independent and the artifacts are read-only, so this is a
/// pure parallel map with no locking.
pub fn evaluate_batch(
    profiles: &[StudentProfile],
    artifacts: &ArtifactSet,
) -> Result<Vec<EvalOutput>, AppError> {
    profiles
        .par_iter()
        .map(|profile| evaluate(profile, artifacts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::FeatureScaler;
    use crate::domain::{Advisory, Category};

    /// An artifact pair with hand-picked geometry: the scaler divides each
    /// feature by its axis span and the head averages the result, so the
    /// output is easy to reason about in tests.
    fn test_artifacts() -> ArtifactSet {
        let scaler = FeatureScaler::Minmax {
            data_min: vec![260.0, 0.0, 0.0, 0.0, 0.0, 6.8, 0.0],
            data_max: vec![340.0, 120.0, 5.0, 5.0, 5.0, 10.0, 1.0],
        };
        let network = network_averaging_head();
        ArtifactSet { network, scaler }
    }

    fn network_averaging_head() -> crate::artifacts::RegressionNetwork {
        let w = 1.0 / 7.0;
        serde_json::from_value(serde_json::json!({
            "layers": [{
                "weights": [[w, w, w, w, w, w, w]],
                "bias": [0.0],
                "activation": "linear",
            }]
        }))
        .unwrap()
    }

    fn profile() -> StudentProfile {
        StudentProfile {
            gre: 320,
            toefl: 110,
            university_rating: 3,
            sop: 4.0,
            lor: 4.0,
            cgpa: 8.5,
            research: true,
        }
    }

    #[test]
    fn evaluate_is_bit_identical_across_calls() {
        let artifacts = test_artifacts();
        let p = profile();
        let first = evaluate(&p, &artifacts).unwrap();
        for _ in 0..5 {
            let again = evaluate(&p, &artifacts).unwrap();
            assert_eq!(again.raw_output.to_bits(), first.raw_output.to_bits());
            assert_eq!(
                again.estimate.probability_percent.to_bits(),
                first.estimate.probability_percent.to_bits()
            );
            assert_eq!(again.estimate.category, first.estimate.category);
            assert_eq!(again.estimate.advisories, first.estimate.advisories);
        }
    }

    #[test]
    fn evaluate_wires_percentage_into_band_and_backup_rule() {
        let artifacts = test_artifacts();
        let out = evaluate(&profile(), &artifacts).unwrap();

        // The averaging head emits the mean of the unit-scaled features:
        // (0.75 + 0.9167 + 0.6 + 0.8 + 0.8 + 0.5313 + 1.0) / 7 ~= 0.771.
        assert!(out.estimate.probability_percent > 70.0);
        assert!(out.estimate.probability_percent < 85.0);
        assert_eq!(
            out.estimate.category,
            assess::classify(out.estimate.probability_percent)
        );
        // All profile thresholds satisfied and odds above 60: no advisories.
        assert!(out.estimate.advisories.is_empty());
    }

    #[test]
    fn evaluate_fires_backup_advisory_below_sixty() {
        let artifacts = test_artifacts();
        let weak = StudentProfile {
            gre: 280,
            toefl: 60,
            university_rating: 1,
            sop: 4.0,
            lor: 4.0,
            cgpa: 8.5,
            research: false,
        };
        let out = evaluate(&weak, &artifacts).unwrap();
        assert!(out.estimate.probability_percent < 60.0);
        assert!(out.estimate.advisories.contains(&Advisory::AddBackupSchools));
        assert!(out.estimate.advisories.contains(&Advisory::GainResearch));
    }

    #[test]
    fn evaluate_rejects_scaler_width_mismatch() {
        let scaler = FeatureScaler::Standard {
            mean: vec![0.0; 5],
            scale: vec![1.0; 5],
        };
        let artifacts = ArtifactSet {
            network: network_averaging_head(),
            scaler,
        };
        let err = evaluate(&profile(), &artifacts).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn batch_preserves_input_order() {
        let artifacts = test_artifacts();
        let mut profiles = Vec::new();
        for gre in [260, 280, 300, 320, 340] {
            let mut p = profile();
            p.gre = gre;
            profiles.push(p);
        }

        let outputs = evaluate_batch(&profiles, &artifacts).unwrap();
        assert_eq!(outputs.len(), profiles.len());
        for (input, output) in profiles.iter().zip(&outputs) {
            assert_eq!(&output.profile, input);
        }
        // Monotone in GRE for the averaging head.
        for pair in outputs.windows(2) {
            assert!(
                pair[0].estimate.probability_percent < pair[1].estimate.probability_percent
            );
        }
    }

    #[test]
    fn classification_tracks_percentage_bands_end_to_end() {
        let artifacts = test_artifacts();
        let strong = evaluate(&profile(), &artifacts).unwrap();
        assert!(matches!(
            strong.estimate.category,
            Category::High | Category::VeryHigh
        ));
    }
}
