//! Pretrained artifact loading and process-wide caching.
//!
//! The predictor depends on two read-only artifacts produced by the training
//! pipeline:
//!
//! - `model.json`: the regression network (dense layers + activations)
//! - `scaler.json`: the feature scaler fitted on the same training data
//!
//! Both are opaque capability objects from the pipeline's point of view: the
//! scaler exposes a forward transform, the network a forward pass, and this
//! crate never inspects them beyond geometric validation at load time.
//! They are loaded lazily on first use and cached for the lifetime of the
//! process; nothing mutates them after load.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::AppError;

pub mod network;
pub mod scaler;

pub use network::{Activation, RegressionNetwork};
pub use scaler::FeatureScaler;

/// File name of the regression network inside the artifact directory.
pub const MODEL_FILE: &str = "model.json";
/// File name of the feature scaler inside the artifact directory.
pub const SCALER_FILE: &str = "scaler.json";

const ARTIFACT_DIR_ENV: &str = "ADMIT_ARTIFACT_DIR";

/// The loaded model + scaler pair, ready for repeated read-only use.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub network: RegressionNetwork,
    pub scaler: FeatureScaler,
}

/// Resolve the artifact directory.
///
/// Precedence: explicit `--artifacts` flag, then `ADMIT_ARTIFACT_DIR` from
/// the environment (a `.env` file is honored), then `./artifacts`.
pub fn resolve_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    dotenvy::dotenv().ok();
    if let Ok(dir) = std::env::var(ARTIFACT_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from("artifacts")
}

/// Load both artifacts from `dir`.
///
/// A missing file fails with exit code 3 and a remediation hint; a file that
/// is present but fails to deserialize (or is internally inconsistent) fails
/// with exit code 4. Nothing partial is ever returned.
pub fn load(dir: &Path) -> Result<ArtifactSet, AppError> {
    let network = network::read_network_json(&dir.join(MODEL_FILE))?;
    let scaler = scaler::read_scaler_json(&dir.join(SCALER_FILE))?;
    Ok(ArtifactSet { network, scaler })
}

/// Load once per process and reuse for every later call.
///
/// The first caller's directory wins; a failed first load is sticky and
/// replays the same error on every subsequent call. Concurrent first use is
/// serialized by the holder, so the artifacts are never loaded twice.
pub fn load_shared(dir: &Path) -> Result<&'static ArtifactSet, AppError> {
    static SHARED: OnceLock<Result<ArtifactSet, AppError>> = OnceLock::new();
    SHARED.get_or_init(|| load(dir)).as_ref().map_err(Clone::clone)
}

/// Open an artifact file, distinguishing "missing" from other I/O failures.
pub(crate) fn open_artifact(path: &Path, what: &str) -> Result<File, AppError> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::new(
                3,
                format!(
                    "Missing {what} artifact '{}'. Copy the trained {what} file there, \
                     or point --artifacts / ADMIT_ARTIFACT_DIR at the right directory.",
                    path.display()
                ),
            )
        } else {
            AppError::new(
                4,
                format!("Failed to open {what} artifact '{}': {e}", path.display()),
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reports_missing_model_with_exit_code_3() {
        let dir = Path::new("definitely-not-a-real-artifact-dir");
        let err = load(dir).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains(MODEL_FILE));
    }

    #[test]
    fn resolve_dir_prefers_explicit_flag() {
        let dir = resolve_dir(Some(Path::new("/tmp/custom")));
        assert_eq!(dir, PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn shipped_demo_artifacts_load_and_agree_on_feature_count() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts");
        let set = load(&dir).unwrap();
        assert_eq!(set.scaler.feature_count(), set.network.input_count());
        assert_eq!(set.network.output_count(), 1);
    }

    #[test]
    fn shipped_demo_artifacts_separate_strong_and_weak_profiles() {
        use crate::app::pipeline;
        use crate::domain::StudentProfile;

        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts");
        let set = load(&dir).unwrap();

        let strong = StudentProfile {
            gre: 320,
            toefl: 110,
            university_rating: 3,
            sop: 4.0,
            lor: 4.0,
            cgpa: 8.5,
            research: true,
        };
        let weak = StudentProfile {
            gre: 300,
            toefl: 90,
            university_rating: 2,
            sop: 3.0,
            lor: 3.0,
            cgpa: 7.5,
            research: false,
        };

        let strong_out = pipeline::evaluate(&strong, &set).unwrap();
        let weak_out = pipeline::evaluate(&weak, &set).unwrap();

        // The demo artifacts are calibrated on the usual graduate-admission
        // cohort: a solid profile lands well above the backup cutoff, a weak
        // one well below it.
        assert!(strong_out.estimate.probability_percent > 60.0);
        assert!(strong_out.estimate.probability_percent < 100.0);
        assert!(weak_out.estimate.probability_percent < 60.0);
        assert!(weak_out.estimate.probability_percent > 0.0);
        assert!(
            strong_out.estimate.probability_percent > weak_out.estimate.probability_percent
        );
        // No profile advisories for the strong profile; the weak one fires
        // the full set.
        assert!(strong_out.estimate.advisories.is_empty());
        assert_eq!(weak_out.estimate.advisories.len(), 7);
    }
}
