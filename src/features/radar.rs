//! Radar-axis normalization for profile visualization.
//!
//! Each feature is rescaled onto a shared 0–100 axis using the documented
//! domain ranges so the presentation layers can draw all seven on one
//! polygon. Output is visualization-only and never feeds back into
//! inference. There is no clamping: a value outside its documented range
//! lands outside [0, 100], which is exactly what a reviewer of the chart
//! should see.

use crate::domain::StudentProfile;
use crate::features::vector::{self, FEATURE_COUNT};

/// Per-feature (min, max) pairs, in model feature order.
///
/// Note the rating/SOP/LOR axes run from 0 (not their domain minimum of 1)
/// so that the axis reads as "fraction of 5".
pub const AXIS_RANGES: [(f64, f64); FEATURE_COUNT] = [
    (260.0, 340.0), // GRE
    (0.0, 120.0),   // TOEFL
    (0.0, 5.0),     // university rating
    (0.0, 5.0),     // SOP
    (0.0, 5.0),     // LOR
    (6.8, 10.0),    // CGPA
    (0.0, 1.0),     // research
];

/// Rescale each feature of the profile onto the common 0–100 axis.
pub fn normalize(profile: &StudentProfile) -> [f64; FEATURE_COUNT] {
    let raw = vector::build(profile);
    let mut out = [0.0; FEATURE_COUNT];
    for (i, (min, max)) in AXIS_RANGES.iter().enumerate() {
        out[i] = (raw[i] - min) / (max - min) * 100.0;
    }
    out
}
