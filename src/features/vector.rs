//! Feature vector assembly.
//!
//! The scaler and the network were fitted on vectors in one exact column
//! order. Reordering silently corrupts inference, so the order is part of the
//! contract and lives here and nowhere else:
//!
//! `[GRE, TOEFL, university rating, SOP, LOR, CGPA, research]`

use nalgebra::DVector;

use crate::domain::StudentProfile;

/// Number of model features.
pub const FEATURE_COUNT: usize = 7;

/// Column labels, in model feature order.
pub const FEATURE_LABELS: [&str; FEATURE_COUNT] =
    ["GRE", "TOEFL", "University", "SOP", "LOR", "CGPA", "Research"];

/// Assemble the raw (unscaled) feature vector for one profile.
///
/// Pure numeric conversion; range validation is the input boundary's job.
pub fn build(profile: &StudentProfile) -> DVector<f64> {
    DVector::from_row_slice(&[
        f64::from(profile.gre),
        f64::from(profile.toefl),
        f64::from(profile.university_rating),
        profile.sop,
        profile.lor,
        profile.cgpa,
        if profile.research { 1.0 } else { 0.0 },
    ])
}
