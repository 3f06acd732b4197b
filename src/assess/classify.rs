//! Percentage-band classification.
//!
//! Bands are a static ordered table scanned high-to-low. The final bound is
//! unbounded below, so the table is exhaustive by construction: every finite
//! percentage maps to exactly one category, and boundary values (40, 60, 80)
//! belong to the higher band.

use crate::domain::Category;

/// Ordered (lower bound, category) pairs, highest band first.
const BANDS: [(f64, Category); 4] = [
    (80.0, Category::VeryHigh),
    (60.0, Category::High),
    (40.0, Category::Medium),
    (f64::NEG_INFINITY, Category::Low),
];

/// Map a percentage to its band.
pub fn classify(percent: f64) -> Category {
    for (bound, category) in BANDS {
        if percent >= bound {
            return category;
        }
    }
    // Only NaN falls through every comparison.
    Category::Low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_belong_to_the_higher_band() {
        assert_eq!(classify(39.999), Category::Low);
        assert_eq!(classify(40.0), Category::Medium);
        assert_eq!(classify(59.999), Category::Medium);
        assert_eq!(classify(60.0), Category::High);
        assert_eq!(classify(79.999), Category::High);
        assert_eq!(classify(80.0), Category::VeryHigh);
    }

    #[test]
    fn classification_is_total_over_out_of_domain_percentages() {
        // The inference stage does not clamp, so these can occur with a
        // miscalibrated artifact.
        assert_eq!(classify(-12.5), Category::Low);
        assert_eq!(classify(131.0), Category::VeryHigh);
        assert_eq!(classify(f64::NAN), Category::Low);
    }

    #[test]
    fn classification_is_deterministic() {
        for p in [0.0, 39.999, 40.0, 55.5, 60.0, 79.999, 80.0, 100.0] {
            assert_eq!(classify(p), classify(p));
        }
    }
}
