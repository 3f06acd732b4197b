//! ASCII/Unicode rendering for terminal output.
//!
//! This is intentionally "dumb" (fixed-size rows), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - probability gauge: `#` fill, `.` empty, `|` band boundaries (40/60/80)
//! - radar bars: one labeled row per feature axis on the shared 0–100 scale

use crate::features::vector::{FEATURE_COUNT, FEATURE_LABELS};

/// Render a horizontal probability gauge with band boundary markers.
///
/// The fill is clamped for display only (a bar cannot overflow its box); the
/// printed percentage keeps the raw value.
pub fn render_gauge(percent: f64, width: usize) -> String {
    let width = width.max(20);
    let filled = fill_cells(percent, width);

    let mut bar: Vec<char> = (0..width)
        .map(|i| if i < filled { '#' } else { '.' })
        .collect();

    // Band boundaries land on top of the fill so the reader can see which
    // band the estimate is in at a glance.
    for bound in [40.0, 60.0, 80.0] {
        let idx = ((bound / 100.0) * width as f64).round() as usize;
        if idx < width {
            bar[idx] = '|';
        }
    }

    format!("[{}] {percent:.1}%\n", bar.iter().collect::<String>())
}

/// Render the normalized profile as one bar per feature axis.
pub fn render_radar_bars(radar: &[f64; FEATURE_COUNT], width: usize) -> String {
    let width = width.max(10);
    let mut out = String::new();
    out.push_str("Profile (0-100 per axis):\n");

    for (label, &value) in FEATURE_LABELS.iter().zip(radar.iter()) {
        let filled = fill_cells(value, width);
        let bar: String = (0..width)
            .map(|i| if i < filled { '#' } else { '.' })
            .collect();
        out.push_str(&format!("{label:<10} [{bar}] {value:>5.1}\n"));
    }

    out
}

fn fill_cells(value: f64, width: usize) -> usize {
    let frac = (value / 100.0).clamp(0.0, 1.0);
    (frac * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_is_deterministic_and_shows_raw_percent() {
        let a = render_gauge(74.3, 50);
        let b = render_gauge(74.3, 50);
        assert_eq!(a, b);
        assert!(a.contains("74.3%"));
    }

    #[test]
    fn gauge_marks_all_three_band_boundaries() {
        let gauge = render_gauge(0.0, 50);
        assert_eq!(gauge.matches('|').count(), 3);
    }

    #[test]
    fn gauge_clamps_fill_but_not_label() {
        let over = render_gauge(130.0, 40);
        // Fill cannot exceed the box...
        assert!(over.contains("130.0%"));
        let bar = &over[over.find('[').unwrap()..=over.find(']').unwrap()];
        assert_eq!(bar.len(), 42);
        // ...and an empty gauge still fits the same box.
        let under = render_gauge(-5.0, 40);
        assert!(under.contains("-5.0%"));
        assert!(!under.contains('#'));
    }

    #[test]
    fn radar_bars_render_one_row_per_axis() {
        let radar = [75.0, 91.7, 60.0, 80.0, 80.0, 53.1, 100.0];
        let text = render_radar_bars(&radar, 30);
        for label in FEATURE_LABELS {
            assert!(text.contains(label), "missing axis row for {label}");
        }
        assert!(text.contains("100.0"));
    }
}
