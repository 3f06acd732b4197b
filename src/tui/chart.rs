//! Plotters-powered radar chart widget for Ratatui.
//!
//! Why Plotters instead of hand-placed characters?
//! - clean line rasterization for the polygon edges
//! - easy to extend later (grid rings, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::features::vector::FEATURE_COUNT;

/// A lightweight, render-only radar chart description.
///
/// The widget is intentionally data-driven: the seven axis values are
/// computed outside the render call (by the profile normalizer), so
/// `render()` only draws.
pub struct RadarChart<'a> {
    /// Normalized 0–100 axis values, in model feature order.
    pub axes: &'a [f64; FEATURE_COUNT],
}

impl Widget for RadarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Radar area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let profile = polygon_points(self.axes, 1.0);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(-1.25..1.25, -1.25..1.25)?;

            // No mesh/axes: a radar reads through its spokes and outline, and
            // terminal cells are too coarse for tick labels anyway.
            chart.configure_mesh().disable_x_mesh().disable_y_mesh().draw()?;

            let outline_color = RGBColor(128, 128, 128);
            let profile_color = RGBColor(0, 255, 255); // cyan

            // 1) Spokes from the center to each axis tip.
            for i in 0..FEATURE_COUNT {
                let (x, y) = vertex(i, 1.0);
                chart.draw_series(LineSeries::new(
                    [(0.0, 0.0), (x, y)],
                    &outline_color,
                ))?;
            }

            // 2) Outline: the 100% polygon.
            chart.draw_series(LineSeries::new(
                closed_ring(1.0),
                &outline_color,
            ))?;

            // 3) The profile polygon itself.
            chart.draw_series(LineSeries::new(
                profile.iter().copied(),
                &profile_color,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Vertex `i` of the radar at radius `r`, starting at twelve o'clock and
/// walking clockwise.
fn vertex(i: usize, r: f64) -> (f64, f64) {
    let angle = std::f64::consts::FRAC_PI_2 - (i as f64) * std::f64::consts::TAU / FEATURE_COUNT as f64;
    (r * angle.cos(), r * angle.sin())
}

fn closed_ring(r: f64) -> Vec<(f64, f64)> {
    (0..=FEATURE_COUNT).map(|i| vertex(i % FEATURE_COUNT, r)).collect()
}

/// Closed polygon through each axis value (clamped for display: the polygon
/// must stay inside the chart box even for out-of-range inputs).
fn polygon_points(axes: &[f64; FEATURE_COUNT], max_radius: f64) -> Vec<(f64, f64)> {
    (0..=FEATURE_COUNT)
        .map(|i| {
            let idx = i % FEATURE_COUNT;
            let r = (axes[idx] / 100.0).clamp(0.0, 1.0) * max_radius;
            vertex(idx, r)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_is_closed() {
        let axes = [75.0, 91.7, 60.0, 80.0, 80.0, 53.1, 100.0];
        let points = polygon_points(&axes, 1.0);
        assert_eq!(points.len(), FEATURE_COUNT + 1);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn full_axes_trace_the_unit_ring() {
        let axes = [100.0; FEATURE_COUNT];
        let points = polygon_points(&axes, 1.0);
        for (x, y) in &points[..FEATURE_COUNT] {
            let r = (x * x + y * y).sqrt();
            assert!((r - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn display_clamp_keeps_polygon_inside_the_box() {
        let mut axes = [50.0; FEATURE_COUNT];
        axes[0] = 250.0; // out-of-range input must not escape the chart
        let points = polygon_points(&axes, 1.0);
        for (x, y) in points {
            assert!((x * x + y * y).sqrt() <= 1.0 + 1e-9);
        }
    }
}
