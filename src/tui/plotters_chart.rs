//! Plotters-powered fragility chart widget for Ratatui.
//!
//! Plotters gives us axis/mesh rendering and line series for free; its output is
//! written into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::fragility::CurveFamilySamples;

/// Per-state line colors; reused cyclically for large families.
pub const STATE_PALETTE: [(u8, u8, u8); 6] = [
    (0, 255, 255), // cyan
    (0, 255, 0),   // green
    (255, 255, 0), // yellow
    (255, 128, 0), // orange
    (255, 0, 0),   // red
    (255, 0, 255), // magenta
];

pub fn state_rgb(index: usize) -> (u8, u8, u8) {
    STATE_PALETTE[index % STATE_PALETTE.len()]
}

/// A render-only chart description.
///
/// All series are computed before rendering so `render()` only draws.
pub struct FragilityChart<'a> {
    pub samples: &'a CurveFamilySamples,
    /// X bounds (intensity).
    pub x_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for FragilityChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, 0.0..1.0)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Reference lines at the query intensity and at each state's
            // exceedance there; drawn first so curves stay on top.
            let reference = RGBColor(128, 128, 128);
            let q = self.samples.query_intensity;
            let top = self
                .samples
                .series
                .iter()
                .map(|s| s.exceedance_at_query)
                .fold(0.0_f64, f64::max);
            chart.draw_series(LineSeries::new(vec![(q, 0.0), (q, top)], &reference))?;
            for s in &self.samples.series {
                let e = s.exceedance_at_query;
                chart.draw_series(LineSeries::new(vec![(x0, e), (q, e)], &reference))?;
            }

            for (idx, s) in self.samples.series.iter().enumerate() {
                let (r, g, b) = state_rgb(idx);
                let color = RGBColor(r, g, b);
                chart.draw_series(LineSeries::new(s.points.iter().copied(), &color))?;
                chart.draw_series(std::iter::once(Pixel::new(
                    (q, s.exceedance_at_query),
                    WHITE,
                )))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
