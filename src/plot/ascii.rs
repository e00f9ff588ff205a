//! ASCII plotting of fragility families for terminal output.
//!
//! This is a fixed-size character grid, optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - one curve per damage state, drawn with the state's index glyph (`1`, `2`, ...)
//! - `:` vertical reference at the query intensity
//! - `.` horizontal references at each state's exceedance, from 0 to the query
//! - `x` the evaluated points themselves
//!
//! Axes follow the usual fragility plot: intensity on `[0, range.end]`,
//! cumulative probability on `[0, 1]`.

use crate::fragility::{CurveFamilySamples, CurveSink};

/// `CurveSink` that renders into a string buffer.
#[derive(Debug, Clone)]
pub struct AsciiPlot {
    pub width: usize,
    pub height: usize,
    rendered: Option<String>,
}

impl AsciiPlot {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rendered: None,
        }
    }

    /// Text of the last rendered plot.
    pub fn output(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn into_output(self) -> Option<String> {
        self.rendered
    }
}

impl CurveSink for AsciiPlot {
    fn render(&mut self, samples: &CurveFamilySamples) {
        self.rendered = Some(render_fragility_plot(samples, self.width, self.height));
    }
}

/// Glyph for the state at `index` (`1`..`9`, then `*`).
pub fn state_glyph(index: usize) -> char {
    char::from_digit(index as u32 + 1, 10)
        .filter(|_| index < 9)
        .unwrap_or('*')
}

/// Render a sampled fragility family.
pub fn render_fragility_plot(samples: &CurveFamilySamples, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let x_max = if samples.range.end.is_finite() && samples.range.end > 0.0 {
        samples.range.end
    } else {
        1.0
    };

    let mut grid = vec![vec![' '; width]; height];

    // Curves first so references only fill the gaps.
    for (idx, series) in samples.series.iter().enumerate() {
        draw_curve(&mut grid, &series.points, x_max, state_glyph(idx));
    }

    let qx = map_x(samples.query_intensity, x_max, width);
    let top = samples
        .series
        .iter()
        .map(|s| s.exceedance_at_query)
        .fold(0.0_f64, f64::max);
    for row in map_y(top, height)..height {
        put_if_empty(&mut grid, qx, row, ':');
    }
    for series in &samples.series {
        let row = map_y(series.exceedance_at_query, height);
        for col in 0..qx {
            put_if_empty(&mut grid, col, row, '.');
        }
    }

    for series in &samples.series {
        let row = map_y(series.exceedance_at_query, height);
        grid[row][qx] = 'x';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}=[0.000, {x_max:.3}] | P(DS>=ds)=[0, 1] | query={:.3}\n",
        samples.x_label(),
        samples.query_intensity
    ));

    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let legend: Vec<String> = samples
        .series
        .iter()
        .enumerate()
        .map(|(idx, s)| format!("{}={}", state_glyph(idx), s.state))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');

    out
}

fn put_if_empty(grid: &mut [Vec<char>], x: usize, y: usize, ch: char) {
    if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        if *cell == ' ' {
            *cell = ch;
        }
    }
}

fn map_x(t: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = (t / x_max).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = y.clamp(0.0, 1.0);
    // p=1 is the top row
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_max: f64, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, p) in curve {
        let x = map_x(t, x_max, width);
        let y = map_y(p, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => put_if_empty(grid, x, y, ch),
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 {
            put_if_empty(grid, x0 as usize, y0 as usize, ch);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
