//! Sampling a curve family for display.
//!
//! Nothing here feeds back into evaluation: a family is described as a lazy
//! stream of `(intensity, state, exceedance)` points, and any renderer
//! (terminal plot, TUI chart, CSV export) consumes that stream through
//! `CurveSink` or directly.

use serde::Serialize;

use crate::error::{FragilityError, FragilityResult};
use crate::fragility::family::CurveFamily;
use crate::fragility::probability::StateProbabilities;

/// Number of intensity samples used when a plot is requested alongside an evaluation.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Lower end of the default plotting range.
pub const DEFAULT_RANGE_START: f64 = 0.001;

/// One sampled point of one damage state's curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint<'a> {
    pub intensity: f64,
    pub state: &'a str,
    pub exceedance: f64,
}

/// Intensity interval to sample, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub start: f64,
    pub end: f64,
}

impl SampleRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `(0.001, 2 × intensity)`; the lower end shrinks for very small intensities
    /// so the range stays non-empty, and the upper end saturates at `f64::MAX`.
    pub fn around(intensity: f64) -> Self {
        let end = if intensity.is_finite() {
            (2.0 * intensity).min(f64::MAX)
        } else {
            2.0 * intensity
        };
        Self {
            start: DEFAULT_RANGE_START.min(end / 100.0),
            end,
        }
    }

    pub(crate) fn validate(&self, count: usize) -> FragilityResult<()> {
        let ok = self.start.is_finite()
            && self.end.is_finite()
            && self.start > 0.0
            && self.end > self.start
            && count >= 2;
        if ok {
            Ok(())
        } else {
            Err(FragilityError::InvalidRange {
                start: self.start,
                end: self.end,
                count,
            })
        }
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> + Clone {
    let step = if count > 1 {
        (end - start) / (count as f64 - 1.0)
    } else {
        0.0
    };
    (0..count).map(move |i| {
        // Pin the last sample so rounding never overshoots `end`.
        if i + 1 == count && count > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Lazily sample every state of `family` over `range`.
///
/// The caller must have validated the measure type and the range.
pub(crate) fn sample_family(
    family: &CurveFamily,
    range: SampleRange,
    count: usize,
) -> impl Iterator<Item = CurvePoint<'_>> + '_ {
    linspace(range.start, range.end, count).flat_map(move |x| {
        family.states().iter().map(move |s| CurvePoint {
            intensity: x,
            state: s.name.as_str(),
            exceedance: s.params.exceedance_at(x),
        })
    })
}

/// Sampled curve of one state, plus its exceedance at the query intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSeries {
    pub state: String,
    pub points: Vec<(f64, f64)>,
    pub exceedance_at_query: f64,
}

/// Everything a renderer needs to draw a fragility family around one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFamilySamples {
    /// Intensity measure type; used as the x-axis label.
    pub imt: String,
    pub query_intensity: f64,
    pub range: SampleRange,
    pub series: Vec<StateSeries>,
}

impl CurveFamilySamples {
    /// Group a described family per state, in the state order of `result`.
    pub fn collect<'a>(
        imt: &str,
        range: SampleRange,
        result: &StateProbabilities,
        points: impl IntoIterator<Item = CurvePoint<'a>>,
    ) -> Self {
        let mut series: Vec<StateSeries> = result
            .states()
            .iter()
            .zip(result.exceedances())
            .map(|(state, &e)| StateSeries {
                state: state.clone(),
                points: Vec::new(),
                exceedance_at_query: e,
            })
            .collect();

        for p in points {
            if let Some(s) = series.iter_mut().find(|s| s.state == p.state) {
                s.points.push((p.intensity, p.exceedance));
            }
        }

        Self {
            imt: imt.to_string(),
            query_intensity: result.intensity(),
            range,
            series,
        }
    }

    pub fn x_label(&self) -> &str {
        &self.imt
    }

    pub fn y_label(&self) -> &'static str {
        "Damage state probability (cumulative)"
    }
}

/// A display consumer for sampled fragility families.
pub trait CurveSink {
    fn render(&mut self, samples: &CurveFamilySamples);
}
