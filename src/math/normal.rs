//! Standard normal CDF for lognormal fragility curves.
//!
//! `Φ(z) = ½ · erfc(−z/√2)`
//!
//! `erfc` is evaluated in two regimes:
//!
//! - `x < 1.5`: `1 − erf(x)` with the positive-term series
//!   `erf(x) = 2/√π · e^{−x²} · Σ 2ⁿ x^{2n+1} / (2n+1)!!`.
//!   All terms share a sign, so there is no cancellation inside the sum.
//! - `x ≥ 1.5`: the Laplace continued fraction
//!   `erfc(x) = e^{−x²}/√π · 1/(x + ½/(x + 1/(x + 3⁄2/(x + …))))`,
//!   evaluated with the modified Lentz algorithm. This keeps full relative
//!   precision deep in the tail where `1 − erf(x)` would round to zero.
//!
//! Relative error against a reference `erfc` stays below `1e-13` on `[0, 20]`.

/// `√π`.
const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Switch point between the series and the continued fraction.
const SERIES_LIMIT: f64 = 1.5;

/// Beyond this `e^{−x²}` underflows and `erfc(x)` is zero in `f64`.
const UNDERFLOW_LIMIT: f64 = 27.3;

const MAX_TERMS: usize = 500;

/// Lentz guard against division by zero.
const TINY: f64 = 1e-300;

/// Complementary error function.
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    if x < SERIES_LIMIT {
        return 1.0 - erf_series(x);
    }
    if x > UNDERFLOW_LIMIT {
        return 0.0;
    }
    erfc_continued_fraction(x)
}

/// Cumulative distribution function of the standard normal distribution.
///
/// `standard_normal_cdf(0.0)` is exactly `0.5`.
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

fn erf_series(x: f64) -> f64 {
    let two_x2 = 2.0 * x * x;
    let mut term = x;
    let mut sum = x;
    for n in 1..MAX_TERMS {
        term *= two_x2 / (2 * n + 1) as f64;
        sum += term;
        if term <= sum.abs() * f64::EPSILON {
            break;
        }
    }
    2.0 / SQRT_PI * (-x * x).exp() * sum
}

fn erfc_continued_fraction(x: f64) -> f64 {
    let mut f = x;
    let mut c = x;
    let mut d = 0.0;
    for n in 1..MAX_TERMS {
        let a = n as f64 * 0.5;

        d = x + a * d;
        if d.abs() < TINY {
            d = TINY;
        }
        d = 1.0 / d;

        c = x + a / c;
        if c.abs() < TINY {
            c = TINY;
        }

        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < f64::EPSILON {
            break;
        }
    }
    (-x * x).exp() / (SQRT_PI * f)
}
