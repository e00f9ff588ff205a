//! Terminal rendering of fragility families.

pub mod ascii;

pub use ascii::*;
