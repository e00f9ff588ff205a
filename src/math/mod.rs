//! Mathematical utilities: the standard normal distribution.

pub mod normal;

pub use normal::*;
