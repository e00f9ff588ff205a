//! Reporting utilities: formatted terminal output for evaluations and models.

pub mod format;

pub use format::*;
