//! `fragility-curves` library crate.
//!
//! The binary (`frag`) is a thin wrapper around this library so that:
//!
//! - the evaluator is testable without spawning processes
//! - the model can be embedded elsewhere (batch jobs, services, notebooks)
//! - presentation (report, plot, tui) stays separate from the core in `fragility`

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fragility;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
