//! Input/output helpers.
//!
//! - model JSON read/write (`model_file`)
//! - evaluation and curve exports (`export`)

pub mod export;
pub mod model_file;

pub use export::*;
pub use model_file::*;
