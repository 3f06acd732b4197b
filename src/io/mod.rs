//! Input/output helpers.
//!
//! - profile CSV ingest + validation (`batch`)
//! - estimate JSON and results CSV exports (`export`)

pub mod batch;
pub mod export;

pub use batch::*;
pub use export::*;
