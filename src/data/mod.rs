//! Profile sources.
//!
//! Real profiles arrive through the CLI flags or the batch CSV ingest; this
//! module adds seeded synthetic generation for demos and pipeline exercise.

pub mod sample;

pub use sample::*;
