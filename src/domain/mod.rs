//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the applicant profile (`StudentProfile`)
//! - evaluation outputs (`AdmissionEstimate`, `Category`, `Advisory`)
//! - the saved estimate file schema (`EstimateFile`)

pub mod types;

pub use types::*;
