//! Estimate assessment: percentage banding and rule-based advisories.
//!
//! Both halves are pure functions of their inputs:
//!
//! - `classify` maps a percentage onto a static band table
//! - `recommend` evaluates a fixed, ordered rule table against the profile

pub mod classify;
pub mod recommend;

pub use classify::*;
pub use recommend::*;
