//! Scoring boundary types.

mod result;

pub use result::ScoringResult;
