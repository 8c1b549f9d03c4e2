//! Subprocess adapters.

mod python_scorer;

pub use python_scorer::PythonScorer;
