//! Dialogue driving for the terminal client.

mod engine;

pub use engine::DialogueEngine;
