//! Domain layer: pure business logic with no I/O.

pub mod catalog;
pub mod dialogue;
pub mod foundation;
pub mod scoring;
pub mod user;
