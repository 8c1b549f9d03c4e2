//! Static question catalog: the ordered list of intake questions.

#[allow(clippy::module_inception)]
mod catalog;
mod question;

pub use catalog::QuestionCatalog;
pub use question::{Question, QuestionInput};
