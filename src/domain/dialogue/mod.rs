//! Dialogue domain: the linear intake state machine, its answers,
//! transcript, and display formatting.

mod answers;
pub mod format;
mod session;
mod state;
mod transcript;

pub use answers::AnswerSet;
pub use session::{
    ConfirmOutcome, DialogueSession, Reveal, SubmissionOutcome, CLOSING_PROMPT_DELAY,
    FIRST_QUESTION_DELAY, NEXT_QUESTION_DELAY, RECOMMENDATION_DELAY, SCORER_MESSAGE_DELAY,
};
pub use state::DialoguePhase;
pub use transcript::{Speaker, Transcript, TranscriptEntry};
