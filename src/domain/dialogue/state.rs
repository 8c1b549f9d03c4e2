//! Dialogue phase state machine.
//!
//! The phase is an explicit tagged variant so illegal combinations
//! (confirming with an out-of-range index, submitting while still asking)
//! cannot be represented at all.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a dialogue session currently is.
///
/// Exactly one of these holds at any time:
/// - `Idle`: no questionnaire in progress (before start, or after a
///   completed submission / command reset)
/// - `Asking(i)`: waiting for the answer to question `i`
/// - `Confirming`: all answers collected, awaiting yes/no
/// - `Submitting`: submission in flight; all input is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    #[default]
    Idle,
    Asking(usize),
    Confirming,
    Submitting,
}

impl DialoguePhase {
    /// True while answers or confirmations are being accepted.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, DialoguePhase::Submitting)
    }

    /// True while the submission bridge owns the session.
    pub fn is_submitting(&self) -> bool {
        matches!(self, DialoguePhase::Submitting)
    }

    /// The question index being asked, if any.
    pub fn asking_index(&self) -> Option<usize> {
        match self {
            DialoguePhase::Asking(i) => Some(*i),
            _ => None,
        }
    }
}

impl StateMachine for DialoguePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialoguePhase::*;
        match (self, target) {
            // Session start, restart after "No", command reset re-entry
            (Idle, Asking(0)) => true,
            // Advancing one question at a time
            (Asking(i), Asking(j)) => *j == *i + 1,
            // Last answer accepted
            (Asking(_), Confirming) => true,
            // "No" restarts the whole questionnaire
            (Confirming, Asking(0)) => true,
            // "Sí" hands off to the submission bridge
            (Confirming, Submitting) => true,
            // Submission completed or failed
            (Submitting, Idle) => true,
            // "nuevo"/"reiniciar" from any accepting phase
            (Idle, Idle) | (Asking(_), Idle) | (Confirming, Idle) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialoguePhase::*;
        match self {
            Idle => vec![Asking(0), Idle],
            Asking(i) => vec![Asking(i + 1), Confirming, Idle],
            Confirming => vec![Asking(0), Submitting, Idle],
            Submitting => vec![Idle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_starts_at_question_zero_only() {
        assert!(DialoguePhase::Idle.can_transition_to(&DialoguePhase::Asking(0)));
        assert!(!DialoguePhase::Idle.can_transition_to(&DialoguePhase::Asking(3)));
        assert!(!DialoguePhase::Idle.can_transition_to(&DialoguePhase::Confirming));
    }

    #[test]
    fn asking_advances_by_exactly_one() {
        assert!(DialoguePhase::Asking(2).can_transition_to(&DialoguePhase::Asking(3)));
        assert!(!DialoguePhase::Asking(2).can_transition_to(&DialoguePhase::Asking(4)));
        assert!(!DialoguePhase::Asking(2).can_transition_to(&DialoguePhase::Asking(2)));
    }

    #[test]
    fn confirming_branches_to_restart_or_submit() {
        assert!(DialoguePhase::Confirming.can_transition_to(&DialoguePhase::Asking(0)));
        assert!(DialoguePhase::Confirming.can_transition_to(&DialoguePhase::Submitting));
        assert!(!DialoguePhase::Confirming.can_transition_to(&DialoguePhase::Asking(5)));
    }

    #[test]
    fn submitting_only_returns_to_idle() {
        assert_eq!(
            DialoguePhase::Submitting.valid_transitions(),
            vec![DialoguePhase::Idle]
        );
        assert!(!DialoguePhase::Submitting.can_transition_to(&DialoguePhase::Asking(0)));
    }

    #[test]
    fn submitting_rejects_input() {
        assert!(!DialoguePhase::Submitting.accepts_input());
        assert!(DialoguePhase::Idle.accepts_input());
        assert!(DialoguePhase::Asking(0).accepts_input());
        assert!(DialoguePhase::Confirming.accepts_input());
    }

    #[test]
    fn no_phase_is_terminal() {
        for phase in [
            DialoguePhase::Idle,
            DialoguePhase::Asking(4),
            DialoguePhase::Confirming,
            DialoguePhase::Submitting,
        ] {
            assert!(!phase.is_terminal());
        }
    }
}
