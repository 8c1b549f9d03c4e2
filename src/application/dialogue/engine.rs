//! Client-side dialogue driver.
//!
//! Wraps a [`DialogueSession`] and a [`SubmissionGateway`], turning the
//! session's [`Reveal`] data into an absolute-deadline queue the caller can
//! poll. The driver never sleeps on its own; the terminal loop selects over
//! user input and `next_due`, so a session reset simply drops whatever was
//! still scheduled.

use std::collections::VecDeque;

use tokio::time::Instant;

use crate::domain::dialogue::{
    ConfirmOutcome, DialoguePhase, DialogueSession, Reveal, SubmissionOutcome,
};
use crate::ports::{ChatReply, SubmissionGateway};

/// A reveal anchored to an absolute deadline.
#[derive(Debug, Clone)]
struct ScheduledReveal {
    due: Instant,
    text: String,
}

/// Drives one dialogue session against a submission gateway.
pub struct DialogueEngine<G> {
    session: DialogueSession,
    gateway: G,
    pending: VecDeque<ScheduledReveal>,
}

impl<G> DialogueEngine<G> {
    pub fn new(session: DialogueSession, gateway: G) -> Self {
        Self {
            session,
            gateway,
            pending: VecDeque::new(),
        }
    }

    /// Begins the questionnaire and schedules the first prompt.
    pub fn start(&mut self) {
        let reveals = self.session.start();
        self.schedule(reveals);
    }

    /// Deadline of the earliest pending reveal, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|r| r.due).min()
    }

    /// Fires every reveal due at `now`, appending them to the transcript.
    ///
    /// Returns how many fired so the caller knows to re-render.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(position) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, r)| r.due <= now)
            .min_by_key(|(_, r)| r.due)
            .map(|(i, _)| i)
        {
            if let Some(reveal) = self.pending.remove(position) {
                self.session.reveal(&reveal.text);
                fired += 1;
            }
        }
        fired
    }

    /// The underlying session, for rendering.
    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    fn reset_via_command(&mut self, input: &str) {
        if self.session.free_text(input) {
            self.pending.clear();
            self.start();
        }
    }

    fn schedule(&mut self, reveals: Vec<Reveal>) {
        let now = Instant::now();
        for reveal in reveals {
            self.pending.push_back(ScheduledReveal {
                due: now + reveal.delay,
                text: reveal.text,
            });
        }
    }
}

impl<G: SubmissionGateway> DialogueEngine<G> {
    /// Routes one line of user input according to the current phase.
    ///
    /// Submits to the gateway when the user confirms; everything else is
    /// synchronous. Input while a submission is in flight is dropped.
    pub async fn handle_input(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        let lowered = trimmed.to_lowercase();
        if lowered.contains("nuevo") || lowered.contains("reiniciar") {
            self.reset_via_command(trimmed);
            return;
        }
        match self.session.phase() {
            DialoguePhase::Asking(_) => {
                let reveals = self.session.answer(trimmed);
                self.schedule(reveals);
            }
            DialoguePhase::Confirming => {
                let yes = matches!(lowered.as_str(), "sí" | "si" | "s" | "yes");
                match self.session.confirm(yes) {
                    ConfirmOutcome::Submit(payload) => {
                        let outcome = match self.gateway.submit(&payload).await {
                            Ok(reply) => classify_reply(reply),
                            Err(_) => SubmissionOutcome::Failed,
                        };
                        let reveals = self.session.finish_submission(&outcome);
                        self.schedule(reveals);
                    }
                    ConfirmOutcome::Restart(reveals) => {
                        self.pending.clear();
                        self.schedule(reveals);
                    }
                    ConfirmOutcome::Rejected => {}
                }
            }
            DialoguePhase::Idle => {
                if self.session.free_text(trimmed) {
                    self.pending.clear();
                    self.start();
                }
            }
            DialoguePhase::Submitting => {}
        }
    }
}

/// Maps the backend reply to a session outcome.
///
/// Anything carrying both message and recommendation counts as scored, even
/// a degraded reply, so the user still sees what the backend had to say.
fn classify_reply(reply: ChatReply) -> SubmissionOutcome {
    if reply.has_recommendation() {
        SubmissionOutcome::Scored {
            msg: reply.msg.unwrap_or_default(),
            recomendacion: reply.recomendacion.unwrap_or_default(),
        }
    } else {
        SubmissionOutcome::MissingRecommendation
    }
}
