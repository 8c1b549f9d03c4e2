//! Dialogue session aggregate.
//!
//! Owns the phase, the accumulated answers, and the transcript for one
//! user's run through the questionnaire. Every user action is a synchronous
//! transition; pacing is returned as [`Reveal`] data so the driver decides
//! when (and whether) delayed bot messages actually appear.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::answers::AnswerSet;
use super::format;
use super::state::DialoguePhase;
use super::transcript::{Transcript, TranscriptEntry};
use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::{StateMachine, UserId};

/// Delay between the greeting and the first question.
pub const FIRST_QUESTION_DELAY: Duration = Duration::from_millis(1000);
/// Delay before each subsequent question prompt.
pub const NEXT_QUESTION_DELAY: Duration = Duration::from_millis(500);
/// Delays for the post-submission reveals, in display order.
pub const SCORER_MESSAGE_DELAY: Duration = Duration::from_millis(1000);
pub const RECOMMENDATION_DELAY: Duration = Duration::from_millis(1500);
pub const CLOSING_PROMPT_DELAY: Duration = Duration::from_millis(2000);

/// A bot message scheduled to appear after a pacing delay.
///
/// Purely presentational: a cancelled reveal loses nothing but display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub delay: Duration,
    pub text: String,
}

impl Reveal {
    fn new(delay: Duration, text: impl Into<String>) -> Self {
        Self {
            delay,
            text: text.into(),
        }
    }
}

/// Result of a confirmation input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Not in a confirmable phase; nothing changed.
    Rejected,
    /// "Sí": the session is now `Submitting` and this payload must be sent.
    Submit(Value),
    /// "No": full restart, question 0 re-scheduled.
    Restart(Vec<Reveal>),
}

/// What the submission bridge reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Backend success with both required fields present.
    Scored { msg: String, recomendacion: String },
    /// Backend replied but without a usable recommendation.
    MissingRecommendation,
    /// Transport failure, non-2xx status, or unparseable body.
    Failed,
}

/// One user's dialogue session, from idle to submission or abandonment.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    catalog: Arc<QuestionCatalog>,
    phase: DialoguePhase,
    answers: AnswerSet,
    transcript: Transcript,
    user_name: String,
}

impl DialogueSession {
    /// Creates an idle session over the built-in catalog.
    pub fn new(user_id: Option<UserId>, user_name: Option<String>) -> Self {
        Self::with_catalog(
            Arc::new(QuestionCatalog::default_catalog().clone()),
            user_id,
            user_name,
        )
    }

    /// Creates an idle session over an injected catalog.
    ///
    /// Deployments that re-word the prompts load their catalog from YAML
    /// and pass it here.
    pub fn with_catalog(
        catalog: Arc<QuestionCatalog>,
        user_id: Option<UserId>,
        user_name: Option<String>,
    ) -> Self {
        let display_name = user_name.clone().unwrap_or_else(|| "Invitado".to_string());
        Self {
            catalog,
            phase: DialoguePhase::Idle,
            answers: AnswerSet::new().with_identity(user_id, user_name),
            transcript: Transcript::new(),
            user_name: display_name,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Begins the questionnaire: greeting now, first question after a delay.
    ///
    /// Only effective while idle with an empty transcript; otherwise a no-op.
    pub fn start(&mut self) -> Vec<Reveal> {
        if self.phase != DialoguePhase::Idle || !self.transcript.is_empty() {
            return Vec::new();
        }
        let Ok(next) = self.phase.transition_to(DialoguePhase::Asking(0)) else {
            return Vec::new();
        };
        self.phase = next;
        self.transcript.append(TranscriptEntry::bot(format!(
            "Hola {}, bienvenido al asistente de eventos. Comencemos con algunas preguntas.",
            self.user_name
        )));
        vec![Reveal::new(
            FIRST_QUESTION_DELAY,
            self.prompt_at(0),
        )]
    }

    /// Accepts the answer to the current question.
    ///
    /// Records the raw value, echoes it (date answers display formatted),
    /// and either schedules the next prompt or asks for confirmation.
    /// No-op outside `Asking`, while submitting, or for blank input.
    pub fn answer(&mut self, value: &str) -> Vec<Reveal> {
        if value.trim().is_empty() {
            return Vec::new();
        }
        let Some(index) = self.phase.asking_index() else {
            return Vec::new();
        };
        let Some(question) = self.catalog.question_at(index) else {
            return Vec::new();
        };

        self.answers.record(question.id.clone(), value);
        let echoed = if question.input.is_date() {
            format::format_date(value)
        } else {
            value.to_string()
        };
        self.transcript.append(TranscriptEntry::user(echoed));

        if index + 1 < self.catalog.count() {
            if let Ok(next) = self.phase.transition_to(DialoguePhase::Asking(index + 1)) {
                self.phase = next;
                return vec![Reveal::new(NEXT_QUESTION_DELAY, self.prompt_at(index + 1))];
            }
        } else if let Ok(next) = self.phase.transition_to(DialoguePhase::Confirming) {
            self.phase = next;
            self.transcript.append(TranscriptEntry::bot(
                "¿Confirmas que tus respuestas son correctas?",
            ));
        }
        Vec::new()
    }

    /// Handles the confirmation answer.
    pub fn confirm(&mut self, yes: bool) -> ConfirmOutcome {
        if self.phase != DialoguePhase::Confirming {
            return ConfirmOutcome::Rejected;
        }
        if yes {
            match self.phase.transition_to(DialoguePhase::Submitting) {
                Ok(next) => {
                    self.phase = next;
                    ConfirmOutcome::Submit(self.answers.to_payload())
                }
                Err(_) => ConfirmOutcome::Rejected,
            }
        } else {
            let Ok(next) = self.phase.transition_to(DialoguePhase::Asking(0)) else {
                return ConfirmOutcome::Rejected;
            };
            self.phase = next;
            self.answers.clear();
            self.transcript.append(TranscriptEntry::bot(
                "Perfecto, reiniciemos el cuestionario para que puedas corregir tus respuestas.",
            ));
            ConfirmOutcome::Restart(vec![Reveal::new(NEXT_QUESTION_DELAY, self.prompt_at(0))])
        }
    }

    /// Applies the bridge's outcome and returns the session to idle.
    ///
    /// No-op unless a submission is actually in flight.
    pub fn finish_submission(&mut self, outcome: &SubmissionOutcome) -> Vec<Reveal> {
        if self.phase != DialoguePhase::Submitting {
            return Vec::new();
        }
        let reveals = match outcome {
            SubmissionOutcome::Scored { msg, recomendacion } => {
                self.transcript
                    .append(TranscriptEntry::bot(self.answers.summary(&self.catalog)));
                vec![
                    Reveal::new(SCORER_MESSAGE_DELAY, msg.clone()),
                    Reveal::new(RECOMMENDATION_DELAY, recomendacion.clone()),
                    Reveal::new(
                        CLOSING_PROMPT_DELAY,
                        "¿Te gustaría planificar otro evento? Escribe 'nuevo' para comenzar.",
                    ),
                ]
            }
            SubmissionOutcome::MissingRecommendation => {
                self.transcript.append(TranscriptEntry::bot(
                    "No se pudo generar una recomendación para tu evento.",
                ));
                vec![Reveal::new(
                    SCORER_MESSAGE_DELAY,
                    "¿Te gustaría planificar otro evento? Escribe 'nuevo' para comenzar.",
                )]
            }
            SubmissionOutcome::Failed => {
                self.transcript.append(TranscriptEntry::bot(
                    "❌ Ocurrió un error conectando al servidor. Por favor intenta de nuevo.",
                ));
                Vec::new()
            }
        };
        if let Ok(next) = self.phase.transition_to(DialoguePhase::Idle) {
            self.phase = next;
        }
        self.answers.clear();
        reveals
    }

    /// Handles free text typed while idle.
    ///
    /// "nuevo"/"reiniciar" (case-insensitive substring) clears everything and
    /// returns true; any other text gets echoed plus a help reply.
    pub fn free_text(&mut self, input: &str) -> bool {
        if !self.phase.accepts_input() || input.trim().is_empty() {
            return false;
        }
        let lowered = input.to_lowercase();
        if lowered.contains("nuevo") || lowered.contains("reiniciar") {
            let Ok(next) = self.phase.transition_to(DialoguePhase::Idle) else {
                return false;
            };
            self.phase = next;
            self.answers.clear();
            self.transcript.clear();
            return true;
        }
        if self.phase == DialoguePhase::Idle && !self.transcript.is_empty() {
            self.transcript.append(TranscriptEntry::user(input));
            self.transcript.append(TranscriptEntry::bot(
                "Para consultar un nuevo evento, escribe 'nuevo'. ¿En qué más puedo ayudarte?",
            ));
        }
        false
    }

    /// Appends a revealed bot message to the transcript.
    ///
    /// Called by the driver when a scheduled reveal fires.
    pub fn reveal(&mut self, text: &str) {
        self.transcript.append(TranscriptEntry::bot(text));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    /// The transcript so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The accumulated answers.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The catalog driving this session.
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// The question currently being asked, if any.
    pub fn current_question(&self) -> Option<&crate::domain::catalog::Question> {
        self.phase
            .asking_index()
            .and_then(|i| self.catalog.question_at(i))
    }

    fn prompt_at(&self, index: usize) -> String {
        self.catalog
            .question_at(index)
            .map(|q| q.prompt.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::transcript::Speaker;

    const ANSWERS: [&str; 9] = [
        "Boda",
        "5000",
        "50",
        "Interior",
        "Noche",
        "Buffet",
        "DJ",
        "Sin decoración",
        "2025-12-20",
    ];

    fn started_session() -> DialogueSession {
        let mut session = DialogueSession::new(Some(UserId::new(1)), Some("Ana".into()));
        for reveal in session.start() {
            session.reveal(&reveal.text);
        }
        session
    }

    fn answered_session() -> DialogueSession {
        let mut session = started_session();
        for answer in ANSWERS {
            for reveal in session.answer(answer) {
                session.reveal(&reveal.text);
            }
        }
        session
    }

    #[test]
    fn start_greets_and_schedules_first_question() {
        let mut session = DialogueSession::new(None, None);
        let reveals = session.start();

        assert_eq!(session.phase(), DialoguePhase::Asking(0));
        assert_eq!(reveals.len(), 1);
        assert_eq!(reveals[0].delay, FIRST_QUESTION_DELAY);
        assert_eq!(reveals[0].text, "¿Qué tipo de evento deseas?");
        assert!(session.transcript().entries()[0]
            .text
            .starts_with("Hola Invitado"));
    }

    #[test]
    fn injected_catalog_drives_prompts_and_confirmation() {
        use crate::domain::catalog::{Question, QuestionInput};

        let catalog = QuestionCatalog::new(vec![
            Question::new("tipo_evento", "¿Qué celebramos?", QuestionInput::Text).unwrap(),
            Question::new("fecha", "¿Cuándo?", QuestionInput::Date).unwrap(),
        ])
        .unwrap();
        let mut session = DialogueSession::with_catalog(Arc::new(catalog), None, None);

        let reveals = session.start();
        assert_eq!(reveals[0].text, "¿Qué celebramos?");
        session.answer("Boda");
        session.answer("2025-12-20");

        assert_eq!(session.phase(), DialoguePhase::Confirming);
        assert_eq!(session.answers().len(), 2);
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut session = started_session();
        assert!(session.start().is_empty());
        assert_eq!(session.phase(), DialoguePhase::Asking(0));
    }

    #[test]
    fn answer_advances_one_question_at_a_time() {
        let mut session = started_session();
        let reveals = session.answer("Boda");

        assert_eq!(session.phase(), DialoguePhase::Asking(1));
        assert_eq!(session.answers().get("tipo_evento"), Some("Boda"));
        assert_eq!(reveals[0].delay, NEXT_QUESTION_DELAY);
        assert_eq!(reveals[0].text, "Ingresa tu presupuesto aproximado en números");
    }

    #[test]
    fn blank_answer_changes_nothing() {
        let mut session = started_session();
        let before = session.transcript().len();
        assert!(session.answer("   ").is_empty());
        assert_eq!(session.phase(), DialoguePhase::Asking(0));
        assert_eq!(session.transcript().len(), before);
    }

    #[test]
    fn date_answer_echoes_formatted_but_stores_raw() {
        let mut session = started_session();
        for answer in &ANSWERS[..8] {
            for reveal in session.answer(answer) {
                session.reveal(&reveal.text);
            }
        }
        session.answer("2025-12-20");

        assert_eq!(session.answers().get("fecha"), Some("2025-12-20"));
        let echoed = session
            .transcript()
            .entries()
            .iter()
            .rev()
            .find(|e| e.speaker == Speaker::User)
            .unwrap();
        assert_eq!(echoed.text, "sábado, 20 de diciembre de 2025");
    }

    #[test]
    fn last_answer_moves_to_confirming() {
        let session = answered_session();
        assert_eq!(session.phase(), DialoguePhase::Confirming);
        assert_eq!(
            session.transcript().last().unwrap().text,
            "¿Confirmas que tus respuestas son correctas?"
        );
        assert_eq!(session.answers().len(), 9);
    }

    #[test]
    fn question_prompts_equal_answers_plus_confirmation() {
        let session = answered_session();
        // greeting + 9 question prompts + confirmation prompt
        assert_eq!(session.transcript().count_by(Speaker::Bot), 11);
        assert_eq!(session.transcript().count_by(Speaker::User), 9);
    }

    #[test]
    fn confirm_yes_yields_payload_and_submitting_phase() {
        let mut session = answered_session();
        let outcome = session.confirm(true);

        let ConfirmOutcome::Submit(payload) = outcome else {
            panic!("expected Submit, got {:?}", outcome);
        };
        assert_eq!(session.phase(), DialoguePhase::Submitting);
        assert_eq!(payload["presupuesto"], serde_json::json!(5000.0));
        assert_eq!(payload["fecha"], "2025-12-20");
    }

    #[test]
    fn confirm_no_restarts_from_question_zero() {
        let mut session = answered_session();
        let outcome = session.confirm(false);

        let ConfirmOutcome::Restart(reveals) = outcome else {
            panic!("expected Restart");
        };
        assert_eq!(session.phase(), DialoguePhase::Asking(0));
        assert!(session.answers().is_empty());
        assert_eq!(reveals[0].text, "¿Qué tipo de evento deseas?");
        assert!(session
            .transcript()
            .last()
            .unwrap()
            .text
            .contains("reiniciemos el cuestionario"));
    }

    #[test]
    fn confirm_outside_confirming_is_rejected() {
        let mut session = started_session();
        assert_eq!(session.confirm(true), ConfirmOutcome::Rejected);
    }

    #[test]
    fn inputs_are_ignored_while_submitting() {
        let mut session = answered_session();
        session.confirm(true);

        let transcript_before = session.transcript().clone();
        assert!(session.answer("Boda").is_empty());
        assert_eq!(session.confirm(true), ConfirmOutcome::Rejected);
        assert!(!session.free_text("nuevo"));
        assert_eq!(session.phase(), DialoguePhase::Submitting);
        assert_eq!(session.transcript(), &transcript_before);
    }

    #[test]
    fn scored_outcome_reveals_in_order_and_goes_idle() {
        let mut session = answered_session();
        session.confirm(true);

        let reveals = session.finish_submission(&SubmissionOutcome::Scored {
            msg: "ok".into(),
            recomendacion: "reduce catering".into(),
        });

        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert!(session.answers().is_empty());
        assert!(session
            .transcript()
            .last()
            .unwrap()
            .text
            .starts_with("📋 Resumen"));
        let texts: Vec<&str> = reveals.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            [
                "ok",
                "reduce catering",
                "¿Te gustaría planificar otro evento? Escribe 'nuevo' para comenzar."
            ]
        );
        assert!(reveals[0].delay < reveals[1].delay && reveals[1].delay < reveals[2].delay);
    }

    #[test]
    fn missing_recommendation_shows_fallback_not_failure() {
        let mut session = answered_session();
        session.confirm(true);

        session.finish_submission(&SubmissionOutcome::MissingRecommendation);

        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert!(session
            .transcript()
            .last()
            .unwrap()
            .text
            .contains("No se pudo generar una recomendación"));
    }

    #[test]
    fn failed_submission_appends_single_error_entry() {
        let mut session = answered_session();
        session.confirm(true);
        let before = session.transcript().len();

        let reveals = session.finish_submission(&SubmissionOutcome::Failed);

        assert!(reveals.is_empty());
        assert_eq!(session.transcript().len(), before + 1);
        assert!(session.transcript().last().unwrap().text.contains("error"));
        assert_eq!(session.phase(), DialoguePhase::Idle);
    }

    #[test]
    fn finish_without_submission_in_flight_is_a_no_op() {
        let mut session = started_session();
        let before = session.transcript().clone();
        assert!(session.finish_submission(&SubmissionOutcome::Failed).is_empty());
        assert_eq!(session.transcript(), &before);
    }

    #[test]
    fn nuevo_command_clears_everything() {
        let mut session = answered_session();
        assert!(session.free_text("Nuevo por favor"));

        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert!(session.answers().is_empty());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn reiniciar_command_also_resets() {
        let mut session = started_session();
        assert!(session.free_text("quiero REINICIAR"));
        assert_eq!(session.phase(), DialoguePhase::Idle);
    }

    #[test]
    fn idle_free_text_gets_help_reply() {
        let mut session = answered_session();
        session.confirm(true);
        session.finish_submission(&SubmissionOutcome::Failed);
        assert_eq!(session.phase(), DialoguePhase::Idle);

        session.free_text("hola?");
        assert!(session
            .transcript()
            .last()
            .unwrap()
            .text
            .contains("escribe 'nuevo'"));
    }
}
