//! Session State Machine
//!
//! One [`Session`] owns everything that changes during a conversational turn:
//! the transcript and the input gate. UI code calls [`Session::submit`] for
//! user submissions and [`Session::apply`] for agent events, then re-renders;
//! it holds no conversational state of its own, which keeps the whole turn
//! lifecycle testable with neither a terminal nor an agent.
//!
//! # Turn lifecycle
//!
//! ```text
//! Idle ──submit──► InFlight ──MessageEnd──► settled ──AgentEnd──► Idle
//!                      │
//!                      └──TurnFailed──► settled ──AgentEnd──► Idle
//! ```
//!
//! The input gate is the sole overlap guard: it closes on submission and
//! reopens when the turn settles, so a second prompt can never overlap an
//! in-flight one.

use crate::events::AgentEvent;
use crate::transcript::Transcript;

/// The per-process conversation state.
#[derive(Clone, Debug)]
pub struct Session {
    transcript: Transcript,
    accepting_input: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an idle session with an open input gate.
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            accepting_input: true,
        }
    }

    /// Whether a new submission would currently be accepted.
    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    /// The transcript, for rendering and inspection.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handle a user submission. Trims the text; empty submissions and
    /// submissions while the gate is closed are ignored with no state change.
    /// On acceptance the trimmed text is returned for the caller to forward
    /// to the agent (and to input history), the transcript gains the user
    /// line, and the gate closes.
    pub fn submit(&mut self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.is_empty() || !self.accepting_input {
            return None;
        }
        self.transcript.push_user(text);
        self.accepting_input = false;
        Some(text.to_string())
    }

    /// Apply one agent event to the session state.
    pub fn apply(&mut self, event: AgentEvent) {
        match event {
            AgentEvent::TextDelta { text } => self.transcript.append_assistant(&text),
            AgentEvent::MessageEnd => self.transcript.finalize_assistant(),
            AgentEvent::AgentEnd => self.accepting_input = true,
            AgentEvent::TurnFailed { message } => {
                self.transcript.push_error(&message);
                self.accepting_input = true;
            }
        }
    }

    /// The full transcript display string.
    pub fn render(&self) -> String {
        self.transcript.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(session: &Session) -> &[String] {
        session.transcript().lines()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert!(session.accepting_input());
        assert_eq!(session.render(), "");
    }

    #[test]
    fn test_empty_submission_is_ignored() {
        let mut session = Session::new();
        assert_eq!(session.submit(""), None);
        assert_eq!(session.submit("   \t "), None);
        assert!(session.accepting_input());
        assert!(lines(&session).is_empty());
    }

    #[test]
    fn test_submission_trims_and_closes_gate() {
        let mut session = Session::new();
        assert_eq!(session.submit("  hi  "), Some("hi".to_string()));
        assert!(!session.accepting_input());
        assert_eq!(lines(&session), ["You: hi"]);
    }

    #[test]
    fn test_submission_while_gate_closed_is_ignored() {
        let mut session = Session::new();
        session.submit("first").unwrap();
        assert_eq!(session.submit("second"), None);
        assert_eq!(lines(&session), ["You: first"]);
    }

    #[test]
    fn test_full_turn() {
        let mut session = Session::new();
        session.submit("hi").unwrap();
        session.apply(AgentEvent::TextDelta { text: "He".to_string() });
        session.apply(AgentEvent::TextDelta { text: "llo".to_string() });
        session.apply(AgentEvent::MessageEnd);
        session.apply(AgentEvent::AgentEnd);

        assert_eq!(lines(&session), ["You: hi", "Assistant: Hello"]);
        assert_eq!(session.transcript().pending(), "");
        assert!(!session.transcript().assistant_in_flight());
        assert!(session.accepting_input());
    }

    #[test]
    fn test_turn_failure_reopens_gate_without_message_end() {
        let mut session = Session::new();
        session.submit("hi").unwrap();
        session.apply(AgentEvent::TurnFailed { message: "boom".to_string() });

        assert_eq!(lines(&session), ["You: hi", "Error: boom"]);
        assert!(session.accepting_input());
    }

    #[test]
    fn test_double_message_end_is_idempotent() {
        let mut session = Session::new();
        session.submit("hi").unwrap();
        session.apply(AgentEvent::TextDelta { text: "ok".to_string() });
        session.apply(AgentEvent::MessageEnd);
        session.apply(AgentEvent::MessageEnd);
        assert_eq!(lines(&session).len(), 2);
    }

    #[test]
    fn test_render_during_stream() {
        let mut session = Session::new();
        session.submit("hi").unwrap();
        session.apply(AgentEvent::TextDelta { text: "Hel".to_string() });
        assert_eq!(session.render(), "You: hi\nAssistant: Hel");
    }

    #[test]
    fn test_next_turn_after_failure() {
        let mut session = Session::new();
        session.submit("hi").unwrap();
        session.apply(AgentEvent::TurnFailed { message: "boom".to_string() });
        session.apply(AgentEvent::AgentEnd);

        assert_eq!(session.submit("again"), Some("again".to_string()));
        assert_eq!(lines(&session), ["You: hi", "Error: boom", "You: again"]);
    }
}
