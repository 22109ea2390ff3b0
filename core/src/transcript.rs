//! Transcript Buffer
//!
//! The ordered, human-readable log of turns plus the accumulator for the one
//! assistant response that may be in flight. Finalized lines are append-only;
//! the pending buffer is non-empty only while a response is in flight.

/// Prefix for finalized user lines.
pub const USER_PREFIX: &str = "You: ";
/// Prefix for finalized and in-flight assistant lines.
pub const ASSISTANT_PREFIX: &str = "Assistant: ";
/// Prefix for turn-failure lines.
pub const ERROR_PREFIX: &str = "Error: ";
/// Stand-in for an assistant response that finished without producing text.
pub const EMPTY_RESPONSE: &str = "(no output)";

/// The conversation log displayed to the user.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
    pending: String,
    assistant_in_flight: bool,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalized turn lines, in chronological order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether an assistant response is currently in flight.
    pub fn assistant_in_flight(&self) -> bool {
        self.assistant_in_flight
    }

    /// The accumulated text of the in-flight assistant response.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Record a submitted user message and open the assistant accumulator.
    pub fn push_user(&mut self, text: &str) {
        self.lines.push(format!("{USER_PREFIX}{text}"));
        self.pending.clear();
        self.assistant_in_flight = true;
    }

    /// Append a streamed fragment to the in-flight response.
    pub fn append_assistant(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Finalize the in-flight assistant response. Idempotent: a no-op when no
    /// response is in flight, so duplicate completion events are harmless.
    pub fn finalize_assistant(&mut self) {
        if !self.assistant_in_flight {
            return;
        }
        let body = if self.pending.is_empty() { EMPTY_RESPONSE } else { self.pending.as_str() };
        self.lines.push(format!("{ASSISTANT_PREFIX}{body}"));
        self.pending.clear();
        self.assistant_in_flight = false;
    }

    /// Record a turn failure, discarding any partial response.
    pub fn push_error(&mut self, message: &str) {
        self.lines.push(format!("{ERROR_PREFIX}{message}"));
        self.pending.clear();
        self.assistant_in_flight = false;
    }

    /// The full display string: finalized lines joined by newlines, plus the
    /// in-flight assistant segment while one exists.
    pub fn render(&self) -> String {
        let base = self.lines.join("\n");
        if !self.assistant_in_flight {
            return base;
        }
        if base.is_empty() {
            format!("{ASSISTANT_PREFIX}{}", self.pending)
        } else {
            format!("{base}\n{ASSISTANT_PREFIX}{}", self.pending)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_user_opens_accumulator() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        assert_eq!(transcript.lines(), ["You: hi"]);
        assert!(transcript.assistant_in_flight());
        assert_eq!(transcript.pending(), "");
    }

    #[test]
    fn test_full_turn() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        transcript.append_assistant("He");
        transcript.append_assistant("llo");
        transcript.finalize_assistant();

        assert_eq!(transcript.lines(), ["You: hi", "Assistant: Hello"]);
        assert_eq!(transcript.pending(), "");
        assert!(!transcript.assistant_in_flight());
    }

    #[test]
    fn test_finalize_empty_response_uses_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        transcript.finalize_assistant();
        assert_eq!(transcript.lines(), ["You: hi", "Assistant: (no output)"]);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        transcript.append_assistant("ok");
        transcript.finalize_assistant();
        transcript.finalize_assistant();
        assert_eq!(transcript.lines().len(), 2);
    }

    #[test]
    fn test_error_discards_partial_response() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        transcript.append_assistant("par");
        transcript.push_error("boom");

        assert_eq!(transcript.lines(), ["You: hi", "Error: boom"]);
        assert_eq!(transcript.pending(), "");
        assert!(!transcript.assistant_in_flight());
    }

    #[test]
    fn test_render_shows_pending_only_in_flight() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.render(), "");

        transcript.push_user("hi");
        transcript.append_assistant("Hel");
        assert_eq!(transcript.render(), "You: hi\nAssistant: Hel");

        transcript.finalize_assistant();
        assert_eq!(transcript.render(), "You: hi\nAssistant: Hel");
    }

    #[test]
    fn test_render_no_leading_newline_on_empty_lines() {
        // An in-flight segment with no finalized lines must not start with a
        // separator. Lines can only be empty before the first submission, but
        // the render rule holds regardless of how the state was reached.
        let mut transcript = Transcript::new();
        transcript.assistant_in_flight = true;
        transcript.pending.push_str("Hi");
        assert_eq!(transcript.render(), "Assistant: Hi");
    }
}
