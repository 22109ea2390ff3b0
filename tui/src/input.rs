//! Input Line State
//!
//! The editable one-line input buffer with submission history. Typing stays
//! possible while a turn is in flight; only submission is gated, and that
//! gate lives in the session. The `enabled` flag here is purely visual.

/// State of the input line.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    buffer: String,
    history: Vec<String>,
    /// Index into `history` while recalling, `None` when editing live text
    recall: Option<usize>,
    /// The live buffer saved when recall started
    draft: String,
    enabled: bool,
}

impl InputState {
    /// Create an empty, enabled input line.
    pub fn new() -> Self {
        Self { enabled: true, ..Self::default() }
    }

    /// Current buffer content.
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Whether submissions are currently accepted (visual only).
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Update the visual gate.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Insert a character at the end of the buffer. Editing a recalled entry
    /// forks it into live text.
    pub fn insert(&mut self, c: char) {
        self.recall = None;
        self.buffer.push(c);
    }

    /// Delete the last character.
    pub fn backspace(&mut self) {
        self.recall = None;
        self.buffer.pop();
    }

    /// Clear the buffer after a successful submission.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.draft.clear();
        self.recall = None;
    }

    /// Record a submitted entry. Consecutive duplicates collapse.
    pub fn push_history(&mut self, text: &str) {
        if self.history.last().map(String::as_str) != Some(text) {
            self.history.push(text.to_string());
        }
    }

    /// Step backwards through history (Up). The live buffer is kept as a
    /// draft and restored when stepping past the newest entry again.
    pub fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.recall {
            None => {
                self.draft = std::mem::take(&mut self.buffer);
                self.history.len() - 1
            }
            Some(0) => 0,
            Some(index) => index - 1,
        };
        self.recall = Some(index);
        self.buffer = self.history[index].clone();
    }

    /// Step forwards through history (Down), back to the draft at the end.
    pub fn recall_next(&mut self) {
        match self.recall {
            None => {}
            Some(index) if index + 1 < self.history.len() => {
                self.recall = Some(index + 1);
                self.buffer = self.history[index + 1].clone();
            }
            Some(_) => {
                self.recall = None;
                self.buffer = std::mem::take(&mut self.draft);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_history(entries: &[&str]) -> InputState {
        let mut input = InputState::new();
        for entry in entries {
            input.push_history(entry);
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputState::new();
        input.insert('h');
        input.insert('i');
        assert_eq!(input.value(), "hi");
        input.backspace();
        assert_eq!(input.value(), "h");
    }

    #[test]
    fn test_recall_walks_backwards_then_forwards() {
        let mut input = with_history(&["first", "second"]);
        input.recall_previous();
        assert_eq!(input.value(), "second");
        input.recall_previous();
        assert_eq!(input.value(), "first");
        // Pinned at the oldest entry.
        input.recall_previous();
        assert_eq!(input.value(), "first");

        input.recall_next();
        assert_eq!(input.value(), "second");
        input.recall_next();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_recall_preserves_draft() {
        let mut input = with_history(&["old"]);
        input.insert('w');
        input.insert('i');
        input.insert('p');
        input.recall_previous();
        assert_eq!(input.value(), "old");
        input.recall_next();
        assert_eq!(input.value(), "wip");
    }

    #[test]
    fn test_editing_recalled_entry_forks_it() {
        let mut input = with_history(&["old"]);
        input.recall_previous();
        input.insert('!');
        assert_eq!(input.value(), "old!");
        // The edit dropped the recall marker, so Up starts from the end again
        // with the edited text as the new draft.
        input.recall_previous();
        assert_eq!(input.value(), "old");
        input.recall_next();
        assert_eq!(input.value(), "old!");
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut input = with_history(&["same", "same", "other", "same"]);
        input.recall_previous();
        assert_eq!(input.value(), "same");
        input.recall_previous();
        assert_eq!(input.value(), "other");
        input.recall_previous();
        assert_eq!(input.value(), "same");
    }

    #[test]
    fn test_recall_with_empty_history_is_noop() {
        let mut input = InputState::new();
        input.insert('x');
        input.recall_previous();
        assert_eq!(input.value(), "x");
        input.recall_next();
        assert_eq!(input.value(), "x");
    }
}
