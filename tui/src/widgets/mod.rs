//! Widgets for the cell TUI.

mod transcript;

pub use transcript::{TranscriptState, TranscriptView};
