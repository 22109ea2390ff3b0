//! Transcript View
//!
//! A borderless text region that wraps the transcript to the available width,
//! follows the newest line by default, and supports scrolling back. The
//! scroll offset is measured in wrapped lines from the bottom so that new
//! output doesn't shift the view while the user is reading history.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;

use cell_core::transcript::{ERROR_PREFIX, USER_PREFIX};

use crate::theme;

/// Scroll state for the transcript region.
#[derive(Clone, Debug, Default)]
pub struct TranscriptState {
    /// Wrapped lines from the bottom; 0 follows the tail
    offset_from_bottom: usize,
    /// Wrapped line count from the last render, for scroll clamping
    total_lines: usize,
}

impl TranscriptState {
    /// Scroll towards older content.
    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.total_lines.saturating_sub(1);
        self.offset_from_bottom = (self.offset_from_bottom + lines).min(max);
    }

    /// Scroll towards newer content.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    /// Snap back to the newest line.
    pub fn follow(&mut self) {
        self.offset_from_bottom = 0;
    }
}

/// The transcript text, wrapped and colored by line kind.
pub struct TranscriptView<'a> {
    content: &'a str,
}

impl<'a> TranscriptView<'a> {
    /// Create a view over the rendered transcript string.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }
}

/// Style for one logical transcript line; wrapped continuations inherit it.
fn line_style(line: &str) -> Style {
    if line.starts_with(USER_PREFIX) {
        Style::default().fg(theme::USER_GREEN)
    } else if line.starts_with(ERROR_PREFIX) {
        Style::default().fg(theme::ERROR_RED)
    } else {
        Style::default()
    }
}

impl StatefulWidget for TranscriptView<'_> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let wrapped: Vec<(String, Style)> = self
            .content
            .lines()
            .flat_map(|line| {
                let style = line_style(line);
                if line.is_empty() {
                    vec![(String::new(), style)]
                } else {
                    wrap(line, area.width as usize)
                        .into_iter()
                        .map(|cow| (cow.to_string(), style))
                        .collect()
                }
            })
            .collect();

        state.total_lines = wrapped.len();

        let height = area.height as usize;
        let max_offset = wrapped.len().saturating_sub(height);
        state.offset_from_bottom = state.offset_from_bottom.min(max_offset);

        let end = wrapped.len() - state.offset_from_bottom;
        let start = end.saturating_sub(height);

        for (i, (line, style)) in wrapped[start..end].iter().enumerate() {
            buf.set_string(area.x, area.y + i as u16, line, *style);
        }
    }
}
