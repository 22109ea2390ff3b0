//! Main Application
//!
//! The event loop bridging terminal input, agent events, and SIGINT into
//! session updates and redraws. The app owns no conversational
//! logic: submissions go through [`Session::submit`], agent events through
//! [`Session::apply`], and every pass around the loop redraws from the
//! session's rendered transcript.

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

use cell_core::{AgentEvent, AgentHandle, SelectedModel, Session};

use crate::input::InputState;
use crate::theme;
use crate::widgets::{TranscriptState, TranscriptView};

/// Shown in the transcript region until the first turn.
const GREETING: &str = "Cell ready. Enter a prompt below.";

/// Input box height, including its border.
const INPUT_HEIGHT: u16 = 3;

/// Lines scrolled per PageUp/PageDown.
const SCROLL_PAGE: usize = 10;

/// Lines scrolled per mouse wheel tick.
const SCROLL_WHEEL: usize = 3;

/// Whether a key event asks the client to exit. Both the interrupt combo and
/// the end-of-input combo count; crossterm reports the raw control bytes
/// (`\x03`, `\x04`) as the same events.
pub fn is_exit_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

/// The terminal client.
pub struct App {
    session: Session,
    input: InputState,
    transcript_state: TranscriptState,
    agent: AgentHandle,
    model: SelectedModel,
    running: bool,
}

impl App {
    /// Create an idle app around a spawned agent.
    pub fn new(agent: AgentHandle, model: SelectedModel) -> Self {
        Self {
            session: Session::new(),
            input: InputState::new(),
            transcript_state: TranscriptState::default(),
            agent,
            model,
            running: true,
        }
    }

    /// Run until the user exits. Returning (rather than exiting in place)
    /// lets `main` restore the terminal before the process ends; an in-flight
    /// turn is simply abandoned with the runtime.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut agent_events: mpsc::UnboundedReceiver<AgentEvent>,
    ) -> anyhow::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut sigint = Box::pin(tokio::signal::ctrl_c());

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = terminal_events.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse.kind),
                            // A redraw happens below either way.
                            Event::Resize(_, _) => {}
                            _ => {}
                        }
                    }
                }

                maybe_agent = agent_events.recv() => {
                    match maybe_agent {
                        Some(event) => {
                            self.on_agent_event(event);
                            // Drain whatever else already arrived, then draw once.
                            while let Ok(event) = agent_events.try_recv() {
                                self.on_agent_event(event);
                            }
                        }
                        None => {
                            tracing::error!("agent task ended; shutting down");
                            self.running = false;
                        }
                    }
                }

                _ = &mut sigint => {
                    self.running = false;
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_exit_key(&key) {
            self.running = false;
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c);
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Up => self.input.recall_previous(),
            KeyCode::Down => self.input.recall_next(),
            KeyCode::PageUp => self.transcript_state.scroll_up(SCROLL_PAGE),
            KeyCode::PageDown => self.transcript_state.scroll_down(SCROLL_PAGE),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, kind: MouseEventKind) {
        match kind {
            MouseEventKind::ScrollUp => self.transcript_state.scroll_up(SCROLL_WHEEL),
            MouseEventKind::ScrollDown => self.transcript_state.scroll_down(SCROLL_WHEEL),
            _ => {}
        }
    }

    /// Forward the input line to the session; the session decides whether the
    /// submission counts (non-empty after trimming, gate open).
    fn submit(&mut self) {
        let Some(text) = self.session.submit(self.input.value()) else {
            return;
        };
        self.input.push_history(&text);
        self.input.clear();
        self.transcript_state.follow();
        self.agent.prompt(text);
        self.sync_gate();
    }

    fn on_agent_event(&mut self, event: AgentEvent) {
        self.session.apply(event);
        self.sync_gate();
    }

    fn sync_gate(&mut self) {
        self.input.set_enabled(self.session.accepting_input());
    }

    fn render(&mut self, frame: &mut Frame) {
        let [transcript_area, input_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_transcript(frame, transcript_area);
        self.render_input(frame, input_area);
        self.render_status(frame, status_area);
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let transcript = self.session.render();
        if transcript.is_empty() {
            let greeting = Paragraph::new(GREETING).style(Style::default().fg(theme::DIM_GRAY));
            frame.render_widget(greeting, area);
        } else {
            frame.render_stateful_widget(
                TranscriptView::new(&transcript),
                area,
                &mut self.transcript_state,
            );
        }
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.input.enabled() {
            Style::default().fg(theme::DIM_GRAY)
        } else {
            Style::default().fg(theme::DIM_GRAY).add_modifier(ratatui::style::Modifier::DIM)
        };
        let box_widget = Paragraph::new(self.input.value())
            .block(Block::bordered().border_style(border_style));
        frame.render_widget(box_widget, area);

        if self.input.enabled() && area.width > 2 {
            let cursor_x = area.x + 1 + (self.input.value().width() as u16).min(area.width - 2);
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = if self.session.accepting_input() { "ready" } else { "thinking..." };
        let status = Line::from(vec![
            Span::styled(self.model.to_string(), Style::default().fg(theme::ACCENT)),
            Span::raw("  "),
            Span::styled(state, Style::default().fg(theme::DIM_GRAY)),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }
}
