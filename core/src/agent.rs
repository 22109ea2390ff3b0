//! The Agent Task
//!
//! One spawned tokio task owns the conversation: the system prompt, the
//! validated model selection, the multi-turn message history, and a
//! [`ChatBackend`]. The client talks to it exclusively through channels:
//! [`AgentCommand`]s in, [`AgentEvent`]s out, so a slow provider can never
//! block the UI thread and event ordering is fixed by the channel.
//!
//! Turns are strictly sequential: the task processes one command at a time,
//! and the client's input gate keeps a second prompt from being issued while
//! one is outstanding. Nothing here cancels an in-flight turn; dropping the
//! handle closes the command channel and the task winds down after the
//! current turn, or is abandoned outright at process exit.

use tokio::sync::mpsc;

use crate::backend::{ChatBackend, ChatMessage, ChatRequest, StreamToken};
use crate::events::{AgentCommand, AgentEvent};
use crate::selection::SelectedModel;

/// The client's side of the agent channels.
#[derive(Clone, Debug)]
pub struct AgentHandle {
    commands: mpsc::UnboundedSender<AgentCommand>,
}

impl AgentHandle {
    /// Ask the agent to run one turn for the given user text.
    pub fn prompt(&self, text: impl Into<String>) {
        let command = AgentCommand::Prompt { text: text.into() };
        if self.commands.send(command).is_err() {
            tracing::warn!("agent task is gone; dropping prompt");
        }
    }
}

/// The conversation-owning task.
pub struct Agent<B: ChatBackend> {
    backend: B,
    model: SelectedModel,
    system_prompt: String,
    history: Vec<ChatMessage>,
    commands: mpsc::UnboundedReceiver<AgentCommand>,
    events: mpsc::UnboundedSender<AgentEvent>,
}

impl<B: ChatBackend + 'static> Agent<B> {
    /// Spawn the agent task. Returns the command handle and the event stream;
    /// the task runs until the handle is dropped.
    pub fn spawn(
        backend: B,
        model: SelectedModel,
        system_prompt: impl Into<String>,
    ) -> (AgentHandle, mpsc::UnboundedReceiver<AgentEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let agent = Self {
            backend,
            model,
            system_prompt: system_prompt.into(),
            history: Vec::new(),
            commands: command_rx,
            events: event_tx,
        };
        tokio::spawn(agent.run());

        (AgentHandle { commands: command_tx }, event_rx)
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                AgentCommand::Prompt { text } => {
                    if let Err(error) = self.run_turn(text).await {
                        tracing::warn!(%error, "turn failed");
                        self.emit(AgentEvent::TurnFailed { message: format!("{error:#}") });
                    }
                    self.emit(AgentEvent::AgentEnd);
                }
            }
        }
    }

    /// One turn: extend history with the user message, stream the response,
    /// record the assistant message, signal end-of-message. The user message
    /// stays in history even when the turn fails.
    async fn run_turn(&mut self, text: String) -> anyhow::Result<()> {
        self.history.push(ChatMessage::user(text));
        let request = ChatRequest {
            model: self.model.model.id.to_string(),
            system: self.system_prompt.clone(),
            messages: self.history.clone(),
        };

        tracing::debug!(backend = self.backend.name(), model = %request.model, "starting turn");
        let mut tokens = self.backend.send_streaming(&request).await?;

        let mut accumulated = String::new();
        let mut final_message = None;
        while let Some(token) = tokens.recv().await {
            match token {
                StreamToken::Delta(delta) => {
                    accumulated.push_str(&delta);
                    self.emit(AgentEvent::TextDelta { text: delta });
                }
                StreamToken::Complete { message } => {
                    final_message = Some(message);
                    break;
                }
                StreamToken::Error(message) => anyhow::bail!("{message}"),
            }
        }

        // A backend that closes the channel without Complete still counts as
        // a finished message; the deltas we saw are the response.
        let response = final_message.unwrap_or(accumulated);
        self.history.push(ChatMessage::assistant(response));
        self.emit(AgentEvent::MessageEnd);
        Ok(())
    }

    fn emit(&self, event: AgentEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}
