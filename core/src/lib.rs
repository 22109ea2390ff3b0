//! Cell Core - Headless Session Runtime for the cell chat client
//!
//! This crate provides everything the terminal client needs short of a
//! terminal: the provider/model catalog, startup validation, configuration,
//! system-prompt assembly, the streaming chat backend, the agent task, and
//! the session state machine. It has **zero** dependencies on ratatui,
//! crossterm, or any other UI framework.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 TUI client                    │
//! │   key events ──► Session::submit              │
//! │   AgentEvent ──► Session::apply ──► render    │
//! └───────────────┬──────────────▲────────────────┘
//!                 │ AgentCommand │ AgentEvent
//! ┌───────────────▼──────────────┴────────────────┐
//! │                 Agent task                     │
//! │   history + system prompt ──► ChatBackend      │
//! │   StreamToken ──► AgentEvent                   │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! The client and the agent communicate exclusively over tokio mpsc channels
//! carrying closed tagged enums ([`AgentCommand`] up, [`AgentEvent`] down),
//! so event ordering within a turn is guaranteed by the channel and the
//! session state machine stays testable with no UI and no network.
//!
//! # Module Overview
//!
//! - [`catalog`]: static registry of known providers and their models
//! - [`selection`]: startup validation of the requested provider/model
//! - [`config`]: `CELL_PROVIDER`/`CELL_MODEL` resolution (env, file, default)
//! - [`prompt`]: system-prompt assembly from the constitution override file
//! - [`backend`]: streaming chat backend abstraction + HTTP implementation
//! - [`agent`]: the agent task owning conversation history
//! - [`events`]: the tagged event/command types crossing the channels
//! - [`transcript`]: the append-only transcript buffer
//! - [`session`]: the per-turn state machine (transcript + input gate)

#![deny(missing_docs)]
#![deny(clippy::all)]

pub mod agent;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod events;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod transcript;

pub use agent::{Agent, AgentHandle};
pub use backend::{ChatBackend, ChatMessage, ChatRequest, HttpBackend, Role, StreamToken};
pub use catalog::{ModelSpec, ProviderSpec};
pub use config::CellConfig;
pub use events::{AgentCommand, AgentEvent};
pub use prompt::{build_system_prompt, DEFAULT_SYSTEM_PROMPT};
pub use selection::{select_model, SelectedModel, SelectionError};
pub use session::Session;
pub use transcript::Transcript;
