//! Chat Backend Abstraction
//!
//! Trait and wire types for talking to a model provider. The abstraction
//! exists so the agent can be driven by a scripted backend in tests; the one
//! production implementation is [`HttpBackend`], which speaks the
//! OpenAI-compatible streaming chat protocol every cataloged provider
//! accepts.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Who authored a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The human user
    User,
    /// The model
    Assistant,
}

impl Role {
    /// The wire name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message of conversation history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A complete request for one assistant response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    /// Model identifier as the provider expects it
    pub model: String,
    /// System prompt, sent as the leading `system` message
    pub system: String,
    /// Conversation history, oldest first, ending with the new user message
    pub messages: Vec<ChatMessage>,
}

/// Token stream events from a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamToken {
    /// A fragment of the response text
    Delta(String),
    /// Response completed successfully
    Complete {
        /// The complete response text
        message: String,
    },
    /// The stream failed; no further tokens follow
    Error(String),
}

/// A provider capable of streaming chat responses.
///
/// The receiver yields zero or more `Delta`s followed by exactly one
/// `Complete` or `Error`; the channel closes afterwards.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &str;

    /// Send a request and stream the response tokens.
    async fn send_streaming(&self, request: &ChatRequest) -> anyhow::Result<mpsc::Receiver<StreamToken>>;
}
