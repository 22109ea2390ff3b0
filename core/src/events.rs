//! Agent Channel Types
//!
//! The tagged enums that cross the two mpsc channels between the client and
//! the agent task. Both are closed sum types so the consumer match is checked
//! exhaustively at compile time; there is deliberately no catch-all variant.
//!
//! Per-turn ordering guarantee, enforced by the agent and relied on by the
//! session state machine:
//!
//! - success: `TextDelta*`, `MessageEnd`, `AgentEnd`
//! - failure: `TextDelta*`, `TurnFailed`, `AgentEnd` (no `MessageEnd`)

/// Requests from the client to the agent task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentCommand {
    /// Run one conversational turn for the given user text.
    Prompt {
        /// The submitted user text, already trimmed and non-empty
        text: String,
    },
}

/// Events from the agent task to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    /// A streamed fragment of the in-flight assistant response.
    TextDelta {
        /// The fragment, appended verbatim to the pending response
        text: String,
    },
    /// The assistant response is complete.
    MessageEnd,
    /// The turn settled; the client may accept input again. Sent exactly once
    /// per turn, after `MessageEnd` or `TurnFailed`.
    AgentEnd,
    /// The turn failed; no `MessageEnd` follows.
    TurnFailed {
        /// Human-readable failure description
        message: String,
    },
}
