//! End-to-end session flow: the agent task driving the session state machine,
//! exactly as the TUI wires them minus the terminal.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use cell_core::{
    select_model, Agent, AgentEvent, ChatBackend, ChatRequest, Session, StreamToken,
};

/// Backend whose every turn streams the same scripted tokens.
struct ReplayBackend {
    tokens: Vec<StreamToken>,
}

#[async_trait]
impl ChatBackend for ReplayBackend {
    fn name(&self) -> &str {
        "replay"
    }

    async fn send_streaming(&self, _request: &ChatRequest) -> anyhow::Result<mpsc::Receiver<StreamToken>> {
        let (tx, rx) = mpsc::channel(self.tokens.len().max(1));
        for token in self.tokens.clone() {
            tx.try_send(token).expect("channel sized to fit");
        }
        Ok(rx)
    }
}

/// Apply agent events to the session until the turn settles.
async fn drive_turn(session: &mut Session, events: &mut mpsc::UnboundedReceiver<AgentEvent>) {
    loop {
        let event = timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("timed out waiting for agent event")
            .expect("agent task ended unexpectedly");
        let done = event == AgentEvent::AgentEnd;
        session.apply(event);
        if done {
            return;
        }
    }
}

#[tokio::test]
async fn test_full_turn_through_session() {
    let backend = ReplayBackend {
        tokens: vec![
            StreamToken::Delta("He".to_string()),
            StreamToken::Delta("llo".to_string()),
            StreamToken::Complete { message: "Hello".to_string() },
        ],
    };
    let selected = select_model("openrouter", "openrouter/auto").unwrap();
    let (handle, mut events) = Agent::spawn(backend, selected, "system");
    let mut session = Session::new();

    let text = session.submit("hi").expect("gate open");
    assert!(!session.accepting_input());
    handle.prompt(text);

    drive_turn(&mut session, &mut events).await;

    assert_eq!(session.render(), "You: hi\nAssistant: Hello");
    assert!(session.accepting_input());
    assert!(!session.transcript().assistant_in_flight());
}

#[tokio::test]
async fn test_empty_response_renders_placeholder() {
    let backend = ReplayBackend {
        tokens: vec![StreamToken::Complete { message: String::new() }],
    };
    let selected = select_model("openrouter", "openrouter/auto").unwrap();
    let (handle, mut events) = Agent::spawn(backend, selected, "system");
    let mut session = Session::new();

    handle.prompt(session.submit("hi").unwrap());
    drive_turn(&mut session, &mut events).await;

    assert_eq!(session.render(), "You: hi\nAssistant: (no output)");
}

#[tokio::test]
async fn test_failed_turn_recovers_to_idle() {
    let backend = ReplayBackend {
        tokens: vec![
            StreamToken::Delta("par".to_string()),
            StreamToken::Error("boom".to_string()),
        ],
    };
    let selected = select_model("openrouter", "openrouter/auto").unwrap();
    let (handle, mut events) = Agent::spawn(backend, selected, "system");
    let mut session = Session::new();

    handle.prompt(session.submit("hi").unwrap());
    drive_turn(&mut session, &mut events).await;

    // The partial response is discarded, the error is on the record, and the
    // session accepts input again.
    assert_eq!(session.render(), "You: hi\nError: boom");
    assert!(session.accepting_input());
    assert_eq!(session.transcript().pending(), "");
}
