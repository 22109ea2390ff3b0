//! cell - a minimal terminal chat client.
//!
//! Startup order matters: configuration and the provider/model selection are
//! validated before the agent, the backend, or any terminal state exists, so
//! a bad selection costs nothing but a stderr line and exit code 1.

use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use cell_core::{build_system_prompt, select_model, Agent, CellConfig, HttpBackend};
use cell_tui::{logging, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = CellConfig::load();
    let system_prompt = build_system_prompt();

    let selected = match select_model(&config.provider, &config.model) {
        Ok(selected) => selected,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    tracing::info!(%selected, "starting");

    let backend = HttpBackend::for_provider(selected.provider);
    let (agent, agent_events) = Agent::spawn(backend, selected, system_prompt);

    let mut terminal = setup_terminal()?;
    let result = App::new(agent, selected).run(&mut terminal, agent_events).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()
}
