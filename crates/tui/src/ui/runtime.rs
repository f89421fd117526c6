//! Runtime: terminal lifecycle and the event loop.
//!
//! Responsibilities
//! - Own the terminal lifecycle (raw mode, alternate screen) and restore it
//!   on every exit path.
//! - Forward terminal input from a dedicated blocking thread over a channel.
//! - Route keys through `MainView` and execute the returned `Effect`s against
//!   the dashboard client. Long operations run on their own tasks so the loop
//!   never waits on the network.
//! - Redraw on input, and on a short UI tick whenever the client's view
//!   revision has moved.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use stackwatch_engine::DashboardClient;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, Effect};
use crate::ui::main_component::MainView;
use crate::ui::theme;

const UI_TICK: Duration = Duration::from_millis(250);

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Spawn a thread that blocks on terminal input and forwards events.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        // Receiver dropped: the event loop has exited.
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

fn setup_terminal() -> Result<DashboardTerminal> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn cleanup_terminal(terminal: &mut DashboardTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut DashboardTerminal, app: &App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Whether the loop should keep running after a batch of effects.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn process_effects(app: &App, effects: Vec<Effect>) -> Flow {
    for effect in effects {
        debug!(?effect, "processing effect");
        match effect {
            Effect::Quit => return Flow::Exit,
            Effect::Refresh => {
                app.client.spawn_cycle();
            }
            Effect::ShowRecentRecords => {
                let client = Arc::clone(&app.client);
                tokio::spawn(async move { client.show_recent_records().await });
            }
            Effect::SubmitForm => {
                app.client.spawn_submit_form();
            }
            Effect::ToggleAutoRefresh => {
                let running = app.client.toggle_auto_refresh();
                info!(running, "auto-refresh toggled");
            }
        }
    }
    Flow::Continue
}

async fn event_loop(terminal: &mut DashboardTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut ticker = time::interval(UI_TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    app.sync();
    render(terminal, app, main_view)?;

    loop {
        let needs_render = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key) = event
                    && key.kind == KeyEventKind::Press
                {
                    let effects = main_view.handle_key_events(app, key);
                    if process_effects(app, effects) == Flow::Exit {
                        break;
                    }
                }
                app.sync();
                true
            }
            _ = ticker.tick() => app.sync(),
            _ = signal::ctrl_c() => break,
        };

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}

/// Set up the terminal, start auto-refresh, and run until the user quits.
pub async fn run_app(client: Arc<DashboardClient>) -> Result<()> {
    let mut app = App::new(Arc::clone(&client), theme::load());
    let mut main_view = MainView::default();
    let mut terminal = setup_terminal()?;

    client.launch();
    let outcome = event_loop(&mut terminal, &mut app, &mut main_view).await;
    client.stop();

    cleanup_terminal(&mut terminal)?;
    outcome
}
