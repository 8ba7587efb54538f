//! Application state and the terminal loop.

use crate::input::{KeyAction, map_key};
use crate::settings::Settings;
use crate::ui;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tictactoe_core::{
    CpuAgent, FileStore, GameConfig, GameController, GameSession, InputEvent, Position, RenderView,
    ScoreTracker,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// What the terminal shows.
///
/// Settings are owned here: the frontend is their only writer, so key
/// presses build on the last requested config rather than the last
/// rendered one.
pub struct App {
    cursor: Position,
    view: RenderView,
    config: GameConfig,
}

impl App {
    /// Creates the application showing `view`.
    pub fn new(view: RenderView) -> Self {
        Self {
            cursor: Position::Center,
            config: view.config,
            view,
        }
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Latest frame from the controller.
    pub fn view(&self) -> &RenderView {
        &self.view
    }

    /// Replaces the displayed frame.
    pub fn set_view(&mut self, view: RenderView) {
        self.view = view;
    }

    /// Configuration as last requested.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Handles a key. Cursor moves are applied here and reported as
    /// [`KeyAction::Cursor`]; the caller forwards [`KeyAction::Send`].
    pub fn on_key(&mut self, code: event::KeyCode) -> KeyAction {
        let action = map_key(code, self.cursor, self.config());
        match action {
            KeyAction::Cursor(pos) => self.cursor = pos,
            KeyAction::Send(InputEvent::ConfigChanged(config)) => self.config = config,
            _ => {}
        }
        action
    }
}

/// Runs the game until the user quits.
#[instrument(skip_all, fields(scores_dir = %settings.scores_dir().display()))]
pub async fn run(settings: Settings) -> Result<()> {
    let config = *settings.game();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(GameSession::new(config, ScoreTracker::new()).view());

    let renderer = move |view: &RenderView| {
        let _ = view_tx.send(view.clone());
    };
    let controller = GameController::new(
        config,
        CpuAgent::new(config.cpu_level),
        Box::new(FileStore::new(settings.scores_dir())),
        Box::new(renderer),
    );
    let controller_task = tokio::spawn(controller.run(input_rx));

    let ui_result = tokio::task::spawn_blocking(move || run_terminal(input_tx, view_rx))
        .await
        .context("Terminal task panicked")?;

    let controller = controller_task.await.context("Controller task panicked")?;
    info!(scores = ?controller.session().scores(), "Session ended");
    ui_result
}

/// Sets up the terminal, runs the loop, and always restores the terminal.
fn run_terminal(
    input: mpsc::UnboundedSender<InputEvent>,
    views: watch::Receiver<RenderView>,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = event_loop(&mut terminal, &input, views);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Terminal loop error");
    }
    res
}

fn event_loop(
    terminal: &mut Tui,
    input: &mpsc::UnboundedSender<InputEvent>,
    mut views: watch::Receiver<RenderView>,
) -> Result<()> {
    let mut app = App::new(views.borrow_and_update().clone());
    info!("Terminal loop started");

    loop {
        if views.has_changed().unwrap_or(false) {
            app.set_view(views.borrow_and_update().clone());
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.on_key(key.code) {
            KeyAction::Quit => {
                info!("User quit");
                return Ok(());
            }
            KeyAction::Send(event) => {
                debug!(?event, "Forwarding input");
                input.send(event).context("Controller stopped")?;
            }
            KeyAction::Cursor(_) | KeyAction::Ignore => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use tictactoe_core::{CpuLevel, Mark, Mode};

    fn app() -> App {
        App::new(GameSession::default().view())
    }

    #[test]
    fn test_repeated_toggles_before_redraw_accumulate() {
        let mut app = app();

        let first = app.on_key(KeyCode::Char('m'));
        let second = app.on_key(KeyCode::Char('m'));

        let KeyAction::Send(InputEvent::ConfigChanged(first)) = first else {
            panic!("expected config change, got {first:?}");
        };
        let KeyAction::Send(InputEvent::ConfigChanged(second)) = second else {
            panic!("expected config change, got {second:?}");
        };
        assert_eq!(first.mode, Mode::PvCpu);
        assert_eq!(second.mode, Mode::PvP);
    }

    #[test]
    fn test_settings_survive_stale_frame() {
        let mut app = app();
        let stale = app.view().clone();

        app.on_key(KeyCode::Char('x'));
        app.on_key(KeyCode::Char('l'));
        app.set_view(stale);

        assert_eq!(app.config().human_mark, Mark::O);
        assert_eq!(app.config().cpu_level, CpuLevel::Hard);
        assert_eq!(app.view().config.human_mark, Mark::X);
    }

    #[test]
    fn test_arrow_moves_cursor() {
        let mut app = app();
        assert_eq!(app.on_key(KeyCode::Up), KeyAction::Cursor(Position::TopCenter));
        assert_eq!(app.cursor(), Position::TopCenter);
    }
}
