//! Event routing between input, the session, the CPU and the outside world.

use super::cpu::CpuAgent;
use super::engine::{PlayOutcome, Seat};
use super::scores::{ScoreStore, ScoreTracker};
use super::session::{GameSession, RenderView};
use super::GameConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Consumes a snapshot after every state change.
pub trait Renderer: Send {
    /// Draws `view`.
    fn render(&mut self, view: &RenderView);
}

impl<F> Renderer for F
where
    F: FnMut(&RenderView) + Send,
{
    fn render(&mut self, view: &RenderView) {
        self(view)
    }
}

/// Requests coming from the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A cell (0-8) was chosen.
    CellSelected(usize),
    /// Zero the scores and start over.
    NewGameRequested,
    /// Clear the board, keep the scores.
    NewRoundRequested,
    /// Take back the last move.
    UndoRequested,
    /// Settings were edited.
    ConfigChanged(GameConfig),
}

/// A CPU move waiting for its delay to elapse.
#[derive(Debug)]
struct PendingCpu {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Drives a [`GameSession`] from [`InputEvent`]s.
///
/// Renders after every accepted change, persists scores whenever they move,
/// and plays the CPU's turn after the configured delay. Starting a new round
/// or game, undoing, or changing settings cancels a pending CPU move.
pub struct GameController {
    session: GameSession,
    cpu: CpuAgent,
    store: Box<dyn ScoreStore>,
    renderer: Box<dyn Renderer>,
    pending: Option<PendingCpu>,
    next_ticket: u64,
    cpu_tx: mpsc::UnboundedSender<u64>,
    cpu_rx: mpsc::UnboundedReceiver<u64>,
}

impl GameController {
    /// Builds a controller, loading saved scores from `store`.
    #[instrument(skip(store, renderer, cpu))]
    pub fn new(
        config: GameConfig,
        cpu: CpuAgent,
        store: Box<dyn ScoreStore>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let tracker = ScoreTracker::load(store.as_ref());
        let (cpu_tx, cpu_rx) = mpsc::unbounded_channel();
        info!(scores = ?tracker.scores(), "Controller ready");
        Self {
            session: GameSession::new(config, tracker),
            cpu,
            store,
            renderer,
            pending: None,
            next_ticket: 0,
            cpu_tx,
            cpu_rx,
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The score store.
    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Whether a delayed CPU move is waiting.
    pub fn cpu_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Renders the initial frame and schedules the CPU if it opens.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        self.refresh(false);
    }

    /// Applies one input event.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::CellSelected(index) => self.play(index, Seat::Human),
            InputEvent::NewRoundRequested => {
                self.cancel_cpu();
                self.session.new_round();
                self.refresh(false);
            }
            InputEvent::NewGameRequested => {
                self.cancel_cpu();
                self.session.new_game();
                self.refresh(true);
            }
            InputEvent::UndoRequested => {
                if self.session.undo() {
                    self.cancel_cpu();
                    self.refresh(false);
                }
            }
            InputEvent::ConfigChanged(config) => {
                self.cancel_cpu();
                if self.cpu.level() != config.cpu_level {
                    debug!(from = %self.cpu.level(), to = %config.cpu_level, "CPU level changed");
                    self.cpu.set_level(config.cpu_level);
                }
                self.session.set_config(config);
                self.refresh(false);
            }
        }
    }

    /// Processes events until `input` closes, then returns the controller.
    ///
    /// Delayed CPU moves are delivered on the same loop, so every mutation
    /// runs to completion before the next one starts.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut input: mpsc::UnboundedReceiver<InputEvent>) -> Self {
        self.start();
        loop {
            tokio::select! {
                event = input.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                Some(ticket) = self.cpu_rx.recv() => self.on_cpu_timer(ticket),
            }
        }
        self.cancel_cpu();
        info!("Input closed, controller stopped");
        self
    }

    fn play(&mut self, index: usize, seat: Seat) {
        match self.session.play(index, seat) {
            Ok(PlayOutcome::Finished(result)) => {
                debug!(?result, "Round finished");
                self.refresh(true);
            }
            Ok(PlayOutcome::Continued { next }) => {
                debug!(next = %next, "Turn passed");
                self.refresh(false);
            }
            Err(e) => debug!(index, %seat, error = %e, "Move ignored"),
        }
    }

    /// Persists if needed, renders, then schedules the CPU if it is due.
    fn refresh(&mut self, scores_changed: bool) {
        if scores_changed {
            self.persist();
        }
        let view = self.session.view();
        self.renderer.render(&view);
        if self.session.cpu_due() && self.pending.is_none() {
            self.schedule_cpu();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.session.tracker().persist(self.store.as_mut()) {
            warn!(error = %e, "Failed to persist scores");
        }
    }

    fn schedule_cpu(&mut self) {
        let delay = self.session.config().cpu_delay();
        if delay.is_zero() {
            self.play_cpu();
            return;
        }
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "No async runtime for delayed CPU move, playing now");
                self.play_cpu();
                return;
            }
        };

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let tx = self.cpu_tx.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ticket);
        });
        debug!(ticket, delay_ms = delay.as_millis() as u64, "CPU move scheduled");
        self.pending = Some(PendingCpu { ticket, handle });
    }

    fn cancel_cpu(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            debug!(ticket = pending.ticket, "Pending CPU move cancelled");
        }
    }

    /// A delay elapsed. Tickets from cancelled timers are dropped.
    fn on_cpu_timer(&mut self, ticket: u64) {
        match self.pending.as_ref() {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                self.play_cpu();
            }
            _ => debug!(ticket, "Stale CPU ticket dropped"),
        }
    }

    fn play_cpu(&mut self) {
        if !self.session.cpu_due() {
            debug!("CPU turn no longer due");
            return;
        }
        let Some(index) = self.cpu.select_move(self.session.engine().board()) else {
            return;
        };
        self.play(index, Seat::Cpu);
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("cpu", &self.cpu)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
