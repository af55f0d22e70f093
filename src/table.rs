//! Async table: owns a `Game` and the timer for bot moves.
//!
//! Human moves are applied immediately. When a move hands the turn to a
//! bot, the table spawns a task that waits for the configured delay and
//! then plays the bot's ticket. The task handle is owned by the table, so
//! `reset` aborts it; the ticket's generation check covers the window
//! where the task has already woken up.
//!
//! Events are published while the game lock is held, so the event stream
//! follows the order in which the game changed: a bot move is either
//! published before a `Reset` or not played at all.

use crate::config::GameConfig;
use crate::controller::Game;
use crate::error::GameError;
use crate::player::Player;
use crate::position::Coord;
use crate::snapshot::{GameSnapshot, MoveReport};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Update published for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A move was applied (or rejected as occupied).
    Moved(MoveReport),
    /// The game was reset.
    Reset(GameSnapshot),
}

/// A game plus its bot timer.
#[derive(Debug)]
pub struct Table {
    game: Arc<Mutex<Game>>,
    events: UnboundedSender<TableEvent>,
    bot_delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Table {
    /// Creates a table and the receiver for its events.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> (Self, UnboundedReceiver<TableEvent>) {
        let (events, rx) = unbounded_channel();
        let table = Self {
            game: Arc::new(Mutex::new(Game::from_config(config))),
            events,
            bot_delay: config.bot_delay(),
            pending: None,
        };
        (table, rx)
    }

    /// Submits a human move and, if the bot is next, schedules its reply.
    ///
    /// # Panics
    ///
    /// Scheduling a bot move spawns a Tokio task, so this must be called
    /// from within a Tokio runtime.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, x: usize, y: usize) -> Result<MoveReport, GameError> {
        let report = {
            let mut game = lock(&self.game);
            let report = game.submit_move(x, y)?;
            publish(&self.events, TableEvent::Moved(report.clone()));
            report
        };
        if report.bot_pending {
            self.schedule_bot();
        }
        Ok(report)
    }

    /// Cancels any pending bot move and resets the game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameSnapshot {
        if let Some(handle) = self.pending.take() {
            debug!("Cancelling pending bot move");
            handle.abort();
        }
        let mut game = lock(&self.game);
        let snapshot = game.reset();
        publish(&self.events, TableEvent::Reset(snapshot.clone()));
        snapshot
    }

    /// Waits for a scheduled bot move to finish, if there is one.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take()
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!(error = %e, "Bot task failed");
        }
    }

    /// True while a bot move is scheduled and not yet played.
    pub fn bot_pending(&self) -> bool {
        lock(&self.game).pending_bot_move().is_some()
    }

    /// Full projection for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.game).snapshot()
    }

    /// Player to move.
    pub fn active_player(&self) -> Player {
        lock(&self.game).active_player().clone()
    }

    /// Empty cells in row-major order.
    pub fn unmarked_cells(&self) -> Vec<Coord> {
        lock(&self.game).unmarked_cells()
    }

    fn schedule_bot(&mut self) {
        let Some(ticket) = lock(&self.game).pending_bot_move() else {
            return;
        };
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        let game = Arc::clone(&self.game);
        let events = self.events.clone();
        let delay = self.bot_delay;
        debug!(?delay, ?ticket, "Scheduling bot move");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = lock(&game);
            match guard.play_bot_move(ticket) {
                Ok(report) => {
                    info!(coord = %report.coord, outcome = %report.outcome, "Bot moved");
                    publish(&events, TableEvent::Moved(report));
                }
                Err(e) => debug!(error = %e, "Dropping bot move"),
            }
        }));
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

fn lock(game: &Mutex<Game>) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(events: &UnboundedSender<TableEvent>, event: TableEvent) {
    if events.send(event).is_err() {
        debug!("No listener for table events");
    }
}
