//! Game state machine
//!
//! `Game` is the single owner of the entity pool, the session and the
//! schedule handles. Hosts feed it three kinds of events (animation frames,
//! timer ticks, clicks) and read it back through shared references only.
//!
//! Transitions:
//! - `Waiting -> Playing` on [`Game::start`] with a non-empty pool
//! - `Playing -> Won` when the last bear is clicked in order
//! - `Playing -> Lost` on timeout or an out-of-order click
//! - any phase `-> Waiting` on [`Game::restart`]
//!
//! Entering `Won`/`Lost` cancels the frame request and the interval before
//! returning, so nothing mutates a finished play-through.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::click::{ClickVerdict, arbitrate};
use super::motion::integrate;
use super::pool::EntityPool;
use super::state::{GamePhase, GameSession, LossReason, MSG_NO_BEARS};
use super::timer::{TimerTick, apply_tick, timed_out};
use crate::bears::{Bear, BearProvider, DataUnavailable, load_roster};
use crate::consts::TIMER_PERIOD_MS;
use crate::platform::{Scheduler, TaskId};

/// Why `start` did not begin a play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// Pool is empty; the session message explains it to the player
    NoBears,
    /// Already playing or finished; restart first
    NotWaiting(GamePhase),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::NoBears => write!(f, "{MSG_NO_BEARS}"),
            StartError::NotWaiting(phase) => {
                write!(f, "cannot start while {}", phase.as_str())
            }
        }
    }
}

impl std::error::Error for StartError {}

/// Result of forwarding a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Stale click, nothing changed
    Ignored,
    /// Right bear; cursor moved to `next_index`
    Advanced { next_index: usize },
    Won,
    Lost(LossReason),
}

/// What a view needs to draw one bear
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker<'a> {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub clicked: bool,
    pub label: &'a str,
    pub color: Option<&'a str>,
}

impl Marker<'_> {
    /// Inline CSS placing the marker in the arena, tinted with the bear's first color
    pub fn css_style(&self) -> String {
        let mut style = format!("left: {:.2}%; top: {:.2}%;", self.x, self.y);
        if let Some(color) = self.color {
            style.push_str(&format!(" background-color: {color};"));
        }
        style
    }
}

pub struct Game<S: Scheduler> {
    pool: EntityPool,
    session: GameSession,
    rng: Pcg32,
    scheduler: S,
    /// Pending animation frame for the current play-through
    frame_task: Option<TaskId>,
    /// Running countdown interval for the current play-through
    timer_task: Option<TaskId>,
}

impl<S: Scheduler> Game<S> {
    pub fn new(scheduler: S, seed: u64) -> Self {
        Self {
            pool: EntityPool::new(),
            session: GameSession::new(),
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            frame_task: None,
            timer_task: None,
        }
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn frame_task(&self) -> Option<TaskId> {
        self.frame_task
    }

    pub fn timer_task(&self) -> Option<TaskId> {
        self.timer_task
    }

    /// Id of the bear that must be clicked next, if playing
    pub fn expected_next_id(&self) -> Option<u32> {
        if !self.session.is_playing() {
            return None;
        }
        self.pool
            .sorted_by_id()
            .nth(self.session.expected_click_index)
            .map(|e| e.id)
    }

    pub fn markers(&self) -> impl Iterator<Item = Marker<'_>> {
        self.pool.iter().map(|e| Marker {
            id: e.id,
            x: e.pos.x,
            y: e.pos.y,
            clicked: e.clicked,
            label: e.bear.name.as_str(),
            color: e.bear.primary_color(),
        })
    }

    /// Seed the pool from a fetch result, falling back to the built-in roster.
    ///
    /// Only applies while waiting; a roster arriving mid-game is dropped so
    /// the pool never changes size during play. Returns whether it was applied.
    pub fn load_roster(&mut self, fetched: Result<Vec<Bear>, DataUnavailable>) -> bool {
        if self.session.phase != GamePhase::Waiting {
            log::warn!(
                "Ignoring roster delivered while {}",
                self.session.phase.as_str()
            );
            return false;
        }
        let bears = load_roster(fetched);
        self.pool.seed(bears, &mut self.rng);
        log::info!("Seeded {} bears", self.pool.len());
        true
    }

    /// Fetch synchronously from `provider` and seed
    pub fn load_from(&mut self, provider: &mut impl BearProvider) -> bool {
        let fetched = provider.fetch_all();
        self.load_roster(fetched)
    }

    /// `Waiting -> Playing`
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.session.phase != GamePhase::Waiting {
            log::warn!("Start ignored while {}", self.session.phase.as_str());
            return Err(StartError::NotWaiting(self.session.phase));
        }
        if self.pool.is_empty() {
            self.session.message = MSG_NO_BEARS.to_string();
            log::warn!("{MSG_NO_BEARS}");
            return Err(StartError::NoBears);
        }

        self.cancel_schedules();
        self.session.begin();
        self.pool.reset();
        self.timer_task = Some(self.scheduler.start_interval(TIMER_PERIOD_MS));
        self.frame_task = Some(self.scheduler.request_frame());
        log::info!("Game started with {} bears", self.pool.len());

        self.check_timeout();
        Ok(())
    }

    /// Animation frame callback: one motion step, then ask for the next frame
    pub fn on_frame(&mut self, task: TaskId) {
        if self.frame_task != Some(task) {
            log::debug!("Dropping stale frame {task}");
            return;
        }
        self.frame_task = None;
        if !self.session.is_playing() {
            return;
        }
        integrate(&mut self.pool);
        self.frame_task = Some(self.scheduler.request_frame());
    }

    /// Interval callback: one second off the countdown
    pub fn on_timer_tick(&mut self, task: TaskId) {
        if self.timer_task != Some(task) {
            log::debug!("Dropping stale timer tick {task}");
            return;
        }
        if let TimerTick::Counted { remaining } = apply_tick(&mut self.session) {
            log::debug!("{remaining}s left");
        }
        self.check_timeout();
    }

    /// Click from the view
    pub fn on_click(&mut self, id: u32) -> ClickOutcome {
        match arbitrate(&self.pool, &self.session, id) {
            ClickVerdict::Stale => {
                log::debug!("Click on bear {id} ignored");
                ClickOutcome::Ignored
            }
            ClickVerdict::Correct { completes } => {
                if let Some(entity) = self.pool.get_mut(id) {
                    entity.clicked = true;
                }
                self.session.expected_click_index += 1;
                log::debug!(
                    "Bear {id} clicked in order ({}/{})",
                    self.session.expected_click_index,
                    self.pool.len()
                );
                if completes {
                    self.finish_won();
                    ClickOutcome::Won
                } else {
                    ClickOutcome::Advanced {
                        next_index: self.session.expected_click_index,
                    }
                }
            }
            ClickVerdict::OutOfOrder { clicked, expected } => {
                let reason = LossReason::WrongOrder { clicked, expected };
                self.finish_lost(reason);
                ClickOutcome::Lost(reason)
            }
        }
    }

    /// Back to `Waiting`. The caller reseeds via [`Game::load_roster`] once data arrives.
    pub fn restart(&mut self) {
        self.cancel_schedules();
        self.session.back_to_waiting();
        log::info!("Game reset, waiting for roster");
    }

    /// Restart and reseed from a synchronous provider
    pub fn restart_with(&mut self, provider: &mut impl BearProvider) {
        self.restart();
        self.load_from(provider);
    }

    fn finish_won(&mut self) {
        self.session.finish_won();
        self.cancel_schedules();
        log::info!("Game won");
    }

    fn finish_lost(&mut self, reason: LossReason) {
        self.session.finish_lost(reason);
        self.cancel_schedules();
        log::info!("Game lost: {}", self.session.message);
    }

    /// Runs after every change to the countdown or phase
    fn check_timeout(&mut self) {
        if timed_out(&self.session) {
            self.finish_lost(LossReason::Timeout);
        }
    }

    fn cancel_schedules(&mut self) {
        if let Some(task) = self.frame_task.take() {
            self.scheduler.cancel_frame(task);
        }
        if let Some(task) = self.timer_task.take() {
            self.scheduler.clear_interval(task);
        }
    }
}
