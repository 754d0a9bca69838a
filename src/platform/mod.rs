//! Platform abstraction layer
//!
//! The game never owns a clock. It asks its host for animation frames and a
//! repeating interval through [`Scheduler`], keeps the returned [`TaskId`]s,
//! and cancels them when a play-through ends. Host callbacks come back in as
//! `Game::on_frame` / `Game::on_timer_tick` carrying the same id.
//!
//! - [`ManualScheduler`]: deterministic host stepped by hand (tests, native)
//! - `web::WebScheduler`: `requestAnimationFrame` + `setInterval` (wasm32)

use std::collections::HashMap;
use std::fmt;

use crate::sim::Game;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Handle for one scheduled frame or interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-side scheduling used by the game loop
pub trait Scheduler {
    /// Ask for a single callback on the next animation frame
    fn request_frame(&mut self) -> TaskId;
    fn cancel_frame(&mut self, task: TaskId);
    /// Start a repeating callback every `period_ms`
    fn start_interval(&mut self, period_ms: u32) -> TaskId;
    fn clear_interval(&mut self, task: TaskId);
}

/// Live host callbacks keyed by task, plus ones that have been retired.
///
/// A host callback may retire itself while it is still running, so retired
/// callbacks are kept until the host calls [`TaskSlots::purge_retired`] from
/// a point where none of them can be on the stack.
#[derive(Debug)]
pub struct TaskSlots<C> {
    active: HashMap<TaskId, (i32, C)>,
    retired: Vec<C>,
}

impl<C> Default for TaskSlots<C> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
            retired: Vec::new(),
        }
    }
}

impl<C> TaskSlots<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a callback registered with the host under `handle`
    pub fn insert(&mut self, task: TaskId, handle: i32, callback: C) {
        self.active.insert(task, (handle, callback));
    }

    /// Stop tracking `task`; returns the host handle to cancel, if it was live
    pub fn retire(&mut self, task: TaskId) -> Option<i32> {
        let (handle, callback) = self.active.remove(&task)?;
        self.retired.push(callback);
        Some(handle)
    }

    /// Drop every retired callback
    pub fn purge_retired(&mut self) {
        self.retired.clear();
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }
}

/// Scheduler that only records requests; time advances when the owner says so
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending_frames: Vec<TaskId>,
    intervals: Vec<(TaskId, u32)>,
    cancelled_frames: usize,
    cleared_intervals: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }

    /// Frames requested and not yet fired or cancelled
    pub fn pending_frames(&self) -> &[TaskId] {
        &self.pending_frames
    }

    /// Intervals started and not yet cleared
    pub fn active_intervals(&self) -> Vec<TaskId> {
        self.intervals.iter().map(|&(task, _)| task).collect()
    }

    /// Pop the oldest pending frame so it can be delivered
    pub fn take_frame(&mut self) -> Option<TaskId> {
        if self.pending_frames.is_empty() {
            None
        } else {
            Some(self.pending_frames.remove(0))
        }
    }

    pub fn cancelled_frames(&self) -> usize {
        self.cancelled_frames
    }

    pub fn cleared_intervals(&self) -> usize {
        self.cleared_intervals
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> TaskId {
        let task = self.alloc();
        self.pending_frames.push(task);
        task
    }

    fn cancel_frame(&mut self, task: TaskId) {
        let before = self.pending_frames.len();
        self.pending_frames.retain(|&t| t != task);
        if self.pending_frames.len() != before {
            self.cancelled_frames += 1;
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> TaskId {
        let task = self.alloc();
        self.intervals.push((task, period_ms));
        task
    }

    fn clear_interval(&mut self, task: TaskId) {
        let before = self.intervals.len();
        self.intervals.retain(|&(t, _)| t != task);
        if self.intervals.len() != before {
            self.cleared_intervals += 1;
        }
    }
}

impl Game<ManualScheduler> {
    /// Deliver the next pending animation frame. Returns false if none was pending.
    pub fn step_frame(&mut self) -> bool {
        match self.scheduler_mut().take_frame() {
            Some(task) => {
                self.on_frame(task);
                true
            }
            None => false,
        }
    }

    /// Let one second pass: every active interval fires once
    pub fn step_second(&mut self) {
        for task in self.scheduler().active_intervals() {
            self.on_timer_tick(task);
        }
    }
}
