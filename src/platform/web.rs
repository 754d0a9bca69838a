//! Browser host: animation frames, intervals and the catalogue fetch

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::{Scheduler, TaskId, TaskSlots};
use crate::bears::{Bear, DataUnavailable, parse_roster};
use crate::sim::Game;

/// The game as shared between DOM callbacks
pub type SharedGame = Rc<RefCell<Game<WebScheduler>>>;

/// Schedules callbacks on `window` that re-enter the game they belong to
pub struct WebScheduler {
    game: Weak<RefCell<Game<WebScheduler>>>,
    next_id: u32,
    /// requestAnimationFrame handles; a firing frame is purged by the next one
    frames: TaskSlots<Closure<dyn FnMut(f64)>>,
    /// setInterval handles; a tick may clear its own interval, so cleared
    /// closures are purged on the next `start_interval`
    intervals: TaskSlots<Closure<dyn FnMut()>>,
}

impl WebScheduler {
    fn new(game: Weak<RefCell<Game<WebScheduler>>>) -> Self {
        Self {
            game,
            next_id: 0,
            frames: TaskSlots::new(),
            intervals: TaskSlots::new(),
        }
    }

    /// Create a game whose scheduler holds a weak handle back to it
    pub fn shared_game(seed: u64) -> SharedGame {
        Rc::new_cyclic(|weak| RefCell::new(Game::new(WebScheduler::new(weak.clone()), seed)))
    }

    fn alloc(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }

    /// Called from inside a frame callback before the game sees it
    fn frame_fired(&mut self, task: TaskId) {
        self.frames.purge_retired();
        self.frames.retire(task);
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> TaskId {
        let task = self.alloc();
        let game = self.game.clone();
        let closure = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            if let Some(game) = game.upgrade() {
                let mut g = game.borrow_mut();
                g.scheduler_mut().frame_fired(task);
                g.on_frame(task);
            }
        });
        let requested = web_sys::window()
            .map(|w| w.request_animation_frame(closure.as_ref().unchecked_ref()));
        match requested {
            Some(Ok(handle)) => self.frames.insert(task, handle, closure),
            _ => log::error!("requestAnimationFrame failed for frame {task}"),
        }
        task
    }

    fn cancel_frame(&mut self, task: TaskId) {
        if let Some(handle) = self.frames.retire(task) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> TaskId {
        self.intervals.purge_retired();
        let task = self.alloc();
        let game = self.game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().on_timer_tick(task);
            }
        });
        let started = web_sys::window().map(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            )
        });
        match started {
            Some(Ok(handle)) => self.intervals.insert(task, handle, closure),
            _ => log::error!("setInterval failed for timer {task}"),
        }
        task
    }

    fn clear_interval(&mut self, task: TaskId) {
        if let Some(handle) = self.intervals.retire(task) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

fn transport(err: JsValue) -> DataUnavailable {
    DataUnavailable::Transport(format!("{err:?}"))
}

/// `GET url` and decode the bear list
pub async fn fetch_bears(url: &str) -> Result<Vec<Bear>, DataUnavailable> {
    let window =
        web_sys::window().ok_or_else(|| DataUnavailable::Transport("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(transport)?;
    let response: Response = response.dyn_into().map_err(transport)?;
    if !response.ok() {
        return Err(DataUnavailable::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    let body = body
        .as_string()
        .ok_or_else(|| DataUnavailable::Decode("response body is not text".to_string()))?;
    parse_roster(&body)
}

/// Fetch in the background and seed the game when the answer (or failure) arrives
pub fn load_roster_async(game: &SharedGame, url: String) {
    let game = Rc::downgrade(game);
    wasm_bindgen_futures::spawn_local(async move {
        log::info!("Loading bears from {url}");
        let fetched = fetch_bears(&url).await;
        if let Some(game) = game.upgrade() {
            game.borrow_mut().load_roster(fetched);
        }
    });
}
