//! Moving Bears entry point
//!
//! Handles platform-specific initialization and runs the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent};

    use moving_bears::Settings;
    use moving_bears::platform::web::{SharedGame, WebScheduler, load_roster_async};
    use moving_bears::sim::{Game, GamePhase};

    /// DOM elements owned by the render loop
    struct View {
        document: Document,
        arena: Element,
        /// Ids currently present as marker elements
        rendered: Vec<u32>,
    }

    impl View {
        fn new(document: Document, arena: Element) -> Self {
            Self {
                document,
                arena,
                rendered: Vec::new(),
            }
        }

        fn render(&mut self, game: &SharedGame) {
            let g = game.borrow();

            // Roster changed (first load or restart): rebuild markers
            let ids: Vec<u32> = g.pool().iter().map(|e| e.id).collect();
            if ids != self.rendered {
                self.rebuild(&g);
                self.rendered = ids;
            }

            for marker in g.markers() {
                if let Some(el) = self.document.get_element_by_id(&marker_dom_id(marker.id)) {
                    let _ = el.set_attribute("style", &marker.css_style());
                    let class = if marker.clicked { "bear clicked" } else { "bear" };
                    let _ = el.set_attribute("class", class);
                }
            }

            self.update_hud(&g);
        }

        fn rebuild(&self, g: &Game<WebScheduler>) {
            self.arena.set_inner_html("");
            for marker in g.markers() {
                if let Ok(el) = self.document.create_element("div") {
                    el.set_id(&marker_dom_id(marker.id));
                    let _ = el.set_attribute("data-bear-id", &marker.id.to_string());
                    el.set_text_content(Some(&format!("{} #{}", marker.label, marker.id)));
                    let _ = self.arena.append_child(&el);
                }
            }
            log::debug!("Rendered {} markers", g.pool().len());
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, g: &Game<WebScheduler>) {
            let session = g.session();
            self.set_text("hud-state", session.phase.as_str());
            self.set_text("hud-time", &session.time_remaining.to_string());
            self.set_text(
                "hud-progress",
                &format!("{}/{}", g.pool().clicked_count(), g.pool().len()),
            );
            let next = g
                .expected_next_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            self.set_text("hud-next", &next);
            self.set_text("game-message", &session.message);

            self.set_hidden("start-btn", session.phase != GamePhase::Waiting);
            self.set_hidden("restart-btn", !session.phase.is_terminal());
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    fn marker_dom_id(id: u32) -> String {
        format!("bear-{id}")
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        let _ = console_log::init_with_level(settings.log_level());

        log::info!("Moving Bears starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document");
            return;
        };
        let Some(arena) = document.get_element_by_id("arena") else {
            log::error!("no #arena element");
            return;
        };

        let seed = settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = WebScheduler::shared_game(seed);
        log::info!("Game initialized with seed: {}", seed);

        load_roster_async(&game, settings.api_url.clone());

        setup_arena_clicks(&arena, game.clone());
        setup_buttons(&document, game.clone(), settings.api_url.clone());

        let view = Rc::new(RefCell::new(View::new(document, arena)));
        request_render(view, game);

        log::info!("Moving Bears running!");
    }

    fn setup_arena_clicks(arena: &Element, game: SharedGame) {
        // One delegated listener; markers carry their id in data-bear-id
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target() else {
                return;
            };
            let Ok(el) = target.dyn_into::<Element>() else {
                return;
            };
            let Ok(Some(marker)) = el.closest("[data-bear-id]") else {
                return;
            };
            let Some(id) = marker
                .get_attribute("data-bear-id")
                .and_then(|s| s.parse::<u32>().ok())
            else {
                return;
            };
            let outcome = game.borrow_mut().on_click(id);
            log::debug!("Click on bear {id}: {outcome:?}");
        });
        let _ = arena.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: SharedGame, api_url: String) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Err(err) = game.borrow_mut().start() {
                    log::info!("Start rejected: {err}");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
                load_roster_async(&game, api_url.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Paint loop, independent of the simulation's own frame schedule
    fn request_render(view: Rc<RefCell<View>>, game: SharedGame) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // once_into_js frees the wrapper after it runs
        let callback = Closure::once_into_js(move |_time: f64| {
            view.borrow_mut().render(&game);
            request_render(view, game);
        });
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use moving_bears::Settings;
    use moving_bears::bears::{Bear, DataUnavailable};
    use moving_bears::platform::ManualScheduler;
    use moving_bears::sim::Game;

    env_logger::init();
    log::info!("Moving Bears (native) starting...");
    log::info!("Native mode plays one headless round - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let mut game = Game::new(ManualScheduler::new(), settings.seed.unwrap_or(7));

    // No browser, no catalogue: exercise the fallback roster
    let mut offline = || -> Result<Vec<Bear>, DataUnavailable> {
        Err(DataUnavailable::Transport("no fetch outside the browser".to_string()))
    };
    game.load_from(&mut offline);

    if let Err(err) = game.start() {
        log::error!("{err}");
        return;
    }

    let mut frames = 0;
    while let Some(id) = game.expected_next_id() {
        for _ in 0..60 {
            if game.step_frame() {
                frames += 1;
            }
        }
        game.step_second();
        game.on_click(id);
    }

    println!(
        "{} after {} frames, {}s left: {}",
        game.phase().as_str(),
        frames,
        game.session().time_remaining,
        game.session().message
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
