//! Windy Glider entry point
//!
//! Handles platform-specific initialization and drives the simulation.
//! Rendering is out of scope here: the wasm build runs the sim off
//! `requestAnimationFrame`, feeds pointer events in, and mirrors sim
//! events into HUD DOM nodes; the native build runs a scripted headless
//! demo for quick sanity checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlInputElement, PointerEvent};

    use windy_glider::consts::*;
    use windy_glider::sim::{tick, GameEvent, GameState};
    use windy_glider::{Leaderboard, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        leaderboard: Leaderboard,
        last_time: f64,
        game_over_shown: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                settings: Settings::load(),
                leaderboard: Leaderboard::load(),
                last_time: 0.0,
                game_over_shown: false,
            }
        }

        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.game_over_shown = false;
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Convert pointer screen coordinates to world coordinates
        /// (the camera only scrolls horizontally)
        fn to_world(&self, x: f32, y: f32) -> (f32, f32) {
            (x + self.state.camera_left(), y)
        }

        /// Advance the sim and mirror events into the HUD
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                FRAME_MS
            };
            self.last_time = time;

            tick(&mut self.state, dt);

            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };

            for event in self.state.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) => {
                        set_text(&document, "score", &format!("Score: {}", score));
                    }
                    GameEvent::LivesChanged(lives) => {
                        set_text(&document, "lives", &format!("Lives: {}", lives));
                    }
                    GameEvent::DistanceChanged(distance) => {
                        set_text(&document, "distance", &format!("{:.0} m", distance));
                    }
                    GameEvent::WindChanged(strength) => {
                        set_text(
                            &document,
                            "wind-meter",
                            &format!("Wind: {:.0}%", strength * 100.0),
                        );
                    }
                    GameEvent::PowerUpActivated(kind) => {
                        set_text(&document, "powerup", &format!("{:?}!", kind));
                    }
                    GameEvent::Smashed => {
                        if self.settings.effective_flash_effects() {
                            set_text(&document, "powerup", "SMASH!");
                        }
                    }
                    GameEvent::GameOver { score, distance } => {
                        self.show_game_over(&document, score, distance);
                    }
                }
            }
        }

        fn show_game_over(&mut self, document: &Document, score: u64, distance: f32) {
            if self.game_over_shown {
                return;
            }
            self.game_over_shown = true;

            set_text(
                document,
                "final-score",
                &format!("Score: {}  Distance: {:.0} m", score, distance),
            );
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "");
            }
            if self.leaderboard.qualifies(score, distance as u64) {
                if let Some(el) = document.get_element_by_id("name-entry") {
                    let _ = el.set_attribute("class", "");
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn render_leaderboard(document: &Document, board: &Leaderboard) {
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_text_content(None);
        for (i, entry) in board.entries.iter().enumerate() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&format!(
                    "{}. {} - {} ({} m)",
                    i + 1,
                    entry.name,
                    entry.score,
                    entry.distance
                )));
                let _ = list.append_child(&li);
            }
        }
    }

    fn setup_pointer_events(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let Some(canvas) = document.get_element_by_id("canvas") else {
            log::warn!("No canvas element; pointer input disabled");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: PointerEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.to_world(e.offset_x() as f32, e.offset_y() as f32);
                g.state.pointer_down(x, y, e.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: PointerEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.to_world(e.offset_x() as f32, e.offset_y() as f32);
                g.state.pointer_move(x, y, e.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: PointerEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.to_world(e.offset_x() as f32, e.offset_y() as f32);
                g.state.pointer_up(x, y, e.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Restart button: full state reset discards all in-flight timers
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_e: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("class", "hidden");
                }
                if let Some(el) = document.get_element_by_id("name-entry") {
                    let _ = el.set_attribute("class", "hidden");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaderboard name submission
        if let Some(btn) = document.get_element_by_id("submit-score-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_e: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let name = document
                    .get_element_by_id("name-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();

                let mut g = game.borrow_mut();
                let score = g.state.score;
                let distance = g.state.distance as u64;
                if let Some(rank) = g.leaderboard.add_entry(&name, score, distance) {
                    log::info!("Leaderboard rank {} for {}", rank, name);
                }
                g.leaderboard.save();
                render_leaderboard(&document, &g.leaderboard);
                if let Some(el) = document.get_element_by_id("name-entry") {
                    let _ = el.set_attribute("class", "hidden");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        let seed = js_sys::Date::now() as u64;
        log::info!("Windy Glider starting with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(seed)));

        if game.borrow().settings.show_instructions {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(
                    &document,
                    "instructions",
                    "Swipe or drag to create wind. Guide the glider through the obstacles!",
                );
            }
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            render_leaderboard(&document, &game.borrow().leaderboard);
        }

        setup_pointer_events(game.clone());
        setup_buttons(game.clone());

        // requestAnimationFrame loop
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));
        request_animation_frame(g.borrow().as_ref().unwrap());
    }

    fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
        web_sys::window()
            .expect("no window")
            .request_animation_frame(f.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use windy_glider::consts::FRAME_MS;
    use windy_glider::sim::{tick, GameEvent, GamePhase, GameState};
    use windy_glider::Leaderboard;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(20260830);
    log::info!("Windy Glider headless demo, seed {}", seed);

    let mut state = GameState::new(seed);
    let mut clock_ms = 0.0f64;

    // Fly for up to two minutes, swiping up-and-forward every couple of
    // seconds to stay off the ground
    let mut next_gesture_ms = 500.0;
    while state.phase == GamePhase::Playing && clock_ms < 120_000.0 {
        if clock_ms >= next_gesture_ms {
            let gx = state.glider.pos.x;
            let gy = state.glider.pos.y;
            state.pointer_down(gx - 100.0, gy + 150.0, clock_ms);
            state.pointer_up(gx - 20.0, gy + 30.0, clock_ms + 120.0);
            next_gesture_ms += 2_000.0;
        }

        tick(&mut state, FRAME_MS);
        clock_ms += f64::from(FRAME_MS);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::debug!("score {}", score),
                GameEvent::LivesChanged(lives) => log::info!("lives {}", lives),
                GameEvent::PowerUpActivated(kind) => log::info!("power-up {:?}", kind),
                GameEvent::GameOver { score, distance } => {
                    println!("Game over: score {} distance {:.0} m", score, distance);
                }
                _ => {}
            }
        }
    }

    println!(
        "Demo finished after {:.1} s: score {} distance {:.0} m difficulty {}",
        clock_ms / 1000.0,
        state.score,
        state.distance,
        state.difficulty
    );

    let mut board = Leaderboard::load();
    if let Some(rank) = board.add_entry("demo", state.score, state.distance as u64) {
        println!("Demo run would rank #{} on the leaderboard", rank);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
