//! Pet Rescue entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, TouchEvent};

    use pet_rescue::audio::AudioManager;
    use pet_rescue::consts::*;
    use pet_rescue::renderer::{RenderState, build_scene};
    use pet_rescue::sim::{
        Character, Difficulty, RunConfig, RunEvent, RunPhase, RunState, SoundCue, TickInput, tick,
    };
    use pet_rescue::{HighScores, Progress, Settings};

    /// Game instance holding all state
    struct Game {
        run: Option<RunState>,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        events: Vec<RunEvent>,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        progress: Progress,
        /// Guards against recording the same finished run twice
        run_recorded: bool,
        /// Resume countdown deadline (performance.now ms)
        resume_at: Option<f64>,
    }

    impl Game {
        fn new() -> Self {
            Self {
                run: None,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                events: Vec::new(),
                audio: AudioManager::new(),
                settings: Settings::load(),
                highscores: HighScores::load(),
                progress: Progress::load(),
                run_recorded: false,
                resume_at: None,
            }
        }

        fn start_run(&mut self, config: RunConfig) -> Result<(), pet_rescue::sim::ConfigError> {
            let seed = js_sys::Date::now() as u64;
            let run = RunState::new(config, seed)?;
            log::info!("Run started with seed: {}", seed);
            self.run = Some(run);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.run_recorded = false;
            self.resume_at = None;
            Ok(())
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            // Finish the resume countdown before unpausing
            if let Some(deadline) = self.resume_at {
                if time >= deadline {
                    self.resume_at = None;
                    if let Some(run) = self.run.as_mut() {
                        run.set_paused(false);
                    }
                }
            }

            let Some(run) = self.run.as_mut() else { return };

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(run, &input, &mut self.events);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump_pressed = false;
            }

            self.handle_events();
        }

        /// React to whatever the simulation emitted this frame
        fn handle_events(&mut self) {
            let Some(run) = self.run.as_ref() else { return };
            let character = run.config.character;
            let level = run.config.level;
            let nickname = run.config.nickname.clone();
            let kibble = run.kibble;

            let events = std::mem::take(&mut self.events);
            for event in events {
                match event {
                    RunEvent::Sound(cue) => {
                        self.audio.play(cue, character, &self.settings);
                    }
                    RunEvent::Victory { final_score } => {
                        self.audio
                            .play(SoundCue::Victory, character, &self.settings);
                        self.finish_run(&nickname, final_score, kibble, level, true, character);
                    }
                    RunEvent::Defeat { final_score } => {
                        self.audio.play(SoundCue::Defeat, character, &self.settings);
                        self.finish_run(&nickname, final_score, kibble, level, false, character);
                    }
                    // Counters are re-read from the run state every frame
                    RunEvent::ScoreChanged(_)
                    | RunEvent::KibbleChanged(_)
                    | RunEvent::HealthChanged(_) => {}
                }
            }
        }

        fn finish_run(
            &mut self,
            nickname: &str,
            final_score: u32,
            kibble: u32,
            level: u32,
            won: bool,
            character: Character,
        ) {
            if self.run_recorded {
                return;
            }
            self.run_recorded = true;

            if won {
                self.progress.unlock_level(level + 1);
                if level == 3 {
                    // Reaching home on the last level earns a gallery photo
                    self.progress.unlock_photo(character.as_str());
                    self.audio.play_shutter(&self.settings);
                }
                self.progress.save();
            }

            if let Some(rank) = self
                .highscores
                .record(nickname, final_score, kibble, js_sys::Date::now())
            {
                log::info!("New high score: rank {} ({})", rank, final_score);
            }
            self.highscores.save();
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(run) = self.run.as_ref() else { return };
            if let Some(ref mut render_state) = self.render_state {
                let scene = build_scene(run);
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, time: f64) {
            let Some(run) = self.run.as_ref() else { return };
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&run.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-kibble .hud-value").ok().flatten() {
                el.set_text_content(Some(&run.kibble.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-health .hud-value").ok().flatten() {
                let hearts: String = (0..MAX_HEALTH)
                    .map(|i| if i < run.health { '\u{2665}' } else { '\u{2661}' })
                    .collect();
                el.set_text_content(Some(&hearts));
            }

            // Resume countdown overlay
            if let Some(el) = document.get_element_by_id("countdown") {
                match self.resume_at {
                    Some(deadline) if deadline > time => {
                        let _ = el.set_attribute("class", "");
                        let remaining = ((deadline - time) / 1000.0).ceil() as u32;
                        el.set_text_content(Some(&remaining.to_string()));
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            // Pause menu
            if let Some(el) = document.get_element_by_id("pause-menu") {
                if run.is_paused() && self.resume_at.is_none() {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Victory screen
            if let Some(el) = document.get_element_by_id("victory-screen") {
                if run.phase == RunPhase::Victory {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("victory-score") {
                        score_el.set_text_content(Some(&run.final_score().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Game over screen
            if let Some(el) = document.get_element_by_id("game-over") {
                if run.phase == RunPhase::Defeat {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&run.final_score().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Read the run configuration out of the menu form
    fn read_menu_config(document: &web_sys::Document, progress: &Progress) -> RunConfig {
        let nickname = document
            .get_element_by_id("nickname")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();

        let level = document
            .get_element_by_id("level-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .and_then(|sel| sel.value().parse::<u32>().ok())
            .unwrap_or(1);

        let character = document
            .get_element_by_id("character-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|sel| sel.value())
            .as_deref()
            .map(|v| match v {
                "cat" => Character::Cat,
                "rabbit" if progress.rabbit_unlocked() => Character::Rabbit,
                _ => Character::Dog,
            })
            .unwrap_or(Character::Dog);

        let difficulty = document
            .get_element_by_id("difficulty-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|sel| {
                if sel.value() == "hard" {
                    Difficulty::Hard
                } else {
                    Difficulty::Normal
                }
            })
            .unwrap_or_default();

        RunConfig {
            character,
            difficulty,
            level,
            nickname,
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pet Rescue starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new()));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        populate_menu(&document, &game.borrow().progress);

        setup_input_handlers(&canvas, game.clone());
        setup_menu(game.clone());
        setup_pause_menu(game.clone());
        setup_settings_toggles(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pet Rescue running!");
    }

    /// Reflect unlock progress in the menu (locked levels and the rabbit)
    fn populate_menu(document: &web_sys::Document, progress: &Progress) {
        let unlocked = progress.unlocked_level().min(3);
        for level in 1..=3u32 {
            if let Some(opt) = document.get_element_by_id(&format!("level-opt-{}", level)) {
                if level > unlocked {
                    let _ = opt.set_attribute("disabled", "disabled");
                } else {
                    let _ = opt.remove_attribute("disabled");
                }
            }
        }

        if let Some(opt) = document.get_element_by_id("character-opt-rabbit") {
            if progress.rabbit_unlocked() {
                let _ = opt.remove_attribute("disabled");
            } else {
                let _ = opt.set_attribute("disabled", "disabled");
            }
        }
    }

    fn setup_menu(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut g = game.borrow_mut();
                let config = read_menu_config(&document, &g.progress);

                match g.start_run(config) {
                    Ok(()) => {
                        g.audio.resume();
                        if let Some(el) = document.get_element_by_id("menu") {
                            let _ = el.set_attribute("class", "hidden");
                        }
                        if let Some(el) = document.get_element_by_id("menu-error") {
                            el.set_text_content(None);
                        }
                        if let Some(el) = document.get_element_by_id("hud") {
                            let _ = el.set_attribute("class", "");
                        }
                    }
                    Err(err) => {
                        if let Some(el) = document.get_element_by_id("menu-error") {
                            el.set_text_content(Some(&err.to_string()));
                        }
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back-to-menu buttons on the end screens
        for id in ["victory-menu-btn", "gameover-menu-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let document = web_sys::window().unwrap().document().unwrap();
                    let mut g = game.borrow_mut();
                    g.run = None;
                    populate_menu(&document, &g.progress);
                    for hide in ["victory-screen", "game-over", "hud"] {
                        if let Some(el) = document.get_element_by_id(hide) {
                            let _ = el.set_attribute("class", "hidden");
                        }
                    }
                    if let Some(el) = document.get_element_by_id("menu") {
                        let _ = el.set_attribute("class", "");
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: space or up arrow jumps; Escape pauses
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.input.jump_pressed = true;
                        }
                        g.input.jump_held = true;
                    }
                    "Escape" => {
                        if let Some(run) = g.run.as_mut() {
                            if run.phase == RunPhase::Active {
                                run.set_paused(true);
                            }
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "ArrowUp") {
                    game.borrow_mut().input.jump_held = false;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: press and hold anywhere on the canvas to jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.jump_pressed = true;
                g.input.jump_held = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.jump_held = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pause_menu(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(run) = g.run.as_mut() {
                    if run.phase == RunPhase::Active {
                        run.set_paused(true);
                    }
                }
                g.resume_at = None;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resume runs a 3 second countdown before the run continues
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let now = web_sys::window()
                    .and_then(|w| w.performance())
                    .map(|p| p.now())
                    .unwrap_or(0.0);
                game.borrow_mut().resume_at = Some(now + 3000.0);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_settings_toggles(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for (id, animal) in [("animal-sounds", true), ("system-sounds", false)] {
            let Some(el) = document.get_element_by_id(id) else { continue };

            if let Ok(checkbox) = el.clone().dyn_into::<HtmlInputElement>() {
                let settings = game.borrow().settings;
                checkbox.set_checked(if animal {
                    settings.animal_sounds
                } else {
                    settings.system_sounds
                });

                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    let Some(target) = event.target() else { return };
                    let Ok(checkbox) = target.dyn_into::<HtmlInputElement>() else { return };
                    let mut g = game.borrow_mut();
                    if animal {
                        g.settings.animal_sounds = checkbox.checked();
                    } else {
                        g.settings.system_sounds = checkbox.checked();
                    }
                    g.settings.save();
                });
                let _ =
                    el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.resume_at = None;
                    if let Some(run) = g.run.as_mut() {
                        if run.phase == RunPhase::Active && !run.is_paused() {
                            run.set_paused(true);
                            log::info!("Auto-paused (tab hidden)");
                        }
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.resume_at = None;
                if let Some(run) = g.run.as_mut() {
                    if run.phase == RunPhase::Active && !run.is_paused() {
                        run.set_paused(true);
                        log::info!("Auto-paused (window blur)");
                    }
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pet Rescue (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: tick a run with a periodic jump and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use pet_rescue::sim::{
        Character, Difficulty, RunConfig, RunEvent, RunPhase, RunState, TickInput, tick,
    };

    let config = RunConfig {
        character: Character::Dog,
        difficulty: Difficulty::Normal,
        level: 1,
        nickname: "Rex".to_string(),
    };
    let mut state = match RunState::new(config, 0xDEC0DE) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Bad demo config: {}", err);
            return;
        }
    };

    let mut events = Vec::new();
    for frame in 0..10_000u64 {
        let jumping = frame % 90 < 12;
        let input = TickInput {
            jump_pressed: frame % 90 == 0,
            jump_held: jumping,
        };
        tick(&mut state, &input, &mut events);

        for event in events.drain(..) {
            match event {
                RunEvent::Victory { final_score } => {
                    println!("Made it home! Final score: {}", final_score);
                }
                RunEvent::Defeat { final_score } => {
                    println!("Caught out at score {}", final_score);
                }
                _ => {}
            }
        }

        if state.phase != RunPhase::Active {
            break;
        }
    }

    println!(
        "Run over after {} ticks: score {}, kibble {}, health {}",
        state.frame, state.score, state.kibble, state.health
    );
}
