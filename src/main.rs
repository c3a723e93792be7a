//! Critter Catch entry point
//!
//! On the web this installs logging and hands off to the browser host shell.
//! Natively there is no window or audio output, so it runs a short headless
//! session instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Critter Catch starting...");
    if let Err(e) = critter_catch::platform::web::run() {
        // No surface, no game loop
        log::error!("Cannot start: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use critter_catch::audio::{AudioEngine, NoOutput};
    use critter_catch::game::{Game, InputEvent};
    use critter_catch::sim::{GameState, Outcome};

    env_logger::init();
    log::info!("Critter Catch (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let audio: AudioEngine<NoOutput> = AudioEngine::new(seed, NoOutput::open);
    let mut game = Game::new(GameState::new(seed, 1280.0, 720.0), audio);

    // Ten simulated seconds at 60 Hz, poking at the prey every half second
    let (mut caught, mut alarmed, mut missed) = (0, 0, 0);
    for frame in 0..600u32 {
        if frame % 30 == 29 {
            let prey = game.state.prey.pos;
            let event = match frame / 30 % 3 {
                0 => InputEvent::PrimaryAction,
                1 => InputEvent::Tap(prey + glam::Vec2::new(90.0, 0.0)),
                _ => InputEvent::Tap(glam::Vec2::new(5.0, 5.0)),
            };
            match game.handle(event) {
                Some(Outcome::Caught) => caught += 1,
                Some(Outcome::Alarmed) => alarmed += 1,
                Some(Outcome::Missed) => missed += 1,
                None => {}
            }
        }
        game.frame();
    }

    let snap = game.snapshot();
    println!(
        "Seed {seed}: score {}, {caught} caught / {alarmed} alarmed / {missed} missed, \
         prey {:?} {:?} at ({:.0}, {:.0}), {} hiding spots, audio {}",
        snap.score,
        snap.prey.species,
        snap.prey.state,
        snap.prey.pos.x,
        snap.prey.pos.y,
        snap.spots.len(),
        if snap.audio_started { "on" } else { "unavailable" },
    );
}
