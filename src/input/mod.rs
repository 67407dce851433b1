use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::SeedPolicy;

/// Process keyboard input functionally
pub fn process_keyboard_input(sim: Simulation) -> Simulation {
    type KeyAction = (KeyCode, fn(Simulation) -> Simulation);

    let actions: [KeyAction; 9] = [
        (KeyCode::Space, Simulation::toggle_running),
        (KeyCode::N, Simulation::step_once),
        (KeyCode::R, Simulation::reseed_random),
        (KeyCode::S, Simulation::reseed),
        (KeyCode::G, Simulation::next_pattern),
        (KeyCode::P, |s| s.reseed_with(&SeedPolicy::Parity)),
        (KeyCode::C, Simulation::clear),
        (KeyCode::Up, |s| s.adjust_speed(true)),
        (KeyCode::Down, |s| s.adjust_speed(false)),
    ];

    actions.iter().fold(sim, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    })
}
