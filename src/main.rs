use macroquad::prelude::*;
use gpu_life::{LifeError, Simulation, SimulationConfig, input, rendering};

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life - GPU Compute Demo".to_owned(),
        window_width: 640,
        window_height: 640,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = SimulationConfig::default();
    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(LifeError::Unsupported(reason)) => {
            // The tick loop never starts without GPU compute
            log::error!("GPU compute unavailable: {}", reason);
            loop {
                rendering::draw_unsupported(&reason);
                next_frame().await;
            }
        }
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return;
        }
    };

    loop {
        sim = input::process_keyboard_input(sim);
        sim = sim.tick(get_frame_time());

        rendering::draw_generation(sim.current());
        rendering::draw_status(&sim);

        next_frame().await;
    }
}
