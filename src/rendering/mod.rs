use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::GenerationBuffer;

/// Clear color behind the cells
pub const BACKGROUND: Color = Color::new(0.1, 0.1, 0.4, 1.0);
/// Fraction of a cell's width and height covered by its quad
pub const CELL_FILL: f32 = 0.8;

const HUD_COLOR: Color = Color::new(0.85, 0.85, 0.85, 1.0);
const ERROR_COLOR: Color = Color::new(1.0, 0.35, 0.35, 1.0);

/// Two-tone position shading: red follows x, green follows y, blue is the inverse of red
pub fn cell_color(x: usize, y: usize, grid_width: usize, grid_height: usize) -> Color {
    let r = x as f32 / grid_width as f32;
    let g = y as f32 / grid_height as f32;
    Color::new(r, g, 1.0 - r, 1.0)
}

/// Screen rectangle of the quad for cell (x, y).
/// Row 0 is drawn at the bottom of the area, like clip space.
pub fn cell_rect(
    x: usize,
    y: usize,
    grid_width: usize,
    grid_height: usize,
    area_width: f32,
    area_height: f32,
) -> Rect {
    let cell_w = area_width / grid_width as f32;
    let cell_h = area_height / grid_height as f32;
    let inset = (1.0 - CELL_FILL) / 2.0;

    Rect::new(
        (x as f32 + inset) * cell_w,
        area_height - (y as f32 + 1.0 - inset) * cell_h,
        cell_w * CELL_FILL,
        cell_h * CELL_FILL,
    )
}

/// Full-frame redraw of one generation over the whole window
pub fn draw_generation(grid: &GenerationBuffer) {
    let (grid_width, grid_height) = grid.dimensions();
    let (area_width, area_height) = (screen_width(), screen_height());

    clear_background(BACKGROUND);

    grid.iter_cells()
        .filter(|(_, _, cell)| cell.is_alive())
        .for_each(|(x, y, _)| {
            let rect = cell_rect(x, y, grid_width, grid_height, area_width, area_height);
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, cell_color(x, y, grid_width, grid_height));
        });
}

/// One-line status overlay in the top-left corner
pub fn draw_status(sim: &Simulation) {
    let (w, h) = sim.current().dimensions();
    let status = if sim.is_running { "Running" } else { "Paused" };
    let text = format!(
        "Gen {} | {}x{} | {} {:.2}ms | {}ms/tick | {}",
        sim.generation(),
        w,
        h,
        sim.stepper.kernel_name(),
        sim.last_step_time_ms,
        sim.tick_interval_ms,
        status
    );
    draw_text(&text, 10.0, 20.0, 18.0, HUD_COLOR);
    draw_text(
        "Space: play/pause  N: step  R: random  S: restart  G: pattern  P: parity  C: clear  Up/Down: speed",
        10.0,
        38.0,
        14.0,
        HUD_COLOR,
    );

    if let Some(error) = &sim.last_error {
        draw_text(error, 10.0, 56.0, 16.0, ERROR_COLOR);
    }
}

/// Shown instead of the simulation when the host cannot run the GPU pipeline
pub fn draw_unsupported(reason: &str) {
    clear_background(BLACK);
    let headline = "This demo only works on systems with GPU compute support";
    let size = measure_text(headline, None, 24, 1.0);
    let x = ((screen_width() - size.width) / 2.0).max(10.0);
    let y = screen_height() / 2.0;
    draw_text(headline, x, y, 24.0, WHITE);
    draw_text(reason, x, y + 28.0, 16.0, GRAY);
}
