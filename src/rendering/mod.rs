use macroquad::prelude::*;
use crate::application::{Session, World};
use crate::domain::CellState;

/// Width of the info panel on the right
pub const PANEL_WIDTH: f32 = 200.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Side length of one cell so the whole layer fits the grid area
pub fn cell_size(world: &World) -> f32 {
    let size = world.universe().size();
    let (w, h) = (size.x.max(1) as f32, size.y.max(1) as f32);
    (panel_x() / w).min(screen_height() / h).max(1.0)
}

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Brighter for more energy; canonical alive cells are full green
fn cell_color(state: CellState) -> Color {
    let level = state.energy() as f32 / 255.0;
    Color::new(0.0, 0.25 + 0.75 * level, 0.6 * level, 1.0)
}

/// Draw the viewed layer (the grid itself, a 2.5D layer or a 3D slice)
pub fn draw_world(session: &Session) {
    let world = &session.world;
    let size = world.universe().size();
    let cell = cell_size(world);
    let background = Color::from_rgba(15, 15, 15, 255);

    draw_rectangle(0.0, 0.0, size.x as f32 * cell, size.y as f32 * cell, background);

    for y in 0..size.y {
        for x in 0..size.x {
            let state = world.view_cell(x, y, session.view_layer);
            if state.is_alive() {
                draw_rectangle(x as f32 * cell, y as f32 * cell, cell, cell, cell_color(state));
            }
        }
    }

    if cell >= 6.0 {
        let line = Color::from_rgba(40, 40, 40, 255);
        for x in 0..=size.x {
            let sx = x as f32 * cell;
            draw_line(sx, 0.0, sx, size.y as f32 * cell, 1.0, line);
        }
        for y in 0..=size.y {
            let sy = y as f32 * cell;
            draw_line(0.0, sy, size.x as f32 * cell, sy, 1.0, line);
        }
    }
}

/// Draw the info panel
pub fn draw_hud(session: &Session, render_ms: f32) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    let world = &session.world;
    let universe = world.universe();
    let size = universe.size();

    let mut lines = vec![
        (format!("{} universe", universe.dimension()), WHITE),
        (format!("Size: {}x{}x{}", size.x, size.y, size.z.max(1)), GRAY),
        (format!("Layer: {}/{}", session.view_layer, world.layer_count().saturating_sub(1)), GRAY),
        (format!("Generation: {}", session.generation), Color::from_rgba(0, 255, 150, 255)),
        (format!("Living: {}", format_number(session.population)), GRAY),
        (format!("Speed: {:.0} gen/s", session.updates_per_second), GRAY),
        (
            if session.is_running() { "Running".to_string() } else { "Paused".to_string() },
            if session.is_running() { GREEN } else { ORANGE },
        ),
        (format!("Step: {:.1}ms", session.last_step_time_ms), GRAY),
        (format!("Render: {:.1}ms | FPS {}", render_ms, get_fps()), GRAY),
    ];

    match world {
        World::Volume(_) => lines.push((format!("Strategy: {}", session.strategy.name()), GRAY)),
        World::Layered(u) => {
            let state = if u.layer_interaction() { "on" } else { "off" };
            lines.push((format!("Interaction: {} ({})", state, u.interaction_rule().kind()), GRAY));
        }
        World::Flat(_) => {}
    }

    let controls = [
        "Space: Play/Pause",
        "N: Step  C: Clear",
        "R: Random  S: Seed",
        "Up/Down: Speed",
        "PgUp/PgDn: Layer",
        "I: Interaction",
        "P: Strategy",
    ];

    let mut y = 24.0;
    for (text, color) in &lines {
        draw_text(text, px + 10.0, y, 18.0, *color);
        y += 20.0;
    }
    y += 10.0;
    for text in controls {
        draw_text(text, px + 10.0, y, 15.0, LIGHTGRAY);
        y += 16.0;
    }
}
