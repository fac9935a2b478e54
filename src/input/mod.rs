use macroquad::prelude::*;
use crate::application::{Command, Session};
use crate::domain::{CellState, Coord};
use crate::rendering::{cell_size, panel_x};

/// Keyboard bindings, checked in order every frame
const KEY_BINDINGS: [(KeyCode, Command); 13] = [
    (KeyCode::Space, Command::TogglePause),
    (KeyCode::N, Command::StepOnce),
    (KeyCode::C, Command::Clear),
    (KeyCode::R, Command::Randomize),
    (KeyCode::S, Command::Seed),
    (KeyCode::Up, Command::SpeedUp),
    (KeyCode::Down, Command::SpeedDown),
    (KeyCode::PageUp, Command::LayerUp),
    (KeyCode::PageDown, Command::LayerDown),
    (KeyCode::Right, Command::LayerUp),
    (KeyCode::Left, Command::LayerDown),
    (KeyCode::I, Command::ToggleInteraction),
    (KeyCode::P, Command::CycleStrategy),
];

/// Command bound to a key, if any
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, command)| command)
}

/// Decode this frame's key presses into commands
pub fn pressed_commands() -> Vec<Command> {
    KEY_BINDINGS
        .iter()
        .filter(|&&(key, _)| is_key_pressed(key))
        .map(|&(_, command)| command)
        .collect()
}

/// Process keyboard input functionally
pub fn process_keyboard_input(session: Session) -> Session {
    pressed_commands().into_iter().fold(session, Session::apply)
}

/// Paint (left button) or erase (right button) on the viewed layer while paused
pub fn handle_mouse_paint(session: &mut Session) {
    let (mx, my) = mouse_position();
    if session.is_running() || mx >= panel_x() {
        return;
    }

    let state = if is_mouse_button_down(MouseButton::Left) {
        CellState::ALIVE
    } else if is_mouse_button_down(MouseButton::Right) {
        CellState::DEAD
    } else {
        return;
    };

    let cell = cell_size(&session.world);
    let coord = Coord::new_3d((mx / cell) as i32, (my / cell) as i32, session.view_layer as i32);
    // Out-of-range positions are ignored by the universe
    session.world.universe_mut().set(coord, state);
    session.population = session.world.universe().count_living();
}
