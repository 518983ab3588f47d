use super::scene_state::SceneState;
use crate::{camera::Movement, lantern_debug};

/// Touchpads scroll in pixels, this many make up one wheel line
const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

/// Keys the frame loop reacts to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    C,
    F,
    G,
    P,
    Q,
    Escape,
}

impl Key {
    fn movement(self) -> Option<Movement> {
        match self {
            Key::W => Some(Movement::Forward),
            Key::S => Some(Movement::Backward),
            Key::A => Some(Movement::Left),
            Key::D => Some(Movement::Right),
            Key::Space => Some(Movement::Up),
            Key::C => Some(Movement::Down),
            _ => None,
        }
    }
}

/// Tracks a key press or release. One-shot actions fire on press.
pub fn handle_key(state: &mut SceneState, key: Key, pressed: bool) {
    if !pressed {
        state.held_keys.remove(&key);
        return;
    }
    if !state.focused {
        return;
    }

    // Repeats arrive as presses too, only the first one toggles
    if !state.held_keys.insert(key) {
        return;
    }

    match key {
        Key::G => {
            state.toggles.global = !state.toggles.global;
            lantern_debug!("Global light: {}", state.toggles.global);
        }
        Key::P => {
            state.toggles.point = !state.toggles.point;
            lantern_debug!("Point lights: {}", state.toggles.point);
        }
        Key::Q => {
            state.toggles.spot = !state.toggles.spot;
            lantern_debug!("Spot light: {}", state.toggles.spot);
        }
        Key::F => state.camera.reset_view(),
        Key::Escape => state.exit_requested = true,
        _ => {}
    }
}

/// Moves the camera for every held movement key.
pub fn apply_held_keys(state: &mut SceneState, delta_time: f64) {
    if !state.focused {
        return;
    }
    let movements: Vec<Movement> = state
        .held_keys
        .iter()
        .filter_map(|key| key.movement())
        .collect();
    for movement in movements {
        state.camera.process_keyboard(movement, delta_time);
    }
}

/// Turns the camera by the cursor travel since the previous event.
pub fn handle_cursor(state: &mut SceneState, x: f64, y: f64) {
    if !state.focused {
        return;
    }
    if let Some((last_x, last_y)) = state.last_cursor {
        let x_offset = x - last_x;
        // Window y grows downwards
        let mut y_offset = last_y - y;
        if state.invert_mouse_y {
            y_offset = -y_offset;
        }
        state.camera.process_mouse(x_offset, y_offset);
    }
    state.last_cursor = Some((x, y));
}

pub fn handle_scroll(state: &mut SceneState, y_offset: f64) {
    if state.focused {
        state.camera.process_scroll(y_offset);
    }
}

/// Scroll reported in pixels, converted to wheel lines.
pub fn handle_pixel_scroll(state: &mut SceneState, y_pixels: f64) {
    handle_scroll(state, y_pixels / PIXELS_PER_SCROLL_LINE);
}

/// Losing focus drops held keys, regaining it re-primes the cursor.
pub fn handle_focus(state: &mut SceneState, focused: bool) {
    state.focused = focused;
    state.held_keys.clear();
    state.last_cursor = None;
}
