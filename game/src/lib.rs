#[path = "../../src/host_api.rs"]
pub mod host_api;

use host_api::{Bitmap, Color, Direction, HostApi, Input, SpriteId};

/// Game state, owned by the host loop and threaded back into every update.
#[repr(C)]
pub struct GameState {
    pub sprite: SpriteId,
}

/// Startup hook. Creates the one sprite this demo owns and hands it a
/// 200x100 surface with a 30x30 red square at (10, 10).
#[no_mangle]
pub extern "C" fn game_load(host_api: &mut dyn HostApi) -> *mut GameState {
    let sprite = host_api.create_sprite(Some("lbq_sound.png"));

    let mut bitmap = Bitmap::new(200, 100);
    bitmap.fill_rect(10, 10, 30, 30, Color::rgba(255, 0, 0, 255));
    host_api.set_bitmap(sprite, bitmap);

    Box::into_raw(Box::new(GameState { sprite }))
}

/// Per-frame hook. `state` must come from [`game_load`]; the host calls the
/// hooks in that order, so an uninitialized state never reaches us.
#[no_mangle]
pub extern "C" fn game_update(
    state: *mut GameState,
    input: &Input,
    host_api: &mut dyn HostApi,
) -> bool {
    let state = unsafe { &mut *state };

    let step = horizontal_step(input);
    if step != 0.0 {
        let x = host_api.sprite_x(state.sprite);
        host_api.set_sprite_x(state.sprite, x + step);
    }

    true
}

/// Horizontal movement for one frame: at most one unit, unclamped.
///
/// Right is checked first, so it wins when both directions are held.
pub fn horizontal_step(input: &Input) -> f32 {
    if input.is_held(Direction::Right) {
        1.0
    } else if input.is_held(Direction::Left) {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(right: bool, left: bool) -> Input {
        let mut input = Input::default();
        input.new.right = right;
        input.new.left = left;
        input
    }

    #[test]
    fn right_alone_steps_right() {
        assert_eq!(horizontal_step(&held(true, false)), 1.0);
    }

    #[test]
    fn left_alone_steps_left() {
        assert_eq!(horizontal_step(&held(false, true)), -1.0);
    }

    #[test]
    fn neither_held_stands_still() {
        assert_eq!(horizontal_step(&held(false, false)), 0.0);
    }

    #[test]
    fn right_wins_when_both_held() {
        assert_eq!(horizontal_step(&held(true, true)), 1.0);
    }
}
