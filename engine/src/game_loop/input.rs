use crate::host_api::{Direction, Input};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

fn direction(keycode: Keycode) -> Option<Direction> {
    match keycode {
        Keycode::Up => Some(Direction::Up),
        Keycode::Down => Some(Direction::Down),
        Keycode::Left => Some(Direction::Left),
        Keycode::Right => Some(Direction::Right),
        _ => None,
    }
}

pub fn update(input: &mut Input, event: &Event) {
    match event {
        Event::KeyUp {
            keycode: Some(keycode),
            ..
        } => {
            if let Some(direction) = direction(*keycode) {
                input.new.set_held(direction, false);
            }
        }
        Event::KeyDown {
            keycode: Some(keycode),
            ..
        } => {
            if let Some(direction) = direction(*keycode) {
                input.new.set_held(direction, true);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(direction(Keycode::Up), Some(Direction::Up));
        assert_eq!(direction(Keycode::Down), Some(Direction::Down));
        assert_eq!(direction(Keycode::Left), Some(Direction::Left));
        assert_eq!(direction(Keycode::Right), Some(Direction::Right));
        assert_eq!(direction(Keycode::Space), None);
    }
}
