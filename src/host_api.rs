//! Contract between the host runtime and the game library.
//!
//! This file is compiled into both the `engine` and `game` crates via
//! `#[path]` so the two sides of the dynamic-library boundary agree on every
//! type that crosses it.

/// An RGBA quadruple. Channels are 0-255, alpha 255 is opaque.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// A CPU-side pixel surface that can be filled and attached to a sprite.
///
/// Pixels are RGBA8, row-major. A new bitmap is zeroed, i.e. fully
/// transparent until written.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    // R G B A
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = self.offset(x, y);
        Color::rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.offset(x, y);
        self.pixels[i] = color.red;
        self.pixels[i + 1] = color.green;
        self.pixels[i + 2] = color.blue;
        self.pixels[i + 3] = color.alpha;
    }

    /// Fill a rectangle with `color`, clipped to the surface bounds.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let min_x = x.max(0) as u32;
        let min_y = y.max(0) as u32;
        let max_x = ((x + width as i32).max(0) as u32).min(self.width);
        let max_y = ((y + height as i32).max(0) as u32).min(self.height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                self.set_pixel(x, y, color);
            }
        }
    }
}

/// Handle into the host's sprite store.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set_held(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }
}

/// Input snapshot handed to the game every frame.
///
/// `new` is the state polled this frame, `old` the one from the previous
/// frame, which lets the game distinguish a held key from a fresh press.
#[derive(Clone, Default)]
pub struct Input {
    pub old: InputState,
    pub new: InputState,
    pub time_per_frame: f32,
}

impl Input {
    pub fn is_held(&self, direction: Direction) -> bool {
        self.new.is_held(direction)
    }

    pub fn just_pressed(&self, direction: Direction) -> bool {
        self.new.is_held(direction) && !self.old.is_held(direction)
    }

    /// Rotate the buffers at end of frame.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.old, &mut self.new);
        self.new = self.old.clone();
    }
}

/// Services the host runtime provides to the game.
///
/// Sprites live in the host's store; the game only keeps [`SpriteId`]
/// handles. A sprite created here exists until host teardown.
pub trait HostApi {
    /// Create a sprite at the origin. `image` names a file under `assets/`;
    /// a path that does not resolve leaves the sprite without a bitmap.
    fn create_sprite(&mut self, image: Option<&str>) -> SpriteId;

    /// Assign the sprite's displayable surface, replacing any image it was
    /// created with. The host owns the bitmap from here on.
    fn set_bitmap(&mut self, sprite: SpriteId, bitmap: Bitmap);

    fn sprite_x(&self, sprite: SpriteId) -> f32;

    fn set_sprite_x(&mut self, sprite: SpriteId, x: f32);

    fn set_sprite_y(&mut self, sprite: SpriteId, y: f32);

    /// Draw order. Sprites render in ascending z.
    fn set_sprite_z(&mut self, sprite: SpriteId, z: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color {
        red: 255,
        green: 0,
        blue: 0,
        alpha: 255,
    };

    #[test]
    fn new_bitmap_is_transparent() {
        let bitmap = Bitmap::new(4, 3);
        assert_eq!(bitmap.pixels.len(), 4 * 3 * 4);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(bitmap.pixel(x, y), Color::rgba(0, 0, 0, 0));
            }
        }
    }

    #[test]
    fn fill_rect_writes_only_the_rectangle() {
        let mut bitmap = Bitmap::new(8, 8);
        bitmap.fill_rect(2, 3, 3, 2, RED);
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..5).contains(&x) && (3..5).contains(&y);
                let expected = if inside { RED } else { Color::rgba(0, 0, 0, 0) };
                assert_eq!(bitmap.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.fill_rect(-2, -2, 8, 8, RED);
        assert_eq!(bitmap.pixel(0, 0), RED);
        assert_eq!(bitmap.pixel(3, 3), RED);

        // entirely outside, nothing to do
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.fill_rect(10, 10, 2, 2, RED);
        assert_eq!(bitmap.pixel(3, 3), Color::rgba(0, 0, 0, 0));
    }

    #[test]
    fn input_distinguishes_held_from_pressed() {
        let mut input = Input::default();
        input.new.set_held(Direction::Right, true);
        assert!(input.is_held(Direction::Right));
        assert!(input.just_pressed(Direction::Right));

        input.swap();
        input.new.set_held(Direction::Right, true);
        assert!(input.is_held(Direction::Right));
        assert!(!input.just_pressed(Direction::Right));
        assert!(!input.is_held(Direction::Left));
    }
}
