use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::BlendMode;
use sdl2::render::Texture;
use sdl2::render::TextureCreator;
use sdl2::video::WindowContext;
use std::sync::mpsc::Receiver;
use std::time::Instant;

mod bmp;
mod input;

use crate::host_api::{Bitmap, HostApi, Input, SpriteId};
use crate::reloader::*;

fn new_texture(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'_>, String> {
    creator
        .create_texture_streaming(PixelFormatEnum::RGBA32, width, height)
        .map_err(|e| e.to_string())
}

/// One slot in the host's sprite store.
struct Sprite {
    x: f32,
    y: f32,
    z: i32,
    bitmap: Option<Bitmap>,
    dirty: bool,
}

struct SdlHostApi {
    sprites: Vec<Sprite>,
}

impl SdlHostApi {
    fn new() -> Self {
        Self {
            sprites: Vec::new(),
        }
    }

    fn sprite(&self, id: SpriteId) -> &Sprite {
        &self.sprites[id.0]
    }

    fn sprite_mut(&mut self, id: SpriteId) -> &mut Sprite {
        &mut self.sprites[id.0]
    }
}

impl HostApi for SdlHostApi {
    fn create_sprite(&mut self, image: Option<&str>) -> SpriteId {
        let bitmap = image.and_then(|name| bmp::load_from_assets(name));
        let dirty = bitmap.is_some();
        self.sprites.push(Sprite {
            x: 0.0,
            y: 0.0,
            z: 0,
            bitmap,
            dirty,
        });
        SpriteId(self.sprites.len() - 1)
    }

    fn set_bitmap(&mut self, sprite: SpriteId, bitmap: Bitmap) {
        let sprite = self.sprite_mut(sprite);
        sprite.bitmap = Some(bitmap);
        sprite.dirty = true;
    }

    fn sprite_x(&self, sprite: SpriteId) -> f32 {
        self.sprite(sprite).x
    }

    fn set_sprite_x(&mut self, sprite: SpriteId, x: f32) {
        self.sprite_mut(sprite).x = x;
    }

    fn set_sprite_y(&mut self, sprite: SpriteId, y: f32) {
        self.sprite_mut(sprite).y = y;
    }

    fn set_sprite_z(&mut self, sprite: SpriteId, z: i32) {
        self.sprite_mut(sprite).z = z;
    }
}

/// Re-upload bitmaps that changed since the last frame into streaming
/// textures. `textures` is kept index-parallel with the sprite store.
fn upload_dirty<'a>(
    host_api: &mut SdlHostApi,
    creator: &'a TextureCreator<WindowContext>,
    textures: &mut Vec<Option<Texture<'a>>>,
) -> Result<(), String> {
    while textures.len() < host_api.sprites.len() {
        textures.push(None);
    }
    for (sprite, slot) in host_api.sprites.iter_mut().zip(textures.iter_mut()) {
        if !sprite.dirty {
            continue;
        }
        if let Some(bitmap) = &sprite.bitmap {
            let mut texture = new_texture(creator, bitmap.width, bitmap.height)?;
            texture.set_blend_mode(BlendMode::Blend);
            texture
                .update(None, &bitmap.pixels, bitmap.pitch())
                .map_err(|e| e.to_string())?;
            *slot = Some(texture);
        }
        sprite.dirty = false;
    }
    Ok(())
}

pub fn main(reloader: Receiver<()>) -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window("rgss-rs", 800, 600)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .build()
        .map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();

    let mut host_api = SdlHostApi::new();
    let mut textures: Vec<Option<Texture<'_>>> = Vec::new();

    let mut game = GameLib::new().map_err(|e| e.to_string())?;
    let mut api = game.api().map_err(|e| e.to_string())?;

    // the load hook runs before the first frame, so every update sees an
    // initialized game
    let state = (api.load)(&mut host_api);

    let mut input = Input::default();
    let mut event_pump = sdl_context.event_pump()?;
    let mut start_frame = Instant::now();
    'running: loop {
        if reloader.try_recv().is_ok() {
            debug!("reloading libgame");
            std::mem::drop(api);
            game = game.reload().map_err(|e| e.to_string())?;
            api = game.api().map_err(|e| e.to_string())?;
        }
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
            input::update(&mut input, &event);
        }

        input.time_per_frame = start_frame.elapsed().as_secs_f32();
        start_frame = Instant::now();

        if !(api.update)(state, &input, &mut host_api) {
            break 'running;
        }

        upload_dirty(&mut host_api, &texture_creator, &mut textures)?;

        canvas.clear();
        // painter's order: lowest z first
        let mut order: Vec<usize> = (0..host_api.sprites.len()).collect();
        order.sort_by_key(|&i| host_api.sprites[i].z);
        for i in order {
            let sprite = &host_api.sprites[i];
            if let (Some(bitmap), Some(texture)) = (&sprite.bitmap, &textures[i]) {
                let dst = Rect::new(
                    sprite.x.round() as i32,
                    sprite.y.round() as i32,
                    bitmap.width,
                    bitmap.height,
                );
                canvas.copy(texture, None, dst)?;
            }
        }
        canvas.present();
        input.swap();
    }
    Ok(())
}
