use crate::host_api::Bitmap;
use log::warn;
use std::convert::TryInto;
use std::fs;
use std::path::Path;

/// Load a sprite image from the `assets/` directory. A missing or
/// undecodable file is a host-side fault: log it and let the sprite start
/// without a bitmap.
pub fn load_from_assets(name: &str) -> Option<Bitmap> {
    let path = Path::new("assets").join(name);
    match load_from_file(&path) {
        Ok(bitmap) => Some(bitmap),
        Err(e) => {
            warn!("sprite image {:?} not loaded: {}", name, e);
            None
        }
    }
}

pub fn load_from_file(path: &Path) -> Result<Bitmap, String> {
    let bytes = fs::read(path).map_err(|e| format!("while opening {}: {}", path.display(), e))?;
    decode(&bytes)
}

/// Decode a 32-bit BMP with channel masks into an RGBA bitmap.
fn decode(bytes: &[u8]) -> Result<Bitmap, String> {
    let header = header(bytes)?;
    if header.file_type != 0x4D42 {
        return Err("not a bmp file".into());
    }
    let depth = header.bits_per_pixel;
    if depth != 32 {
        return Err(format!("unsupported bit depth {}", depth));
    }
    if header.width <= 0 || header.height <= 0 {
        return Err("unsupported bmp orientation".into());
    }
    if header.red_mask == 0 || header.green_mask == 0 || header.blue_mask == 0 {
        return Err("missing channel masks".into());
    }

    let alpha_mask = !(header.red_mask | header.green_mask | header.blue_mask);
    let red_shift = header.red_mask.trailing_zeros();
    let green_shift = header.green_mask.trailing_zeros();
    let blue_shift = header.blue_mask.trailing_zeros();
    let alpha_shift = alpha_mask.trailing_zeros();

    let width = header.width as u32;
    let height = header.height as u32;
    let bytes_per_pixel = header.bits_per_pixel as usize / 8;
    let pitch = width as usize * bytes_per_pixel;

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    // R G B A
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = header.bitmap_offset as usize + y * pitch + x * bytes_per_pixel;
            let raw = bytes
                .get(offset..offset + 4)
                .ok_or("truncated pixel data")?;
            let color = u32::from_le_bytes(raw.try_into().unwrap());
            pixels.push(((color >> red_shift) & 0xFF) as u8);
            pixels.push(((color >> green_shift) & 0xFF) as u8);
            pixels.push(((color >> blue_shift) & 0xFF) as u8);
            pixels.push(if alpha_mask == 0 {
                0xFF
            } else {
                ((color >> alpha_shift) & 0xFF) as u8
            });
        }
    }

    Ok(Bitmap {
        width,
        height,
        pixels,
    })
}

fn header(buf: &[u8]) -> Result<BmpHeader, String> {
    if buf.len() < std::mem::size_of::<BmpHeader>() {
        return Err("truncated bmp header".into());
    }
    Ok(unsafe { std::ptr::read(buf.as_ptr() as *const _) })
}

#[derive(Copy, Clone, Debug)]
#[repr(C, packed)]
struct BmpHeader {
    file_type: u16,
    file_size: u32,
    reserved1: u16,
    reserved2: u16,
    bitmap_offset: u32,
    size: u32,
    width: i32,
    height: i32,
    planes: u16,
    bits_per_pixel: u16,
    compression: u32,
    size_of_bitmap: u32,
    horz_resolution: i32,
    vert_resolution: i32,
    colors_used: u32,
    colors_important: u32,
    red_mask: u32,
    green_mask: u32,
    blue_mask: u32,
}
