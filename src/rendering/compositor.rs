/// Pixel-level compositing onto the tile canvas.
///
/// Pastes go through the sprite mask: mask 0 leaves the canvas pixel alone,
/// 255 replaces it, anything between mixes linearly (and pulls the
/// destination alpha toward opaque by the same factor). Writes that land
/// outside the canvas are clipped; the lowest sprites of a chunk hang past
/// the bottom edge.
use glam::IVec2;
use image::{Rgba, RgbaImage};

use super::sprites::Sprite;

/// Fraction of the tint color mixed into sprite colors in cave mode.
pub const DEPTH_TINT_RATIO: f32 = 0.3;

/// Paste a sprite with its top-left corner at `pos`.
pub fn paste_sprite(canvas: &mut RgbaImage, sprite: &Sprite, pos: IVec2) {
    paste_impl(canvas, sprite, pos, None);
}

/// Paste a sprite tinted toward `tint` by `DEPTH_TINT_RATIO`.
pub fn paste_sprite_tinted(canvas: &mut RgbaImage, sprite: &Sprite, tint: [u8; 3], pos: IVec2) {
    paste_impl(canvas, sprite, pos, Some(tint));
}

fn paste_impl(canvas: &mut RgbaImage, sprite: &Sprite, pos: IVec2, tint: Option<[u8; 3]>) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    let (sprite_w, sprite_h) = sprite.color.dimensions();

    for sy in 0..sprite_h {
        let ty = pos.y + sy as i32;
        if ty < 0 || ty >= canvas_h as i32 {
            continue;
        }
        for sx in 0..sprite_w {
            let tx = pos.x + sx as i32;
            if tx < 0 || tx >= canvas_w as i32 {
                continue;
            }

            let mask = sprite.mask.get_pixel(sx, sy).0[0];
            if mask == 0 {
                continue;
            }

            let mut src = sprite.color.get_pixel(sx, sy).0;
            if let Some(tint) = tint {
                src = blend_rgb(src, tint, DEPTH_TINT_RATIO);
            }

            let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
            if mask == 0xFF {
                dst.0 = [src[0], src[1], src[2], 0xFF];
            } else {
                let d = dst.0;
                dst.0 = [
                    mix(d[0], src[0], mask),
                    mix(d[1], src[1], mask),
                    mix(d[2], src[2], mask),
                    mix(d[3], 0xFF, mask),
                ];
            }
        }
    }
}

/// 1-px line from `from` to `to`, endpoints inclusive, clipped to the
/// canvas. Used for the black rims where terrain meets open air.
pub fn draw_edge_line(canvas: &mut RgbaImage, from: IVec2, to: IVec2) {
    const EDGE_COLOR: [u8; 4] = [0, 0, 0, 0xFF];

    let mut x = from.x;
    let mut y = from.y;
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel_clipped(canvas, x, y, EDGE_COLOR);
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

/// Fixed-ratio blend of two colors: base + (tint - base) * ratio, truncated
/// per channel.
#[inline]
pub fn blend_rgb(base: [u8; 3], tint: [u8; 3], ratio: f32) -> [u8; 3] {
    [
        blend_channel(base[0], tint[0], ratio),
        blend_channel(base[1], tint[1], ratio),
        blend_channel(base[2], tint[2], ratio),
    ]
}

#[inline]
fn blend_channel(base: u8, tint: u8, ratio: f32) -> u8 {
    (base as f32 + (tint as f32 - base as f32) * ratio) as u8
}

/// dst*(255-m)/255 + src*m/255 with round-to-nearest division.
#[inline]
fn mix(dst: u8, src: u8, mask: u8) -> u8 {
    let blended = mul_div_255(dst as u32, 255 - mask as u32) + mul_div_255(src as u32, mask as u32);
    blended.min(255) as u8
}

#[inline]
fn mul_div_255(a: u32, b: u32) -> u32 {
    let t = a * b + 128;
    (t + (t >> 8)) >> 8
}

#[inline]
fn put_pixel_clipped(canvas: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, Rgba(color));
    }
}
