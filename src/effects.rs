//! Per-pixel post effects over an RGBA8 buffer (`ImageData` layout).
//!
//! Every function takes the buffer row-major, four bytes per pixel, and
//! leaves alpha untouched.

use crate::params::DrawParams;

/// Fraction of pixels turned red by the noise effect.
pub const NOISE_RATE: f64 = 0.05;

/// Run every enabled post effect in drawing order.
///
/// `random` yields uniform values in `0.0..1.0`.
pub fn apply(params: &DrawParams, data: &mut [u8], width: usize, random: &mut dyn FnMut() -> f64) {
    if params.show_pixels {
        noise(data, NOISE_RATE, random);
    }
    if params.show_invert {
        invert(data);
    }
    if params.show_grayscale {
        grayscale(data);
    }
    if params.show_sepia {
        sepia(data);
    }
    if params.show_emboss {
        emboss(data, width);
    }
}

pub fn noise(data: &mut [u8], rate: f64, random: &mut dyn FnMut() -> f64) {
    for px in data.chunks_exact_mut(4) {
        if random() < rate {
            px[0] = 255;
            px[1] = 0;
            px[2] = 0;
        }
    }
}

pub fn invert(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
}

pub fn grayscale(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let l = 0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]);
        let l = clamp_u8(l);
        px[0] = l;
        px[1] = l;
        px[2] = l;
    }
}

pub fn sepia(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let (r, g, b) = (f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
        px[0] = clamp_u8(0.393 * r + 0.769 * g + 0.189 * b);
        px[1] = clamp_u8(0.349 * r + 0.686 * g + 0.168 * b);
        px[2] = clamp_u8(0.272 * r + 0.534 * g + 0.131 * b);
    }
}

/// Emboss against the right and lower neighbours.
///
/// Runs in place front to back, so each channel only reads neighbours that
/// have not been rewritten yet. Neighbours past the buffer end read as zero.
pub fn emboss(data: &mut [u8], width: usize) {
    let stride = width * 4;
    for i in 0..data.len() {
        if i % 4 == 3 {
            continue;
        }
        let right = data.get(i + 4).copied().map_or(0, i32::from);
        let below = data.get(i + stride).copied().map_or(0, i32::from);
        let v = 127 + 2 * i32::from(data[i]) - right - below;
        data[i] = v.clamp(0, 255) as u8;
    }
}

fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
