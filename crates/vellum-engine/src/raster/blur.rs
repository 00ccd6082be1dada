//! Gaussian blur approximated by three box-blur passes.
//!
//! Operates in place on premultiplied RGBA8, so averaged pixels stay valid
//! premultiplied colors. Pixels outside the buffer count as transparent.

/// Blurs `data` (`width × height` RGBA8, premultiplied) with standard
/// deviation `sigma`.
pub(super) fn gaussian_blur(data: &mut [u8], width: usize, height: usize, sigma: f32) {
    if !(sigma > 0.0) || width == 0 || height == 0 {
        return;
    }
    let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(data);
    if pixels.len() != width * height {
        return;
    }

    let mut scratch = vec![[0u8; 4]; pixels.len()];
    for size in box_sizes(sigma) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }
        // rows into scratch, then columns back
        box_pass(pixels, &mut scratch, height, width, width, 1, radius);
        box_pass(&scratch, pixels, width, height, 1, width, radius);
    }
}

/// Widths of three box filters whose convolution approximates a Gaussian.
fn box_sizes(sigma: f32) -> [usize; 3] {
    const PASSES: f32 = 3.0;
    let ideal = (12.0 * sigma * sigma / PASSES + 1.0).sqrt();
    let mut lower = ideal.floor() as usize;
    if lower % 2 == 0 {
        lower = lower.saturating_sub(1);
    }
    let lower = lower.max(1);
    let upper = lower + 2;

    let wl = lower as f32;
    let m = ((12.0 * sigma * sigma - PASSES * wl * wl - 4.0 * PASSES * wl - 3.0 * PASSES)
        / (-4.0 * wl - 4.0))
        .round()
        .max(0.0) as usize;

    let mut sizes = [upper; 3];
    for (i, size) in sizes.iter_mut().enumerate() {
        if i < m {
            *size = lower;
        }
    }
    sizes
}

/// One sliding-window pass along `lines` lines of `len` pixels each.
///
/// Pixel `i` of line `l` lives at `l * line_step + i * step`.
fn box_pass(
    src: &[[u8; 4]],
    dst: &mut [[u8; 4]],
    lines: usize,
    len: usize,
    line_step: usize,
    step: usize,
    radius: usize,
) {
    let window = (2 * radius + 1) as u32;
    let half = window / 2;

    for l in 0..lines {
        let base = l * line_step;
        let at = |i: usize| base + i * step;

        let mut acc = [0u32; 4];
        for i in 0..=radius.min(len - 1) {
            add(&mut acc, src[at(i)]);
        }

        for i in 0..len {
            let px = &mut dst[at(i)];
            for c in 0..4 {
                px[c] = ((acc[c] + half) / window) as u8;
            }
            if i + radius + 1 < len {
                add(&mut acc, src[at(i + radius + 1)]);
            }
            if i >= radius {
                sub(&mut acc, src[at(i - radius)]);
            }
        }
    }
}

#[inline]
fn add(acc: &mut [u32; 4], px: [u8; 4]) {
    for c in 0..4 {
        acc[c] += px[c] as u32;
    }
}

#[inline]
fn sub(acc: &mut [u32; 4], px: [u8; 4]) {
    for c in 0..4 {
        acc[c] -= px[c] as u32;
    }
}
