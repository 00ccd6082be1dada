//! PNG encoding of finished canvases.
//!
//! Output is straight-alpha RGBA8 with a fixed filter and no ancillary
//! chunks, so identical pixels always encode to identical bytes.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tiny_skia::Pixmap;

/// PNG compression effort. Affects size and speed, never pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Compression {
    Fast,
    #[default]
    Default,
    Best,
}

impl Compression {
    fn png(self) -> CompressionType {
        match self {
            Compression::Fast => CompressionType::Fast,
            Compression::Default => CompressionType::Default,
            Compression::Best => CompressionType::Best,
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encodes a premultiplied pixmap as PNG.
pub fn encode_png(pixmap: &Pixmap, compression: Compression) -> Result<Vec<u8>, EncodeError> {
    let rgba = straight_rgba8(pixmap);
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, compression.png(), FilterType::Adaptive);
    encoder.write_image(&rgba, pixmap.width(), pixmap.height(), ExtendedColorType::Rgba8)?;
    log::debug!(
        "encoded {}×{} canvas to {} png bytes ({compression:?})",
        pixmap.width(),
        pixmap.height(),
        out.len()
    );
    Ok(out)
}

/// Demultiplies every pixel into straight-alpha RGBA8.
pub fn straight_rgba8(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}
