//! PPM output of a render.
use std::path::Path;

use image::{ImageFormat, ImageResult, Rgb, RgbImage};

use crate::fractal::buffer::IterationBuffer;

/// Grey level of a pixel.
/// The square root brightens the pixels that escape after few iterations.
fn shade(count: u32, max_iterations: u32) -> u8 {
    if max_iterations == 0 {
        return 0;
    }
    let mapped = (count as f32 / max_iterations as f32).min(1.0).sqrt();
    (255.0 * mapped) as u8
}

/// Convert `buffer` to a greyscale RGB image.
pub fn to_image(buffer: &IterationBuffer, max_iterations: u32) -> RgbImage {
    RgbImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        let count = buffer.get(y as usize, x as usize).unwrap_or(0);
        let level = shade(count, max_iterations);
        Rgb([level, level, level])
    })
}

/// Write `buffer` to `path` as a binary PPM image.
pub fn write_ppm<P: AsRef<Path>>(
    buffer: &IterationBuffer,
    path: P,
    max_iterations: u32,
) -> ImageResult<()> {
    to_image(buffer, max_iterations).save_with_format(path, ImageFormat::Pnm)
}
