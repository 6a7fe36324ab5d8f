//! Per-pixel escape-time kernels.
use num_complex::Complex;

use super::Scene;

/// A kernel computing the iteration count of a block of rows.
///
/// Implementations must be pure: a call only writes `rows` and its result
/// depends only on its arguments. This is what allows the engine to call the
/// kernel concurrently on disjoint blocks of the same image.
pub trait PixelKernel: Sync {
    /// Compute the rows starting at `start_row` into `rows`.
    /// `rows.len()` is a multiple of `scene.width()`.
    fn compute_rows(&self, scene: &Scene, start_row: usize, rows: &mut [u32]);
}

/// The Mandelbrot set, `z = z^2 + c` starting from `z = c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandelbrot;

impl Mandelbrot {
    /// Number of iterations before `c` escapes the radius-2 disc, capped at `count`.
    #[inline]
    pub fn escape_time(c: Complex<f32>, count: u32) -> u32 {
        let mut z = c;
        let mut i = 0;
        while i < count {
            if z.norm_sqr() > 4.0 {
                break;
            }
            z = z * z + c;
            i += 1;
        }
        i
    }
}

impl PixelKernel for Mandelbrot {
    fn compute_rows(&self, scene: &Scene, start_row: usize, rows: &mut [u32]) {
        let view = scene.viewport();
        let width = scene.width();
        let dx = (view.x1 - view.x0) / width as f32;
        let dy = (view.y1 - view.y0) / scene.height() as f32;

        for (j, row) in rows.chunks_exact_mut(width).enumerate() {
            let y = view.y0 + (start_row + j) as f32 * dy;
            for (i, pixel) in row.iter_mut().enumerate() {
                let x = view.x0 + i as f32 * dx;
                *pixel = Self::escape_time(Complex::new(x, y), scene.max_iterations());
            }
        }
    }
}
