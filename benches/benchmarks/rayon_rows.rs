use mandelsweep::fractal::buffer::IterationBuffer;
use mandelsweep::fractal::kernel::PixelKernel;
use mandelsweep::fractal::Scene;
use rayon::prelude::*;

/// Row-parallel reference renderer, one rayon task per row.
pub fn rayon_rows<K: PixelKernel>(
    pool: &rayon::ThreadPool,
    kernel: &K,
    scene: &Scene,
    buffer: &mut IterationBuffer,
) {
    let width = scene.width();
    pool.install(|| {
        buffer
            .as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, pixels)| kernel.compute_rows(scene, row, pixels));
    });
}
