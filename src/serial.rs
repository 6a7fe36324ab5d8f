//! Single-threaded baseline.
//!
//! The serial renderer runs the same kernel as the engine over the whole
//! image on the calling thread. Its output is the reference the parallel
//! output is verified against.
use crate::engine::{check_dimensions, EngineError};
use crate::fractal::buffer::IterationBuffer;
use crate::fractal::kernel::PixelKernel;
use crate::fractal::Scene;

/// Render `scene` on the calling thread into `buffer`.
pub fn compute_into<K>(
    kernel: &K,
    scene: &Scene,
    buffer: &mut IterationBuffer,
) -> Result<(), EngineError>
where
    K: PixelKernel,
{
    check_dimensions(scene, buffer)?;
    kernel.compute_rows(scene, 0, buffer.as_mut_slice());
    Ok(())
}

/// Render `scene` on the calling thread into a new buffer.
pub fn compute<K>(kernel: &K, scene: &Scene) -> IterationBuffer
where
    K: PixelKernel,
{
    let mut buffer = IterationBuffer::for_scene(scene);
    kernel.compute_rows(scene, 0, buffer.as_mut_slice());
    buffer
}
