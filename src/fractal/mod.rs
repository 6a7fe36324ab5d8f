//! The fractal being rendered.
//!
//! A [`Scene`] fixes everything a pixel kernel needs: the region of the
//! complex plane, the size of the pixel grid and the iteration cap.
pub mod buffer;
pub mod kernel;
pub mod viewport;

use crate::core::err::ConfigError;
use viewport::Viewport;

/// Image width used by the command line.
pub const FRACTAL_WIDTH: usize = 1600;
/// Image height used by the command line.
pub const FRACTAL_HEIGHT: usize = 1200;
/// Iteration cap used by the command line.
pub const MAX_ITERS: u32 = 256;

/// A viewport mapped onto a `width` x `height` pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    viewport: Viewport,
    width: usize,
    height: usize,
    max_iterations: u32,
}

impl Scene {
    /// Create a new scene.
    /// Returns an error if the grid has no rows or no columns.
    pub fn new(
        viewport: Viewport,
        width: usize,
        height: usize,
        max_iterations: u32,
    ) -> Result<Scene, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height });
        }
        Ok(Scene {
            viewport,
            width,
            height,
            max_iterations,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Scene {
    /// The 1600x1200 default view with 256 iterations.
    fn default() -> Self {
        Scene {
            viewport: Viewport::default(),
            width: FRACTAL_WIDTH,
            height: FRACTAL_HEIGHT,
            max_iterations: MAX_ITERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_rejects_empty_grid() {
        assert_eq!(
            Scene::new(Viewport::default(), 0, 10, 256),
            Err(ConfigError::EmptyImage {
                width: 0,
                height: 10
            })
        );
        assert!(Scene::new(Viewport::default(), 10, 0, 256).is_err());
    }

    #[test]
    fn test_default_scene() {
        let scene = Scene::default();
        assert_eq!(scene.len(), 1600 * 1200);
        assert_eq!(scene.max_iterations(), 256);
    }
}
