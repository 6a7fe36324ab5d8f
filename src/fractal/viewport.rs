use crate::core::err::ConfigError;

/// Scale of the zoomed preset.
const ZOOM_SCALE: f32 = 0.015;
/// Real shift of the zoomed preset.
const ZOOM_SHIFT_X: f32 = -0.986;
/// Imaginary shift of the zoomed preset.
const ZOOM_SHIFT_Y: f32 = 0.30;

/// A rectangle of the complex plane, from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Viewport {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Viewport { x0, y0, x1, y1 }
    }

    /// Scale every bound by `scale`, then translate by `(shift_x, shift_y)`.
    pub fn scale_and_shift(self, scale: f32, shift_x: f32, shift_y: f32) -> Self {
        Viewport {
            x0: self.x0 * scale + shift_x,
            y0: self.y0 * scale + shift_y,
            x1: self.x1 * scale + shift_x,
            y1: self.y1 * scale + shift_y,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(-2.0, -1.0, 1.0, 1.0)
    }
}

/// The view presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The whole set.
    Default,
    /// A detail of the boundary near `-0.986 + 0.30i`.
    Zoomed,
}

impl View {
    /// Resolve a command line view index.
    /// Indices up to 1 select the default view, 2 the zoomed one.
    pub fn from_index(index: i64) -> Result<View, ConfigError> {
        match index {
            2 => Ok(View::Zoomed),
            i if i > 1 => Err(ConfigError::InvalidView(i)),
            _ => Ok(View::Default),
        }
    }

    pub fn viewport(self) -> Viewport {
        match self {
            View::Default => Viewport::default(),
            View::Zoomed => {
                Viewport::default().scale_and_shift(ZOOM_SCALE, ZOOM_SHIFT_X, ZOOM_SHIFT_Y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_index() {
        assert_eq!(View::from_index(1), Ok(View::Default));
        assert_eq!(View::from_index(0), Ok(View::Default));
        assert_eq!(View::from_index(2), Ok(View::Zoomed));
        assert_eq!(View::from_index(3), Err(ConfigError::InvalidView(3)));
    }

    #[test]
    fn test_zoomed_viewport() {
        let v = View::Zoomed.viewport();
        let close = |a: f32, b: f32| (a - b).abs() < 1e-6;
        assert!(close(v.x0, -2.0 * 0.015 - 0.986));
        assert!(close(v.x1, 0.015 - 0.986));
        assert!(close(v.y0, -0.015 + 0.30));
        assert!(close(v.y1, 0.015 + 0.30));
    }
}
