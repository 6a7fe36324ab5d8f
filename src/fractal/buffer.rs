use crate::fractal::Scene;
use crate::partition::WorkAssignment;

/// Row-major grid of iteration counts, pixel `(row, col)` at `row * width + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationBuffer {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl IterationBuffer {
    /// Create a zeroed buffer of `width` x `height` pixels.
    pub fn new(width: usize, height: usize) -> Self {
        IterationBuffer {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Create a zeroed buffer sized for `scene`.
    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.width(), scene.height())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if the buffer has the size of `scene`.
    pub fn fits(&self, scene: &Scene) -> bool {
        self.width == scene.width() && self.height == scene.height()
    }

    /// Get the iteration count of a pixel, `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.height && col < self.width {
            Some(self.data[row * self.width + col])
        } else {
            None
        }
    }

    /// Set the iteration count of a pixel.
    ///
    /// # Panics
    /// Panics if the pixel is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        assert!(row < self.height && col < self.width, "pixel out of bounds");
        self.data[row * self.width + col] = value;
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Zero every pixel.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    pub fn fill(&mut self, value: u32) {
        self.data.fill(value);
    }

    /// Split the buffer into one mutable block per assignment.
    ///
    /// The assignments must be sorted by start row and cover the rows
    /// contiguously from row 0, as produced by [`crate::partition::partition`].
    pub(crate) fn split_rows_mut(&mut self, assignments: &[WorkAssignment]) -> Vec<&mut [u32]> {
        let width = self.width;
        let mut rest: &mut [u32] = &mut self.data;
        let mut blocks = Vec::with_capacity(assignments.len());
        let mut next_row = 0;
        for assignment in assignments {
            debug_assert_eq!(assignment.start_row, next_row);
            let (block, tail) =
                std::mem::take(&mut rest).split_at_mut(assignment.row_count * width);
            blocks.push(block);
            rest = tail;
            next_row += assignment.row_count;
        }
        debug_assert!(rest.is_empty());
        blocks
    }
}
