//! Pixel-by-pixel comparison of two renders.
use std::{error, fmt};

use log::error;

use crate::fractal::buffer::IterationBuffer;

/// The first pixel where two renders differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub expected: u32,
    pub actual: u32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatch : [{}][{}], Expected : {}, Actual : {}",
            self.row, self.col, self.expected, self.actual
        )
    }
}

/// An error returned by [`verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// The two buffers don't have the same size.
    Dimensions {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A pixel differs.
    Pixel(Mismatch),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Dimensions { expected, actual } => write!(
                f,
                "Size mismatch : Expected : {}x{}, Actual : {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            VerifyError::Pixel(mismatch) => fmt::Display::fmt(mismatch, f),
        }
    }
}

impl error::Error for VerifyError {}

/// Compare `candidate` against the reference `gold`, in row-major order.
/// Stops at the first pixel that differs.
pub fn verify(gold: &IterationBuffer, candidate: &IterationBuffer) -> Result<(), VerifyError> {
    if (gold.width(), gold.height()) != (candidate.width(), candidate.height()) {
        return Err(VerifyError::Dimensions {
            expected: (gold.width(), gold.height()),
            actual: (candidate.width(), candidate.height()),
        });
    }

    let width = gold.width();
    let pixels = gold.as_slice().iter().zip(candidate.as_slice());
    match pixels.enumerate().find(|(_, (g, c))| g != c) {
        Some((index, (&expected, &actual))) => {
            let mismatch = Mismatch {
                row: index / width,
                col: index % width,
                expected,
                actual,
            };
            error!("{}", mismatch);
            Err(VerifyError::Pixel(mismatch))
        }
        None => Ok(()),
    }
}
