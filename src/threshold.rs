//! Threshold - branch-free polynomial status function
//!
//! Maps a raw neighbor score to a binary cell status without a lookup table.
//! For center weight C, the alive scores are exactly the two open intervals
//! (1.5, 6.5) and (C + 1.5, C + 4.5). A quartic with roots at the four
//! interval endpoints, oriented to be positive strictly between paired
//! roots, gives the indicator once clamped to [0, 1]:
//!
//! ```text
//! g(x) = -(x - 1.5)(x - 6.5)(x - (C + 1.5))(x - (C + 4.5))
//! status(x) = clamp(g(x), 0, 1)
//! ```
//!
//! The clamp saturates rather than steps: for the reference kernels and
//! binary cell values every reachable score is an integer, the nearest
//! integer to any root is 0.5 away, and |g| at those points is well above 1,
//! so the output is exactly 0.0 or 1.0. Roots and coefficients are sums of
//! powers of two, so the evaluation is exact in binary floating point.

use crate::error::AutomataError;
use crate::grid::Grid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quartic threshold mapping scores to binary cell status.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Threshold {
    /// Roots in ascending order for the reference center weights:
    /// 1.5, 6.5, C + 1.5, C + 4.5.
    roots: [f64; 4],
}

impl Threshold {
    /// Build the threshold paired with center weight `center`.
    pub fn for_center(center: i32) -> Self {
        let c = f64::from(center);
        Self {
            roots: [1.5, 6.5, c + 1.5, c + 4.5],
        }
    }

    /// The four polynomial roots in ascending order.
    #[inline]
    pub fn roots(&self) -> &[f64; 4] {
        &self.roots
    }

    /// Raw polynomial value g(x). Positive inside the alive intervals,
    /// non-positive elsewhere.
    #[inline]
    pub fn gain(&self, score: f64) -> f64 {
        let [a, b, c, d] = self.roots;
        -((score - a) * (score - b) * (score - c) * (score - d))
    }

    /// Cell status for a single score: clamp(g(x), 0, 1).
    #[inline]
    pub fn status(&self, score: f64) -> f64 {
        self.gain(score).clamp(0.0, 1.0)
    }

    /// Apply the status function to every cell of a score grid.
    ///
    /// Saturation of large finite gains to exactly 0.0 or 1.0 is the
    /// intended behavior; only non-finite scores or gains are reported,
    /// with the offending cell's coordinates.
    pub fn apply(&self, scores: &Grid) -> Result<Grid, AutomataError> {
        let mut values = Vec::with_capacity(scores.values().len());
        for (i, &score) in scores.values().iter().enumerate() {
            let gain = self.gain(score);
            if !gain.is_finite() {
                let (channel, row, col) = scores.coords(i);
                return Err(AutomataError::NumericDomain {
                    channel,
                    row,
                    col,
                    value: score,
                });
            }
            values.push(gain.clamp(0.0, 1.0));
        }
        let (channels, rows, cols) = scores.shape();
        Ok(Grid::from_parts(channels, rows, cols, values))
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::for_center(crate::kernel::DEFAULT_CENTER_WEIGHT)
    }
}
