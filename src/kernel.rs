//! Kernel - fixed 3x3 neighbor weight matrix
//!
//! One kernel is applied identically to every channel; there is no
//! cross-channel mixing. The center weight lifts a live cell's own
//! contribution clear of the neighbor-count band, which is what lets the
//! threshold polynomial read "alive with k neighbors" and "dead with k
//! neighbors" off a single scalar score.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference center weight. Must be chosen consistent with the threshold
/// root placement; see [`crate::Threshold`].
pub const DEFAULT_CENTER_WEIGHT: i32 = 10;

/// Fixed 3x3 integer weight matrix defining neighbor influence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kernel {
    weights: [[i32; 3]; 3],
}

impl Kernel {
    /// Moore neighborhood: all 8 neighbors weighted 1, `center` in the middle.
    pub fn moore(center: i32) -> Self {
        Self {
            weights: [[1, 1, 1], [1, center, 1], [1, 1, 1]],
        }
    }

    /// Von Neumann neighborhood: the 4-connected neighbors weighted 1,
    /// `center` in the middle, corners 0.
    pub fn von_neumann(center: i32) -> Self {
        Self {
            weights: [[0, 1, 0], [1, center, 1], [0, 1, 0]],
        }
    }

    /// Arbitrary 3x3 weights, `weights[dr + 1][dc + 1]` for offset (dr, dc).
    pub fn custom(weights: [[i32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Weight for neighbor offset (dr, dc), each in -1..=1.
    #[inline]
    pub fn weight(&self, dr: isize, dc: isize) -> i32 {
        self.weights[(dr + 1) as usize][(dc + 1) as usize]
    }

    /// The center weight.
    #[inline]
    pub fn center(&self) -> i32 {
        self.weights[1][1]
    }

    /// The raw weight matrix.
    #[inline]
    pub fn weights(&self) -> &[[i32; 3]; 3] {
        &self.weights
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::moore(DEFAULT_CENTER_WEIGHT)
    }
}
