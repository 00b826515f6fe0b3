//! Grid - multi-channel toroidal cell-state array
//!
//! The atomic unit of automaton state. A grid holds `channels` independent
//! R x C planes of real-valued cells; edges wrap, so row 0 treats row R-1
//! as its "row -1" neighbor, and symmetrically for columns.
//!
//! Grids follow a functional update discipline: once built, a grid is never
//! mutated. Each evolution step produces a fresh grid, which keeps trajectory
//! capture trivial and makes completed grids safe to share across threads.

use crate::error::AutomataError;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Character rendering a live (nonzero) cell in text output.
const LIVE_CHAR: char = '#';
/// Character rendering a dead (zero) cell in text output.
const DEAD_CHAR: char = '.';

/// Multi-channel 2D cell-state array with toroidal boundaries.
///
/// Indexed by (channel, row, column). All channels share the same spatial
/// shape and every value is finite; both invariants are enforced at
/// construction, so downstream consumers never re-validate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    channels: usize,
    rows: usize,
    cols: usize,
    /// Row-major per channel: index = (channel * rows + row) * cols + col.
    values: Vec<f64>,
}

impl Grid {
    /// Create a zero-initialized grid.
    pub fn zeros(channels: usize, rows: usize, cols: usize) -> Result<Self, AutomataError> {
        Self::check_shape(channels, rows, cols)?;
        Ok(Self {
            channels,
            rows,
            cols,
            values: vec![0.0; channels * rows * cols],
        })
    }

    /// Create a grid from a flat value buffer, row-major per channel.
    pub fn from_values(
        channels: usize,
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    ) -> Result<Self, AutomataError> {
        Self::check_shape(channels, rows, cols)?;
        if values.len() != channels * rows * cols {
            return Err(AutomataError::Shape {
                channels,
                rows,
                cols,
                reason: "value buffer length does not match shape",
            });
        }
        let grid = Self {
            channels,
            rows,
            cols,
            values,
        };
        grid.check_finite()?;
        Ok(grid)
    }

    /// Create a grid by evaluating `f(channel, row, col)` at every cell.
    pub fn from_fn<F>(
        channels: usize,
        rows: usize,
        cols: usize,
        mut f: F,
    ) -> Result<Self, AutomataError>
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        Self::check_shape(channels, rows, cols)?;
        let mut values = Vec::with_capacity(channels * rows * cols);
        for ch in 0..channels {
            for r in 0..rows {
                for c in 0..cols {
                    values.push(f(ch, r, c));
                }
            }
        }
        let grid = Self {
            channels,
            rows,
            cols,
            values,
        };
        grid.check_finite()?;
        Ok(grid)
    }

    /// Create a uniform-binary random seed grid (each cell 0.0 or 1.0 with
    /// equal probability, per channel). The caller owns the `Rng`, so a
    /// seeded generator gives reproducible seeds.
    #[cfg(feature = "rand")]
    pub fn random<R: rand::Rng + ?Sized>(
        channels: usize,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, AutomataError> {
        Self::from_fn(channels, rows, cols, |_, _, _| {
            if rng.random_bool(0.5) {
                1.0
            } else {
                0.0
            }
        })
    }

    /// Internal constructor for buffers the engine just computed. Shape is
    /// inherited from a validated grid; finiteness is the caller's problem.
    pub(crate) fn from_parts(channels: usize, rows: usize, cols: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), channels * rows * cols);
        Self {
            channels,
            rows,
            cols,
            values,
        }
    }

    fn check_shape(channels: usize, rows: usize, cols: usize) -> Result<(), AutomataError> {
        if channels == 0 || rows == 0 || cols == 0 {
            return Err(AutomataError::Shape {
                channels,
                rows,
                cols,
                reason: "all dimensions must be positive",
            });
        }
        Ok(())
    }

    fn check_finite(&self) -> Result<(), AutomataError> {
        for (i, &v) in self.values.iter().enumerate() {
            if !v.is_finite() {
                let (channel, row, col) = self.coords(i);
                return Err(AutomataError::NumericDomain {
                    channel,
                    row,
                    col,
                    value: v,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // SHAPE
    // =========================================================================

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (channels, rows, cols) tuple.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.channels, self.rows, self.cols)
    }

    /// Whether `other` has the same shape.
    #[inline]
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.shape() == other.shape()
    }

    /// Recover (channel, row, col) from a flat buffer index.
    #[inline]
    pub(crate) fn coords(&self, index: usize) -> (usize, usize, usize) {
        let plane = self.rows * self.cols;
        (index / plane, index % plane / self.cols, index % self.cols)
    }

    // =========================================================================
    // READING
    // =========================================================================

    /// Value at a canonical (in-bounds) index.
    #[inline]
    pub fn get(&self, channel: usize, row: usize, col: usize) -> f64 {
        self.values[(channel * self.rows + row) * self.cols + col]
    }

    /// Value at a toroidal index: `row` and `col` may be any integer and are
    /// wrapped modulo the spatial dimensions.
    #[inline]
    pub fn get_wrapped(&self, channel: usize, row: isize, col: isize) -> f64 {
        let r = row.rem_euclid(self.rows as isize) as usize;
        let c = col.rem_euclid(self.cols as isize) as usize;
        self.get(channel, r, c)
    }

    /// The flat value buffer, row-major per channel.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether every cell is exactly 0.0 or 1.0.
    pub fn is_binary(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0 || v == 1.0)
    }

    // =========================================================================
    // DERIVED GRIDS
    // =========================================================================

    /// The toroidal translation of this grid by (dr, dc): cell (r, c) of the
    /// result holds cell ((r - dr) mod R, (c - dc) mod C) of the original.
    pub fn shifted(&self, dr: isize, dc: isize) -> Grid {
        let mut values = Vec::with_capacity(self.values.len());
        for ch in 0..self.channels {
            for r in 0..self.rows {
                for c in 0..self.cols {
                    values.push(self.get_wrapped(ch, r as isize - dr, c as isize - dc));
                }
            }
        }
        Grid::from_parts(self.channels, self.rows, self.cols, values)
    }

    // =========================================================================
    // POPULATION
    // =========================================================================

    /// Count of nonzero cells in one channel.
    pub fn population(&self, channel: usize) -> usize {
        let plane = self.rows * self.cols;
        self.values[channel * plane..(channel + 1) * plane]
            .iter()
            .filter(|&&v| v != 0.0)
            .count()
    }

    /// Count of nonzero cells across all channels.
    pub fn total_population(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}

/// Renders each channel as rows of `#` (nonzero) and `.` (zero), channels
/// separated by a blank line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for ch in 0..self.channels {
            if ch > 0 {
                writeln!(f)?;
            }
            for r in 0..self.rows {
                let row: String = (0..self.cols)
                    .map(|c| {
                        if self.get(ch, r, c) != 0.0 {
                            LIVE_CHAR
                        } else {
                            DEAD_CHAR
                        }
                    })
                    .collect();
                writeln!(f, "{}", row)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let g = Grid::zeros(2, 16, 16).unwrap();
        assert_eq!(g.shape(), (2, 16, 16));
        assert_eq!(g.total_population(), 0);
        assert!(g.is_binary());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = Grid::zeros(0, 16, 16).unwrap_err();
        assert!(matches!(err, AutomataError::Shape { channels: 0, .. }));
        assert!(Grid::zeros(1, 0, 4).is_err());
        assert!(Grid::zeros(1, 4, 0).is_err());
    }

    #[test]
    fn test_from_values_length_mismatch() {
        let err = Grid::from_values(1, 4, 4, vec![0.0; 15]).unwrap_err();
        assert!(matches!(err, AutomataError::Shape { .. }));
    }

    #[test]
    fn test_non_finite_rejected_with_coordinates() {
        let mut values = vec![0.0; 2 * 4 * 4];
        values[16 + 2 * 4 + 3] = f64::NAN; // channel 1, row 2, col 3
        let err = Grid::from_values(2, 4, 4, values).unwrap_err();
        match err {
            AutomataError::NumericDomain {
                channel, row, col, ..
            } => {
                assert_eq!((channel, row, col), (1, 2, 3));
            }
            other => panic!("expected NumericDomain, got {:?}", other),
        }
    }

    #[test]
    fn test_wrapped_indexing() {
        let g = Grid::from_fn(1, 3, 4, |_, r, c| (r * 4 + c) as f64).unwrap();
        assert_eq!(g.get_wrapped(0, -1, 0), g.get(0, 2, 0));
        assert_eq!(g.get_wrapped(0, 0, -1), g.get(0, 0, 3));
        assert_eq!(g.get_wrapped(0, 3, 4), g.get(0, 0, 0));
        assert_eq!(g.get_wrapped(0, -4, -5), g.get(0, 2, 3));
    }

    #[test]
    fn test_shift_round_trip() {
        let g = Grid::from_fn(2, 4, 5, |ch, r, c| ((ch + 2 * r + 3 * c) % 2) as f64).unwrap();
        assert_eq!(g.shifted(1, 2).shifted(-1, -2), g);
        // Shifting by a full period is the identity.
        assert_eq!(g.shifted(4, 5), g);
    }

    #[test]
    fn test_shift_moves_cells() {
        let mut values = vec![0.0; 16];
        values[0] = 1.0; // (0, 0)
        let g = Grid::from_values(1, 4, 4, values).unwrap();
        let s = g.shifted(1, 2);
        assert_eq!(s.get(0, 1, 2), 1.0);
        assert_eq!(s.total_population(), 1);
    }

    #[test]
    fn test_population() {
        let g = Grid::from_fn(2, 4, 4, |ch, r, c| {
            if ch == 0 && r == c {
                1.0
            } else {
                0.0
            }
        })
        .unwrap();
        assert_eq!(g.population(0), 4);
        assert_eq!(g.population(1), 0);
        assert_eq!(g.total_population(), 4);
    }

    #[test]
    fn test_display() {
        let mut values = vec![0.0; 9];
        values[4] = 1.0;
        let g = Grid::from_values(1, 3, 3, values).unwrap();
        assert_eq!(g.to_string(), "...\n.#.\n...\n");
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_random_is_binary() {
        use rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        let g = Grid::random(2, 16, 16, &mut rng).unwrap();
        assert!(g.is_binary());
    }
}
