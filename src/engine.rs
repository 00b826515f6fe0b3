//! Automaton engine - the core evolution loop
//!
//! One step is neighbor aggregation followed by the threshold:
//! `step(grid) = threshold(aggregate(grid))`. The engine repeats that for a
//! caller-specified number of iterations, keeping either the final grid or
//! the full trajectory. Steps cannot be pipelined (step i+1 needs all of
//! step i), but within a step every cell is independent, which is what the
//! optional `parallel` feature exploits.
//!
//! Given the same seed, kernel, and iteration count, the output is
//! bit-for-bit reproducible: cells are always summed in the same 9-term
//! order, sequentially or in parallel.

use crate::error::AutomataError;
use crate::grid::Grid;
use crate::kernel::Kernel;
use crate::threshold::Threshold;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the engine keeps while iterating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaptureMode {
    /// Keep only the grid after the last iteration.
    FinalOnly,
    /// Keep every intermediate grid: N iterations yield N + 1 grids,
    /// index 0 the seed, index i the state after i steps.
    FullTrajectory,
}

/// Result of a capture-mode driven run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvolutionOutcome {
    /// Final grid from a [`CaptureMode::FinalOnly`] run.
    Final(Grid),
    /// Seed plus every evolved grid from a [`CaptureMode::FullTrajectory`]
    /// run; always holds at least the seed.
    Trajectory(Vec<Grid>),
}

impl EvolutionOutcome {
    /// The last grid of the run, whichever mode produced it.
    pub fn final_grid(&self) -> &Grid {
        match self {
            Self::Final(grid) => grid,
            Self::Trajectory(grids) => grids.last().expect("trajectory holds at least the seed"),
        }
    }

    /// The captured trajectory, if the run kept one.
    pub fn into_trajectory(self) -> Option<Vec<Grid>> {
        match self {
            Self::Final(_) => None,
            Self::Trajectory(grids) => Some(grids),
        }
    }
}

/// Drives repeated application of aggregation + threshold over a grid.
///
/// The engine holds no evolution state; all state is the grid, passed
/// explicitly. A completed grid is never mutated, so holding references to
/// earlier trajectory entries across later steps is always safe.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AutomatonEngine {
    kernel: Kernel,
    threshold: Threshold,
}

impl AutomatonEngine {
    /// Create an engine for `kernel`, deriving the threshold roots from its
    /// center weight.
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            threshold: Threshold::for_center(kernel.center()),
        }
    }

    /// The kernel in use.
    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// The threshold in use.
    #[inline]
    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    // =========================================================================
    // ONE STEP
    // =========================================================================

    /// Weighted toroidal neighbor sums for every cell and channel.
    ///
    /// Direct 9-term sum per cell; the grid is small and fixed, so no
    /// general convolution machinery. Scores are an internal intermediate,
    /// consumed only by the threshold.
    fn scores(&self, grid: &Grid) -> Grid {
        let (channels, rows, cols) = grid.shape();
        let mut values = vec![0.0; channels * rows * cols];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            values
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(band, out)| {
                    self.score_row(grid, band / rows, band % rows, out);
                });
        }

        #[cfg(not(feature = "parallel"))]
        for (band, out) in values.chunks_mut(cols).enumerate() {
            self.score_row(grid, band / rows, band % rows, out);
        }

        Grid::from_parts(channels, rows, cols, values)
    }

    /// Score one row of one channel into `out`.
    fn score_row(&self, grid: &Grid, channel: usize, row: usize, out: &mut [f64]) {
        for (col, slot) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    let weight = self.kernel.weight(dr, dc);
                    if weight == 0 {
                        continue;
                    }
                    acc += f64::from(weight)
                        * grid.get_wrapped(channel, row as isize + dr, col as isize + dc);
                }
            }
            *slot = acc;
        }
    }

    /// Apply one transition: threshold over the neighbor scores.
    pub fn step(&self, grid: &Grid) -> Result<Grid, AutomataError> {
        self.threshold.apply(&self.scores(grid))
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Evolve `seed` for exactly `iterations` steps, keeping only the final
    /// grid. Zero iterations return the seed unchanged.
    pub fn evolve(&self, seed: Grid, iterations: u64) -> Result<Grid, AutomataError> {
        let mut grid = seed;
        for _ in 0..iterations {
            grid = self.step(&grid)?;
        }
        Ok(grid)
    }

    /// Evolve `seed` for exactly `iterations` steps, keeping every state:
    /// the result holds `iterations + 1` grids, index 0 the seed.
    pub fn trajectory(&self, seed: Grid, iterations: u64) -> Result<Vec<Grid>, AutomataError> {
        let mut grids = Vec::with_capacity(iterations as usize + 1);
        let mut current = seed;
        for _ in 0..iterations {
            let next = self.step(&current)?;
            grids.push(std::mem::replace(&mut current, next));
        }
        grids.push(current);
        Ok(grids)
    }

    /// Capture-mode driver over [`Self::evolve`] and [`Self::trajectory`].
    pub fn run(
        &self,
        seed: Grid,
        iterations: u64,
        capture: CaptureMode,
    ) -> Result<EvolutionOutcome, AutomataError> {
        match capture {
            CaptureMode::FinalOnly => self.evolve(seed, iterations).map(EvolutionOutcome::Final),
            CaptureMode::FullTrajectory => self
                .trajectory(seed, iterations)
                .map(EvolutionOutcome::Trajectory),
        }
    }

    /// Open-ended evolution from `seed`, one post-step grid per item.
    ///
    /// This is the cooperative early-termination surface: the caller stops
    /// consuming after iteration i and keeps grid i. The iterator fuses
    /// after yielding an error.
    pub fn evolution(&self, seed: Grid) -> Evolution<'_> {
        Evolution {
            engine: self,
            state: Some(seed),
        }
    }
}

impl Default for AutomatonEngine {
    fn default() -> Self {
        Self::new(Kernel::default())
    }
}

/// Iterator of successive evolved grids; see [`AutomatonEngine::evolution`].
pub struct Evolution<'a> {
    engine: &'a AutomatonEngine,
    state: Option<Grid>,
}

impl Iterator for Evolution<'_> {
    type Item = Result<Grid, AutomataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.state.take()?;
        match self.engine.step(&current) {
            Ok(next) => {
                self.state = Some(next.clone());
                Some(Ok(next))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
