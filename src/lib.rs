//! Key Automata - deterministic toroidal grid evolution for keying material
//!
//! A small grid, a fixed kernel, and millions of iterations: the state that
//! falls out looks random but is bit-for-bit reproducible.
//!
//! # Core Types
//!
//! - **Grid**: Multi-channel 2D cell-state array with wraparound edges
//! - **Kernel**: Fixed 3x3 integer weight matrix (Moore / von Neumann / custom)
//! - **Threshold**: Quartic polynomial + clamp mapping scores to binary status
//! - **AutomatonEngine**: The evolution loop, with final-only or
//!   full-trajectory capture
//!
//! # Architecture
//!
//! One step is neighbor aggregation followed by thresholding; all evolution
//! state is the grid itself, passed explicitly. Grids are immutable once
//! built, so trajectory entries stay valid across later steps and completed
//! grids are safe to read from any thread.
//!
//! The threshold replaces the classical survival/birth lookup with a closed
//! form: for center weight C the quartic
//! `-(x - 1.5)(x - 6.5)(x - (C + 1.5))(x - (C + 4.5))`, clamped to [0, 1],
//! is positive exactly on the dead-cell birth band and the live-cell
//! survival band of raw scores. Away from its roots the quartic is steep
//! enough that binary inputs always saturate to exactly 0.0 or 1.0.
//!
//! # Example
//!
//! ```rust
//! use key_automata::{AutomatonEngine, Grid, Kernel};
//!
//! // Reference configuration: 2 channels, 16x16, Moore kernel, center 10.
//! let seed = Grid::from_fn(2, 16, 16, |ch, r, c| ((ch + r * c) % 2) as f64)?;
//! let engine = AutomatonEngine::new(Kernel::moore(10));
//!
//! let derived = engine.evolve(seed.clone(), 1_000)?;
//! assert!(derived.is_binary());
//!
//! // Same seed, same kernel, same count: identical output.
//! assert_eq!(derived, engine.evolve(seed, 1_000)?);
//! # Ok::<(), key_automata::AutomataError>(())
//! ```
//!
//! # Features
//!
//! - `serde`: serialization for the public data types
//! - `rand`: the [`Grid::random`] uniform-binary seed constructor
//! - `parallel`: rayon across cells within one step (output is identical
//!   to the sequential path)

mod config;
mod engine;
mod error;
mod grid;
mod kernel;
mod threshold;

pub use config::{EngineConfig, KernelKind};
pub use engine::{AutomatonEngine, CaptureMode, Evolution, EvolutionOutcome};
pub use error::AutomataError;
pub use grid::Grid;
pub use kernel::{Kernel, DEFAULT_CENTER_WEIGHT};
pub use threshold::Threshold;
