//! Engine configuration

use crate::engine::{AutomatonEngine, CaptureMode, EvolutionOutcome};
use crate::error::AutomataError;
use crate::grid::Grid;
use crate::kernel::{Kernel, DEFAULT_CENTER_WEIGHT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which canonical neighborhood the kernel uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KernelKind {
    /// All 8 neighbors.
    Moore,
    /// The 4-connected neighbors only.
    VonNeumann,
}

/// Configuration for one evolution run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Neighborhood shape.
    pub kernel: KernelKind,

    /// Kernel center weight (the offset separating the dead-cell and
    /// live-cell score bands).
    pub center_weight: i32,

    /// Number of transition applications.
    pub iterations: u64,

    /// Whether to keep intermediate grids.
    pub capture: CaptureMode,
}

impl EngineConfig {
    /// Create a standard configuration: reference center weight, final-only
    /// capture.
    pub fn new(kernel: KernelKind, iterations: u64) -> Self {
        Self {
            kernel,
            center_weight: DEFAULT_CENTER_WEIGHT,
            iterations,
            capture: CaptureMode::FinalOnly,
        }
    }

    /// Override the kernel center weight.
    pub fn with_center_weight(mut self, center_weight: i32) -> Self {
        self.center_weight = center_weight;
        self
    }

    /// Override the capture mode.
    pub fn with_capture(mut self, capture: CaptureMode) -> Self {
        self.capture = capture;
        self
    }

    /// Validate configuration.
    ///
    /// The live-cell score band (C + 1.5, C + 4.5) must sit strictly above
    /// the dead-cell band (1.5, 6.5), which needs an integer center weight
    /// of at least 6.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.center_weight < 6 {
            return Err("center_weight must be >= 6 to keep the score bands disjoint");
        }
        Ok(())
    }

    /// The kernel this configuration describes.
    pub fn build_kernel(&self) -> Kernel {
        match self.kernel {
            KernelKind::Moore => Kernel::moore(self.center_weight),
            KernelKind::VonNeumann => Kernel::von_neumann(self.center_weight),
        }
    }

    /// An engine for this configuration.
    pub fn build_engine(&self) -> AutomatonEngine {
        AutomatonEngine::new(self.build_kernel())
    }

    /// Run the configured evolution over `seed`.
    pub fn run(&self, seed: Grid) -> Result<EvolutionOutcome, AutomataError> {
        self.build_engine().run(seed, self.iterations, self.capture)
    }
}
