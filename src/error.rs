//! Error taxonomy for grid construction and engine evaluation

use thiserror::Error;

/// Errors surfaced by the automaton engine and its grid data model.
///
/// There is no transient category: the engine is pure computation with no
/// I/O, so nothing is retried. Both variants are fatal and surface
/// synchronously to the caller of the failing operation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AutomataError {
    /// Malformed grid dimensions or a value buffer that does not match them.
    #[error("invalid grid shape ({channels} channel(s), {rows}x{cols}): {reason}")]
    Shape {
        channels: usize,
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    /// A value left the representable range during threshold evaluation,
    /// or a non-finite value entered the grid. Coordinates identify the
    /// offending cell to aid debugging of kernel/offset misconfiguration.
    #[error("non-finite value {value} at channel {channel}, cell ({row}, {col})")]
    NumericDomain {
        channel: usize,
        row: usize,
        col: usize,
        value: f64,
    },
}
