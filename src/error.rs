//! Error types for grid construction and search preconditions.

use thiserror::Error;

use crate::pathing_grid::CellId;

/// Configuration errors reported before a search is run. An unreachable goal is not an
/// error; see [Outcome::NotFound](crate::Outcome::NotFound).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathfindingError {
    #[error("invalid grid dimensions: {rows} rows over {width} pixels")]
    InvalidDimensions { rows: usize, width: usize },

    #[error("cell {0} is outside the grid")]
    OutOfBounds(CellId),

    #[error("no start cell has been set")]
    MissingStart,

    #[error("no end cell has been set")]
    MissingEnd,

    #[error("start and end are the same cell ({0})")]
    SameStartEnd(CellId),

    #[error("cell {0} is already the grid's other endpoint")]
    SwappedEndpoint(CellId),

    #[error("endpoint {0} is a barrier")]
    BarrierEndpoint(CellId),
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
