//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on a square grid of cells with
//! barriers, moving only orthogonally at unit cost. The search writes open, closed and path
//! annotations into the grid as it goes and hands the grid to a [StepObserver] after every
//! expansion, so a renderer can animate it or cancel it.
//!
//! ```
//! use grid_astar::{solve, NoopObserver, PathingGrid};
//!
//! let mut grid = PathingGrid::new(5, 50).unwrap();
//! for row in 0..4 {
//!     grid.set_barrier(grid.id(row, 2).unwrap()).unwrap();
//! }
//! let (start, end) = (grid.id(0, 0).unwrap(), grid.id(4, 4).unwrap());
//! grid.set_start(start).unwrap();
//! grid.set_end(end).unwrap();
//! grid.refresh_neighbors();
//! let report = solve(&mut grid, start, end, &mut NoopObserver).unwrap();
//! assert_eq!(report.path_len(), Some(8));
//! ```
pub mod error;
pub mod observer;
pub mod pathing_grid;
pub mod render;
pub mod search;
pub mod solver;

pub use error::{PathfindingError, Result};
pub use observer::{CancelFlag, Cancellable, FrameRecorder, NoopObserver, StepObserver};
pub use pathing_grid::{Cell, CellId, CellStatus, PathingGrid};
pub use search::{Cost, Outcome, SearchReport, UNREACHED};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, heuristic, path_cost, GridSolver};

/// Number of rows (and columns) of a default grid.
pub const DEFAULT_ROWS: usize = 50;
/// Pixel width of a default grid.
pub const DEFAULT_WIDTH: usize = 800;
/// Cost of a single orthogonal move.
pub const STEP_COST: Cost = 1;
const N_SMALLVEC_SIZE: usize = 4;

/// Solves with a plain [AstarSolver]; see [GridSolver::solve].
pub fn solve<O>(
    grid: &mut PathingGrid,
    start: CellId,
    end: CellId,
    observer: &mut O,
) -> Result<SearchReport>
where
    O: StepObserver + ?Sized,
{
    AstarSolver::new().solve(grid, start, end, observer)
}
