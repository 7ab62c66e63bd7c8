use crate::error::{PathfindingError, Result};
use crate::observer::StepObserver;
use crate::pathing_grid::{CellId, CellStatus, PathingGrid};
use crate::search::{self, Cost, Outcome, SearchReport};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};

pub mod astar;
pub mod dijkstra;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
/// Admissible and consistent for unit-cost moves without diagonals.
pub fn heuristic(p1: &Point, p2: &Point) -> Cost {
    p1.manhattan_distance(p2) as Cost
}

/// Total cost of a path given as consecutive cells, or [None] if two consecutive cells are not
/// orthogonally adjacent.
pub fn path_cost(grid: &PathingGrid, path: &[CellId]) -> Option<Cost> {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| {
            let (pa, pb) = (grid.cell(*a)?.point(), grid.cell(*b)?.point());
            (heuristic(&pa, &pb) == 1).then_some(crate::STEP_COST)
        })
        .sum()
}

pub trait GridSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> Cost;

    /// Whether to consult the grid's connected components before searching. A negative answer
    /// then skips the search, and the observer, entirely.
    fn precheck_components(&self) -> bool {
        false
    }

    /// Checks the endpoints and runs A* from `start` to `end`. The neighbour lists must be
    /// current; solving with stale ones is allowed but yields wrong routes.
    fn solve<O>(
        &self,
        grid: &mut PathingGrid,
        start: CellId,
        end: CellId,
        observer: &mut O,
    ) -> Result<SearchReport>
    where
        O: StepObserver + ?Sized,
    {
        validate_endpoints(grid, start, end)?;
        if grid.neighbors_dirty {
            warn!("Solving with neighbour lists that predate the last barrier edit");
        }
        if self.precheck_components() && grid.unreachable(start, end) {
            info!("{start} and {end} are on different components");
            return Ok(SearchReport::not_found(grid.len(), start));
        }
        let goal = grid[end].point();
        let report = search::astar(
            grid,
            start,
            end,
            |cell| self.heuristic(&cell.point(), &goal),
            observer,
        );
        if report.outcome == Outcome::NotFound
            && !grid.neighbors_dirty
            && !grid.unreachable(start, end)
        {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        }
        Ok(report)
    }

    /// Refreshes the neighbour lists and solves between the grid's own start and end.
    fn solve_marked<O>(&self, grid: &mut PathingGrid, observer: &mut O) -> Result<SearchReport>
    where
        O: StepObserver + ?Sized,
    {
        let start = grid.start().ok_or(PathfindingError::MissingStart)?;
        let end = grid.end().ok_or(PathfindingError::MissingEnd)?;
        grid.refresh_neighbors();
        self.solve(grid, start, end, observer)
    }
}

fn validate_endpoints(grid: &PathingGrid, start: CellId, end: CellId) -> Result<()> {
    grid.check(start)?;
    grid.check(end)?;
    if start == end {
        return Err(PathfindingError::SameStartEnd(start));
    }
    // A found end becomes the grid's end, which must not take over its start.
    if grid.start() == Some(end) {
        return Err(PathfindingError::SwappedEndpoint(end));
    }
    if grid.end() == Some(start) {
        return Err(PathfindingError::SwappedEndpoint(start));
    }
    for id in [start, end] {
        if grid[id].status() == CellStatus::Barrier {
            return Err(PathfindingError::BarrierEndpoint(id));
        }
    }
    Ok(())
}
