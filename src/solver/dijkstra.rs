use grid_util::point::Point;

use crate::search::Cost;
use crate::solver::GridSolver;

/// A* without a heuristic, expanding cells in order of distance from the start.
#[derive(Clone, Debug)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> Cost {
        0
    }
}
