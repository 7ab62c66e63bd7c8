use grid_util::point::Point;

use crate::search::Cost;
use crate::solver::{heuristic, GridSolver};

#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    /// Skip the search when the grid's components already prove the end unreachable.
    pub precheck_components: bool,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            precheck_components: false,
        }
    }
}

impl GridSolver for AstarSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> Cost {
        heuristic(p1, p2)
    }

    fn precheck_components(&self) -> bool {
        self.precheck_components
    }
}
