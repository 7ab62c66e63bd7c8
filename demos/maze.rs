use grid_astar::{AstarSolver, GridSolver, PathingGrid};
use std::ops::ControlFlow;

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S #  |
// |  #  |
// |  #  |
// |  #  |
// |    E|
//  _____
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// Every step of the search is printed as it happens.

fn main() {
    let mut grid = PathingGrid::new(5, 500).unwrap();
    grid.place(grid.id(0, 0).unwrap()).unwrap();
    grid.place(grid.id(4, 4).unwrap()).unwrap();
    for row in 0..4 {
        grid.place(grid.id(row, 2).unwrap()).unwrap();
    }
    let mut frame = 0;
    let mut print_frame = |grid: &PathingGrid| {
        frame += 1;
        println!("Step {frame}:\n{grid}");
        ControlFlow::Continue(())
    };
    let report = AstarSolver::new()
        .solve_marked(&mut grid, &mut print_frame)
        .unwrap();
    println!("Path:");
    for id in report.path().unwrap_or_default() {
        println!("{:?}", grid.position(*id).unwrap());
    }
}
