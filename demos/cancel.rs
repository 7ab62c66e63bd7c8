use grid_astar::{solve, CancelFlag, CellStatus, NoopObserver, PathingGrid};
use std::ops::ControlFlow;

// Cancels a search on the default 50x50 grid as soon as 100 cells have been closed, the way an
// input handler would when the window is closed mid-animation.

fn main() {
    let mut grid = PathingGrid::default();
    let start = grid.id(0, 0).unwrap();
    let end = grid.id(49, 49).unwrap();
    grid.set_start(start).unwrap();
    grid.set_end(end).unwrap();
    grid.refresh_neighbors();

    let flag = CancelFlag::new();
    let trigger = flag.clone();
    let mut observer = flag.watch(move |grid: &PathingGrid| {
        let closed = grid
            .cells()
            .iter()
            .filter(|c| c.status() == CellStatus::Closed)
            .count();
        if closed >= 100 {
            trigger.cancel();
        }
        ControlFlow::Continue(())
    });
    let report = solve(&mut grid, start, end, &mut observer).unwrap();
    println!("{:?} after {} expansions", report.outcome, report.expanded.len());

    grid.reset_transient();
    flag.reset();
    let report = solve(&mut grid, start, end, &mut NoopObserver).unwrap();
    println!("Uninterrupted: {:?} moves", report.path_len());
}
