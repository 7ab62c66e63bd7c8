/// Fuzzes the search by checking, for many random grids, that A* agrees with a breadth-first
/// search: same reachability, same path length, and every expanded cell already carries its
/// true distance from the start.
use grid_astar::*;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(n: usize, rng: &mut StdRng, density: f64) -> PathingGrid {
    let mut grid = PathingGrid::new(n, n).unwrap();
    for id in 0..grid.len() {
        if rng.gen_bool(density) {
            grid.set_barrier(id).unwrap();
        }
    }
    grid
}

fn random_cell(grid: &PathingGrid, rng: &mut StdRng) -> CellId {
    rng.gen_range(0..grid.len())
}

/// Distances from `start` derived straight from the statuses, independent of neighbour lists.
fn bfs(grid: &PathingGrid, start: CellId) -> Vec<Option<Cost>> {
    let n = grid.rows() as i64;
    let mut dist = vec![None; grid.len()];
    dist[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        let (row, col) = grid.position(id).unwrap();
        for (dr, dc) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let (r, c) = (row as i64 + dr, col as i64 + dc);
            if r < 0 || c < 0 || r >= n || c >= n {
                continue;
            }
            let next = grid.id(r as usize, c as usize).unwrap();
            if dist[next].is_none() && !grid[next].is_barrier() {
                dist[next] = dist[id].map(|d| d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

fn visualize_grid(grid: &PathingGrid) {
    print!("{grid}");
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng, 0.35);
        let start = grid.id(0, 0).unwrap();
        let end = grid.id(N - 1, N - 1).unwrap();
        grid.set_start(start).unwrap();
        grid.set_end(end).unwrap();
        grid.refresh_neighbors();

        let dist = bfs(&grid, start);
        let report = solver.solve(&mut grid, start, end, &mut NoopObserver).unwrap();
        if report.found() != dist[end].is_some() {
            visualize_grid(&grid);
        }
        assert_eq!(report.found(), dist[end].is_some());
        if let Some(path) = report.path() {
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert_eq!(path_cost(&grid, path), dist[end]);
        }
        for &cell in &report.expanded {
            assert_eq!(report.g(cell), dist[cell]);
        }
    }
}

#[test]
fn fuzz_random_endpoints() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng, 0.25);
        let start = random_cell(&grid, &mut rng);
        let end = random_cell(&grid, &mut rng);
        grid.refresh_neighbors();
        let result = solve(&mut grid, start, end, &mut NoopObserver);
        if start == end {
            assert_eq!(result, Err(PathfindingError::SameStartEnd(start)));
            continue;
        }
        if grid[start].is_barrier() || grid[end].is_barrier() {
            assert!(matches!(result, Err(PathfindingError::BarrierEndpoint(_))));
            continue;
        }
        let report = result.unwrap();
        let dist = bfs(&grid, start);
        assert_eq!(report.path_len().map(|l| l as Cost), dist[end]);
    }
}

#[test]
fn fuzz_dijkstra_agrees() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..500 {
        let mut grid = random_grid(N, &mut rng, 0.3);
        let (start, end) = (0, grid.len() - 1);
        grid.clear_cell(start).unwrap();
        grid.clear_cell(end).unwrap();
        grid.refresh_neighbors();
        let astar = AstarSolver::new()
            .solve(&mut grid, start, end, &mut NoopObserver)
            .unwrap();
        grid.reset_transient();
        let dijkstra = DijkstraSolver
            .solve(&mut grid, start, end, &mut NoopObserver)
            .unwrap();
        assert_eq!(astar.path_len(), dijkstra.path_len());
        // The heuristic only ever saves work.
        assert!(astar.expanded.len() <= dijkstra.expanded.len());
    }
}

#[test]
fn determinism() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let mut grid = random_grid(15, &mut rng, 0.3);
        let (start, end) = (0, grid.len() - 1);
        grid.set_start(start).unwrap();
        grid.set_end(end).unwrap();
        grid.refresh_neighbors();
        let mut copy = grid.clone();

        let mut frames = FrameRecorder::default();
        let first = solve(&mut grid, start, end, &mut frames).unwrap();
        let mut copy_frames = FrameRecorder::default();
        let second = solve(&mut copy, start, end, &mut copy_frames).unwrap();
        assert_eq!(first, second);
        assert_eq!(frames.frames, copy_frames.frames);

        grid.reset_transient();
        let again = solve(&mut grid, start, end, &mut NoopObserver).unwrap();
        assert_eq!(first, again);
        assert_eq!(grid.to_string(), copy.to_string());
    }
}
