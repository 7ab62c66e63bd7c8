//! A* over the cell arena of a [PathingGrid]. Search bookkeeping lives in a [SearchState] that is
//! created per call and dropped afterwards; only cell statuses outlive the search.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexMap;
use log::{debug, info, trace};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::observer::StepObserver;
use crate::pathing_grid::{Cell, CellId, CellStatus, PathingGrid};
use crate::{N_SMALLVEC_SIZE, STEP_COST};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub type Cost = u32;

/// gScore of a cell the search never reached.
pub const UNREACHED: Cost = Cost::MAX;

struct FrontierEntry {
    estimated_cost: Cost,
    sequence: u64,
    cell: CellId,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.sequence == other.sequence
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimate first, then oldest insertion first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Route from start to end, both included.
    Found(Vec<CellId>),
    /// The frontier ran dry.
    NotFound,
    /// The observer asked to stop.
    Cancelled,
}

/// Everything a finished search leaves behind apart from cell statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Cells in the order they were expanded. The end cell is dequeued but never expanded.
    pub expanded: Vec<CellId>,
    /// Final gScore per cell, [UNREACHED] if never reached.
    pub g_score: Vec<Cost>,
    /// Number of frontier insertions, duplicates included.
    pub pushes: usize,
    /// Frontier entries discarded because a better one for the same cell came first.
    pub stale: usize,
}

impl SearchReport {
    pub(crate) fn not_found(cells: usize, start: CellId) -> SearchReport {
        let mut g_score = vec![UNREACHED; cells];
        g_score[start] = 0;
        SearchReport {
            outcome: Outcome::NotFound,
            expanded: Vec::new(),
            g_score,
            pushes: 0,
            stale: 0,
        }
    }
    pub fn found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }
    pub fn cancelled(&self) -> bool {
        self.outcome == Outcome::Cancelled
    }
    pub fn path(&self) -> Option<&[CellId]> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }
    /// Number of moves along the found path.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }
    pub fn g(&self, cell: CellId) -> Option<Cost> {
        self.g_score.get(cell).copied().filter(|&g| g != UNREACHED)
    }
}

struct SearchState {
    g_score: Vec<Cost>,
    f_score: Vec<Cost>,
    came_from: FxIndexMap<CellId, CellId>,
    in_frontier: FxHashSet<CellId>,
    frontier: BinaryHeap<FrontierEntry>,
    sequence: u64,
    expanded: Vec<CellId>,
    pushes: usize,
    stale: usize,
}

impl SearchState {
    fn new(cells: usize) -> SearchState {
        SearchState {
            g_score: vec![UNREACHED; cells],
            f_score: vec![UNREACHED; cells],
            came_from: FxIndexMap::default(),
            in_frontier: FxHashSet::default(),
            frontier: BinaryHeap::new(),
            sequence: 0,
            expanded: Vec::new(),
            pushes: 0,
            stale: 0,
        }
    }

    fn push(&mut self, cell: CellId, estimated_cost: Cost) {
        if !self.in_frontier.insert(cell) {
            trace!("Cell {cell} improved while queued, leaving its old entry behind");
        }
        self.frontier.push(FrontierEntry {
            estimated_cost,
            sequence: self.sequence,
            cell,
        });
        self.sequence += 1;
        self.pushes += 1;
    }

    fn finish(self, outcome: Outcome) -> SearchReport {
        debug!(
            "Search finished after {} expansions, {} pushes, {} stale entries",
            self.expanded.len(),
            self.pushes,
            self.stale
        );
        SearchReport {
            outcome,
            expanded: self.expanded,
            g_score: self.g_score,
            pushes: self.pushes,
            stale: self.stale,
        }
    }
}

/// Runs A* from `start` to `end` using the neighbour lists currently stored in `grid`.
/// `heuristic` estimates the remaining cost from a cell to `end`. Endpoints are assumed valid.
///
/// A cell whose score improves while it is still queued gets a second frontier entry rather
/// than a decrease-key; the outdated entry is skipped when it surfaces.
pub(crate) fn astar<FH, O>(
    grid: &mut PathingGrid,
    start: CellId,
    end: CellId,
    mut heuristic: FH,
    observer: &mut O,
) -> SearchReport
where
    FH: FnMut(&Cell) -> Cost,
    O: StepObserver + ?Sized,
{
    info!("Searching from {start} to {end}");
    let mut state = SearchState::new(grid.len());
    let h = heuristic(&grid[start]);
    state.g_score[start] = 0;
    state.f_score[start] = h;
    state.push(start, h);

    while let Some(FrontierEntry {
        estimated_cost,
        cell: current,
        ..
    }) = state.frontier.pop()
    {
        if !state.in_frontier.contains(&current) || estimated_cost != state.f_score[current] {
            state.stale += 1;
            continue;
        }
        state.in_frontier.remove(&current);

        if current == end {
            let path = reconstruct_path(grid, &state.came_from, end, observer);
            grid.move_end(end);
            let _ = observer.on_step(grid);
            info!("Found path of {} moves", path.len() - 1);
            return state.finish(Outcome::Found(path));
        }

        trace!("Expanding {current} with f = {estimated_cost}");
        state.expanded.push(current);
        let tentative_g = state.g_score[current] + STEP_COST;
        let neighbors: SmallVec<[CellId; N_SMALLVEC_SIZE]> =
            SmallVec::from_slice(grid[current].neighbors());
        for neighbor in neighbors {
            if tentative_g < state.g_score[neighbor] {
                state.came_from.insert(neighbor, current);
                state.g_score[neighbor] = tentative_g;
                let f = tentative_g + heuristic(&grid[neighbor]);
                state.f_score[neighbor] = f;
                state.push(neighbor, f);
                grid.annotate(neighbor, CellStatus::Open);
            }
        }

        if observer.on_step(grid).is_break() {
            info!("Search cancelled after {} expansions", state.expanded.len());
            return state.finish(Outcome::Cancelled);
        }
        if current != start {
            grid.annotate(current, CellStatus::Closed);
        }
    }
    info!("{end} is not reachable from {start}");
    state.finish(Outcome::NotFound)
}

/// Walks `came_from` back from `end`, marking each predecessor as path and notifying the
/// observer once per step. Returns the route from start to end.
fn reconstruct_path<O>(
    grid: &mut PathingGrid,
    came_from: &FxIndexMap<CellId, CellId>,
    end: CellId,
    observer: &mut O,
) -> Vec<CellId>
where
    O: StepObserver + ?Sized,
{
    let mut path = vec![end];
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
        // The start has no predecessor and keeps its status.
        if came_from.contains_key(&current) {
            grid.annotate(current, CellStatus::Path);
        }
        let _ = observer.on_step(grid);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use std::ops::ControlFlow;

    fn manhattan_to(grid: &PathingGrid, end: CellId) -> impl FnMut(&Cell) -> Cost {
        let (er, ec) = (grid[end].row, grid[end].col);
        move |c: &Cell| (c.row.abs_diff(er) + c.col.abs_diff(ec)) as Cost
    }

    #[test]
    fn frontier_breaks_ties_by_insertion() {
        let mut heap = BinaryHeap::new();
        let entries = [(3, 0), (2, 1), (2, 2), (3, 3)];
        for (sequence, (estimated_cost, cell)) in entries.into_iter().enumerate() {
            heap.push(FrontierEntry {
                estimated_cost,
                sequence: sequence as u64,
                cell,
            });
        }
        let order = std::iter::from_fn(|| heap.pop().map(|e| e.cell)).collect::<Vec<_>>();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn straight_corridor() {
        let mut grid = PathingGrid::new(3, 3).unwrap();
        grid.refresh_neighbors();
        let h = manhattan_to(&grid, 2);
        let report = astar(&mut grid, 0, 2, h, &mut NoopObserver);
        assert_eq!(report.path(), Some(&[0, 1, 2][..]));
        assert_eq!(report.expanded, vec![0, 1]);
        assert_eq!(grid[1].status(), CellStatus::Path);
        assert_eq!(grid[0].status(), CellStatus::Empty);
        assert_eq!(grid[2].status(), CellStatus::End);
    }

    #[test]
    fn reconstruction_leaves_start_alone() {
        let mut grid = PathingGrid::new(2, 2).unwrap();
        grid.set_start(0).unwrap();
        grid.set_end(3).unwrap();
        grid.refresh_neighbors();
        let h = manhattan_to(&grid, 3);
        let mut steps = 0;
        let mut observer = |_: &PathingGrid| {
            steps += 1;
            ControlFlow::Continue(())
        };
        let report = astar(&mut grid, 0, 3, h, &mut observer);
        // Three expansions, two steps back along the path, one final frame.
        assert_eq!(report.expanded, vec![0, 2, 1]);
        assert_eq!(report.path(), Some(&[0, 2, 3][..]));
        assert_eq!(steps, 6);
        assert_eq!(grid[0].status(), CellStatus::Start);
        assert_eq!(grid[3].status(), CellStatus::End);
    }

    #[test]
    fn improved_queued_cell_leaves_stale_entry() {
        // |S? |
        // |   |
        // |  #|
        // The heuristic is skewed so that the start's right neighbour is expanded late, after
        // its own right neighbour was already queued the long way round.
        let mut grid = PathingGrid::new(3, 3).unwrap();
        grid.set_status(8, CellStatus::Barrier).unwrap();
        grid.refresh_neighbors();
        let skewed = |c: &Cell| if c.row == 0 && c.col == 1 { 3 } else { 0 };
        let report = astar(&mut grid, 0, 8, skewed, &mut NoopObserver);
        assert_eq!(report.outcome, Outcome::NotFound);
        assert_eq!(report.expanded, vec![0, 3, 6, 4, 7, 5, 1, 2]);
        assert_eq!(report.g(2), Some(2));
        assert_eq!(report.pushes, 9);
        assert_eq!(report.stale, 1);
        assert_eq!(report.g(8), None);
    }
}
