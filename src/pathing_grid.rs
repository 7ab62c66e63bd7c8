use core::fmt;
use std::ops::Index;

use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::{PathfindingError, Result};
use crate::render::glyph;
use crate::{DEFAULT_ROWS, DEFAULT_WIDTH, N_SMALLVEC_SIZE};

/// Stable arena index of a cell, `row * rows + col`.
pub type CellId = usize;

/// What a cell currently is. The search only ever writes [Open](CellStatus::Open),
/// [Closed](CellStatus::Closed) and [Path](CellStatus::Path); everything else is authored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellStatus {
    #[default]
    Empty,
    Open,
    Closed,
    Barrier,
    Start,
    End,
    Path,
}

impl CellStatus {
    /// Annotations left behind by a search, cleared by [PathingGrid::reset_transient].
    pub fn is_transient(self) -> bool {
        matches!(self, CellStatus::Open | CellStatus::Closed | CellStatus::Path)
    }
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellStatus::Start | CellStatus::End)
    }
}

/// One grid position. The pixel geometry (`x`, `y`, `size`) only exists for renderers.
#[derive(Clone, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub x: usize,
    pub y: usize,
    pub size: usize,
    status: CellStatus,
    neighbors: SmallVec<[CellId; N_SMALLVEC_SIZE]>,
}

impl Cell {
    fn new(row: usize, col: usize, size: usize) -> Cell {
        Cell {
            row,
            col,
            x: row * size,
            y: col * size,
            size,
            status: CellStatus::Empty,
            neighbors: SmallVec::new(),
        }
    }
    pub fn status(&self) -> CellStatus {
        self.status
    }
    pub fn is_barrier(&self) -> bool {
        self.status == CellStatus::Barrier
    }
    /// Neighbours as of the last [PathingGrid::refresh_neighbors].
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
    pub fn point(&self) -> Point {
        Point::new(self.row as i32, self.col as i32)
    }
}

/// [PathingGrid] is a square arena of [Cell]s together with the authored start and end and a
/// [UnionFind] of connected components. Neighbour lists and components are only rebuilt by
/// [refresh_neighbors](Self::refresh_neighbors); barrier edits in between mark them stale.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    width: usize,
    gap: usize,
    cells: Vec<Cell>,
    start: Option<CellId>,
    end: Option<CellId>,
    pub components: UnionFind<usize>,
    pub neighbors_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::build(DEFAULT_ROWS, DEFAULT_WIDTH)
    }
}

impl PathingGrid {
    /// Creates a `rows × rows` grid of empty cells spread over `width` pixels.
    pub fn new(rows: usize, width: usize) -> Result<PathingGrid> {
        if rows == 0 || width / rows == 0 {
            return Err(PathfindingError::InvalidDimensions { rows, width });
        }
        Ok(PathingGrid::build(rows, width))
    }

    fn build(rows: usize, width: usize) -> PathingGrid {
        let gap = width / rows;
        let cells = (0..rows)
            .cartesian_product(0..rows)
            .map(|(row, col)| Cell::new(row, col, gap))
            .collect::<Vec<_>>();
        debug!("Built {rows}x{rows} grid with {gap}px cells");
        PathingGrid {
            rows,
            width,
            gap,
            cells,
            start: None,
            end: None,
            components: UnionFind::new(rows * rows),
            neighbors_dirty: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn width(&self) -> usize {
        self.width
    }
    /// Pixel size of one cell.
    pub fn gap(&self) -> usize {
        self.gap
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }
    pub fn id(&self, row: usize, col: usize) -> Option<CellId> {
        (row < self.rows && col < self.rows).then(|| row * self.rows + col)
    }
    pub fn position(&self, id: CellId) -> Option<(usize, usize)> {
        self.cell(id).map(|c| (c.row, c.col))
    }
    pub fn start(&self) -> Option<CellId> {
        self.start
    }
    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    pub(crate) fn check(&self, id: CellId) -> Result<()> {
        if id < self.cells.len() {
            Ok(())
        } else {
            Err(PathfindingError::OutOfBounds(id))
        }
    }

    /// Overwrites the status of a cell. Start/end uniqueness is not enforced here; use the
    /// authoring methods for that.
    pub fn set_status(&mut self, id: CellId, status: CellStatus) -> Result<()> {
        self.check(id)?;
        self.write_status(id, status);
        Ok(())
    }

    pub(crate) fn write_status(&mut self, id: CellId, status: CellStatus) {
        let cell = &mut self.cells[id];
        if (cell.status == CellStatus::Barrier) != (status == CellStatus::Barrier) {
            self.neighbors_dirty = true;
        }
        cell.status = status;
    }

    /// Marks a search annotation on anything but endpoints and barriers.
    pub(crate) fn annotate(&mut self, id: CellId, status: CellStatus) {
        let current = self.cells[id].status;
        if !current.is_endpoint() && current != CellStatus::Barrier {
            self.cells[id].status = status;
        }
    }

    /// Recomputes every neighbour list as the in-bounds, non-barrier cells below, above, right
    /// and left of the cell (in that order), then regenerates the components.
    pub fn refresh_neighbors(&mut self) {
        let rows = self.rows;
        for id in 0..self.cells.len() {
            let (row, col) = (self.cells[id].row, self.cells[id].col);
            let mut neighbors: SmallVec<[CellId; N_SMALLVEC_SIZE]> = SmallVec::new();
            if row + 1 < rows {
                neighbors.push(id + rows);
            }
            if row > 0 {
                neighbors.push(id - rows);
            }
            if col + 1 < rows {
                neighbors.push(id + 1);
            }
            if col > 0 {
                neighbors.push(id - 1);
            }
            neighbors.retain(|n| !self.cells[*n].is_barrier());
            self.cells[id].neighbors = neighbors;
        }
        self.generate_components();
        self.neighbors_dirty = false;
    }

    /// Generates a new [UnionFind] structure linking every non-barrier cell to its neighbours.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        for cell in self.cells.iter().filter(|c| !c.is_barrier()) {
            let ix = cell.row * self.rows + cell.col;
            for &n in cell.neighbors.iter() {
                self.components.union(ix, n);
            }
        }
    }

    /// Checks if `a` and `b` are known to lie on different components. Stale components never
    /// report unreachability.
    pub fn unreachable(&self, a: CellId, b: CellId) -> bool {
        !self.neighbors_dirty
            && a < self.cells.len()
            && b < self.cells.len()
            && !self.components.equiv(a, b)
    }

    /// Turns every open, closed and path cell back into an empty one.
    pub fn reset_transient(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.status.is_transient()) {
            cell.status = CellStatus::Empty;
        }
    }

    /// Moves the start to `id`, emptying the previous start.
    pub fn set_start(&mut self, id: CellId) -> Result<()> {
        self.check(id)?;
        if let Some(old) = self.start.take() {
            self.write_status(old, CellStatus::Empty);
        }
        if self.end == Some(id) {
            self.end = None;
        }
        self.write_status(id, CellStatus::Start);
        self.start = Some(id);
        Ok(())
    }

    /// Moves the end to `id`, emptying the previous end.
    pub fn set_end(&mut self, id: CellId) -> Result<()> {
        self.check(id)?;
        self.move_end(id);
        Ok(())
    }

    pub(crate) fn move_end(&mut self, id: CellId) {
        if let Some(old) = self.end.take() {
            self.write_status(old, CellStatus::Empty);
        }
        if self.start == Some(id) {
            self.start = None;
        }
        self.write_status(id, CellStatus::End);
        self.end = Some(id);
    }

    /// Turns `id` into a barrier. Endpoints are left alone and `false` is returned.
    pub fn set_barrier(&mut self, id: CellId) -> Result<bool> {
        self.check(id)?;
        if self.start == Some(id) || self.end == Some(id) {
            return Ok(false);
        }
        self.write_status(id, CellStatus::Barrier);
        Ok(true)
    }

    /// Empties a cell, forgetting it as start or end.
    pub fn clear_cell(&mut self, id: CellId) -> Result<()> {
        self.check(id)?;
        if self.start == Some(id) {
            self.start = None;
        }
        if self.end == Some(id) {
            self.end = None;
        }
        self.write_status(id, CellStatus::Empty);
        Ok(())
    }

    /// Primary edit action: the first placement sets the start, the next one (on another cell)
    /// the end, and every later one a barrier. Returns the status given to the cell, if any.
    pub fn place(&mut self, id: CellId) -> Result<Option<CellStatus>> {
        self.check(id)?;
        let placed = if self.start.is_none() && self.end != Some(id) {
            self.set_start(id)?;
            Some(CellStatus::Start)
        } else if self.end.is_none() && self.start != Some(id) {
            self.set_end(id)?;
            Some(CellStatus::End)
        } else if self.set_barrier(id)? {
            Some(CellStatus::Barrier)
        } else {
            None
        };
        Ok(placed)
    }

    /// Secondary edit action, see [clear_cell](Self::clear_cell).
    pub fn erase(&mut self, id: CellId) -> Result<()> {
        self.clear_cell(id)
    }

    /// Rebuilds the grid at the same dimensions, dropping all authoring.
    pub fn clear(&mut self) {
        info!("Clearing {}x{} grid", self.rows, self.rows);
        *self = PathingGrid::build(self.rows, self.width);
    }

    /// Maps a pixel position to the cell under it.
    pub fn cell_at_pixel(&self, px: usize, py: usize) -> Option<CellId> {
        self.id(px / self.gap, py / self.gap)
    }
}

impl Index<CellId> for PathingGrid {
    type Output = Cell;
    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows) {
            writeln!(f, "{}", row.iter().map(|c| glyph(c.status)).join(""))?;
        }
        Ok(())
    }
}
