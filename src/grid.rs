//! Character grid with visited-flag flood traversal.
//!
//! The grid owns a tile matrix and a parallel visited-flag matrix. Backing
//! storage is allocated once at capacity and never reallocated; [`Grid::set`]
//! only moves the logical bounds. A traversal pass is: [`Grid::refresh`],
//! then drive [`Grid::walk`] / [`Grid::conn_area`] / [`Grid::next`] until the
//! sentinel comes back.

use std::fmt;
use std::io::{self, Read, Write};

use rustc_hash::FxHashMap;

use crate::cell::Cell;
use crate::span::Span;

/// Default backing capacity along each axis.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug)]
/// Structured errors for grid contract violations and input failures.
pub enum GridError {
    /// A coordinate outside the logical bounds was dereferenced.
    InvalidCoordinate {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// Requested logical bounds exceed the backing capacity.
    CapacityExceeded {
        width: usize,
        height: usize,
        cap_width: usize,
        cap_height: usize,
    },
    /// The input source ran dry before every cell was filled.
    TruncatedInput { expected: usize, read: usize },
    /// Read failure from the input source.
    Io { error: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidCoordinate {
                x,
                y,
                width,
                height,
            } => write!(f, "invalid coordinate ({x},{y}) for a {width}x{height} grid"),
            GridError::CapacityExceeded {
                width,
                height,
                cap_width,
                cap_height,
            } => write!(
                f,
                "requested bounds {width}x{height} exceed backing capacity {cap_width}x{cap_height}"
            ),
            GridError::TruncatedInput { expected, read } => {
                write!(f, "grid input ended after {read} of {expected} cells")
            }
            GridError::Io { error } => write!(f, "grid input failed: {error}"),
        }
    }
}

impl std::error::Error for GridError {}

/// An owned character matrix with per-cell visited flags.
///
/// Tiles are addressed with the capacity stride, so shrinking or widening the
/// logical bounds via [`Grid::set`] never moves existing contents. Visited
/// flags are addressed `y * width + x` with the logical width.
#[derive(Debug, Clone)]
pub struct Grid {
    tiles: Vec<char>,
    done: Vec<bool>,
    width: usize,
    height: usize,
    cap_width: usize,
    cap_height: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// A grid with the default [`DEFAULT_CAPACITY`]² backing storage.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, DEFAULT_CAPACITY)
    }

    /// A grid whose backing storage holds `cap_width * cap_height` cells.
    ///
    /// Logical bounds start at full capacity; shrink them with [`Grid::set`].
    pub fn with_capacity(cap_width: usize, cap_height: usize) -> Self {
        Self {
            tiles: vec![' '; cap_width * cap_height],
            done: vec![false; cap_width * cap_height],
            width: cap_width,
            height: cap_height,
            cap_width,
            cap_height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set the logical width and height used by all subsequent bounds checks.
    ///
    /// Tile contents and visited flags are left untouched.
    pub fn set(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        if width > self.cap_width || height > self.cap_height {
            return Err(GridError::CapacityExceeded {
                width,
                height,
                cap_width: self.cap_width,
                cap_height: self.cap_height,
            });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Whether `cell` lies within the logical bounds.
    #[inline]
    pub fn valid(&self, cell: Cell) -> bool {
        cell.x >= 0
            && (cell.x as usize) < self.width
            && cell.y >= 0
            && (cell.y as usize) < self.height
    }

    // Tile index: capacity stride, stable across `set`.
    #[inline]
    fn tile_idx(&self, cell: Cell) -> usize {
        debug_assert!(self.valid(cell));
        cell.y as usize * self.cap_width + cell.x as usize
    }

    // Visited-flag index: logical stride `y * width + x`.
    #[inline]
    fn done_idx(&self, cell: Cell) -> usize {
        debug_assert!(self.valid(cell));
        cell.y as usize * self.width + cell.x as usize
    }

    fn invalid_coordinate(&self, cell: Cell) -> GridError {
        GridError::InvalidCoordinate {
            x: cell.x,
            y: cell.y,
            width: self.width,
            height: self.height,
        }
    }

    /// The tile at `cell`, or `None` off-grid.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<char> {
        if self.valid(cell) {
            Some(self.tiles[self.tile_idx(cell)])
        } else {
            None
        }
    }

    /// The tile at `cell`; an off-grid cell is a contract violation and
    /// fails with [`GridError::InvalidCoordinate`] instead of reading out of
    /// bounds.
    pub fn tile(&self, cell: Cell) -> Result<char, GridError> {
        self.get(cell).ok_or_else(|| self.invalid_coordinate(cell))
    }

    /// Mutable access to the tile at `cell`, with the same contract as
    /// [`Grid::tile`].
    pub fn tile_mut(&mut self, cell: Cell) -> Result<&mut char, GridError> {
        if !self.valid(cell) {
            return Err(self.invalid_coordinate(cell));
        }
        let idx = self.tile_idx(cell);
        Ok(&mut self.tiles[idx])
    }

    /// The visited flag at `cell`.
    pub fn done(&self, cell: Cell) -> Result<bool, GridError> {
        if !self.valid(cell) {
            return Err(self.invalid_coordinate(cell));
        }
        Ok(self.done[self.done_idx(cell)])
    }

    /// Mutable access to the visited flag at `cell`.
    pub fn done_mut(&mut self, cell: Cell) -> Result<&mut bool, GridError> {
        if !self.valid(cell) {
            return Err(self.invalid_coordinate(cell));
        }
        let idx = self.done_idx(cell);
        Ok(&mut self.done[idx])
    }

    /// Reset every visited flag for a fresh traversal pass.
    pub fn refresh(&mut self) {
        self.done.fill(false);
    }

    /// Fill the logical grid row-major from `reader`, one byte per cell,
    /// skipping ASCII whitespace between cells.
    pub fn init<R: Read>(&mut self, reader: R) -> Result<(), GridError> {
        let expected = self.width * self.height;
        let mut read = 0usize;
        let mut bytes = reader.bytes();
        for y in Span::upto(self.height) {
            for x in Span::upto(self.width) {
                let c = loop {
                    match bytes.next() {
                        Some(Ok(b)) if b.is_ascii_whitespace() => continue,
                        Some(Ok(b)) => break b as char,
                        Some(Err(e)) => {
                            return Err(GridError::Io {
                                error: e.to_string(),
                            })
                        }
                        None => return Err(GridError::TruncatedInput { expected, read }),
                    }
                };
                let idx = self.tile_idx(Cell::new(x as i32, y as i32));
                self.tiles[idx] = c;
                read += 1;
            }
        }
        Ok(())
    }

    /// Write the logical grid, one line per row, reproducing exactly the
    /// layout consumed by [`Grid::init`].
    pub fn output<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut line = String::with_capacity(self.width + 1);
        for y in Span::upto(self.height) {
            line.clear();
            for x in Span::upto(self.width) {
                line.push(self.tiles[self.tile_idx(Cell::new(x as i32, y as i32))]);
            }
            line.push('\n');
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// Human-oriented view: a dashed top border ending in the width, each row
    /// framed on the left, then the height. Not a parseable format.
    pub fn render_debug(&self) -> String {
        let mut out = String::new();
        out.push('┌');
        for _ in Span::upto(self.width) {
            out.push('─');
        }
        out.push_str(&self.width.to_string());
        out.push('\n');
        for y in Span::upto(self.height) {
            out.push('│');
            for x in Span::upto(self.width) {
                out.push(self.tiles[self.tile_idx(Cell::new(x as i32, y as i32))]);
            }
            out.push('\n');
        }
        out.push_str(&self.height.to_string());
        out.push('\n');
        out
    }

    /// Pretty-print [`Grid::render_debug`] to stderr.
    pub fn debug(&self) {
        eprint!("{}", self.render_debug());
    }

    /// Orthogonal neighbors of `cell` in the fixed order `+y, +x, -x, -y`,
    /// keeping only the valid ones. Edge cells simply have fewer neighbors.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut res = Vec::with_capacity(4);
        for c in [cell.dy(1), cell.dx(1), cell.dx(-1), cell.dy(-1)] {
            if self.valid(c) {
                res.push(c);
            }
        }
        res
    }

    /// Depth-first flood traversal from `start`.
    ///
    /// Invalid and already-visited cells are skipped. A cell rejected by
    /// `cond` is skipped *without* being marked, so it stays reachable from
    /// another branch; `cond` must therefore be stable over a single
    /// traversal pass. Accepted cells are marked visited, their neighbors are
    /// explored in the fixed `+y, +x, -x, -y` order, and `then` fires
    /// post-order: every descendant completes before its ancestor's callback.
    ///
    /// The traversal keeps an explicit stack, so its depth is bounded by the
    /// heap rather than the call stack.
    pub fn walk<C, F>(&mut self, start: Cell, mut cond: C, mut then: F)
    where
        C: FnMut(&Grid, Cell) -> bool,
        F: FnMut(&Grid, Cell),
    {
        enum Frame {
            Enter(Cell),
            Emit(Cell),
        }

        let mut stack = vec![Frame::Enter(start)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(cell) => {
                    if !self.valid(cell) {
                        continue;
                    }
                    let idx = self.done_idx(cell);
                    if self.done[idx] {
                        continue;
                    }
                    if !cond(&*self, cell) {
                        continue;
                    }
                    self.done[idx] = true;
                    stack.push(Frame::Emit(cell));
                    // Reversed push, so the first neighbor is explored first.
                    for c in self.neighbors(cell).into_iter().rev() {
                        stack.push(Frame::Enter(c));
                    }
                }
                Frame::Emit(cell) => then(&*self, cell),
            }
        }
    }

    /// Size of the maximal 4-connected region sharing `start`'s tile.
    ///
    /// Built on [`Grid::walk`], so it needs a [`Grid::refresh`] beforehand
    /// for a full-grid baseline; it does not refresh by itself. An invalid
    /// start has area 0.
    pub fn conn_area(&mut self, start: Cell) -> u64 {
        let Some(target) = self.get(start) else {
            return 0;
        };
        let mut area = 0u64;
        self.walk(
            start,
            move |g, c| g.get(c) == Some(target),
            |_, _| area += 1,
        );
        area
    }

    /// First unvisited cell holding `pattern`, scanning row-major.
    ///
    /// Returns [`Cell::INVALID`] when none is left; not-found is a value, not
    /// an error.
    pub fn next(&self, pattern: char) -> Cell {
        for y in Span::upto(self.height) {
            for x in Span::upto(self.width) {
                let cell = Cell::new(x as i32, y as i32);
                if self.tiles[self.tile_idx(cell)] == pattern && !self.done[self.done_idx(cell)] {
                    return cell;
                }
            }
        }
        Cell::INVALID
    }

    /// How many cells hold `pattern`, visited or not.
    pub fn stat(&self, pattern: char) -> u64 {
        let mut count = 0;
        for y in Span::upto(self.height) {
            for x in Span::upto(self.width) {
                if self.tiles[self.tile_idx(Cell::new(x as i32, y as i32))] == pattern {
                    count += 1;
                }
            }
        }
        count
    }

    /// Flood every component of the grid and record its size under its tile.
    ///
    /// Starts from a fresh [`Grid::refresh`]; components are recorded in
    /// row-major discovery order. Leaves the whole grid marked visited.
    pub fn census(&mut self) -> FxHashMap<char, Vec<u64>> {
        self.refresh();
        let mut sizes: FxHashMap<char, Vec<u64>> = FxHashMap::default();
        for y in Span::upto(self.height) {
            for x in Span::upto(self.width) {
                let cell = Cell::new(x as i32, y as i32);
                if self.done[self.done_idx(cell)] {
                    continue;
                }
                let tile = self.tiles[self.tile_idx(cell)];
                let area = self.conn_area(cell);
                sizes.entry(tile).or_default().push(area);
            }
        }
        sizes
    }
}
