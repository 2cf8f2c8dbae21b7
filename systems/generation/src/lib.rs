#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Recursive-backtracker maze generation.
//!
//! The generator carves a perfect maze (exactly one simple path between any
//! two open cells) into a grid of walls. Randomness is injected through the
//! [`ShuffleSource`] trait so callers decide whether a maze is reproducible.

use log::debug;
use pathviz_core::{CellCoord, CellKind, Direction, Grid, MazeError};
use rand::{seq::SliceRandom, RngCore};

/// Cell the carve starts from.
const CARVE_ORIGIN: CellCoord = CellCoord::new(1, 1);

/// Supplies the direction orderings that drive the carve.
pub trait ShuffleSource {
    /// Reorders `directions` in place before a cell's neighbours are tried.
    fn shuffle_directions(&mut self, directions: &mut [Direction; 4]);
}

impl<R> ShuffleSource for R
where
    R: RngCore + ?Sized,
{
    fn shuffle_directions(&mut self, directions: &mut [Direction; 4]) {
        directions.as_mut_slice().shuffle(self);
    }
}

/// Generates a `width` by `height` perfect maze.
///
/// Both dimensions must be odd and at least 3. The start cell is placed on the
/// left border at `(1, 0)` and the end cell on the right border at
/// `(height - 2, width - 1)`.
pub fn generate_maze<S>(width: u32, height: u32, source: &mut S) -> Result<Grid, MazeError>
where
    S: ShuffleSource + ?Sized,
{
    let mut canvas = Canvas::new(width, height)?;
    canvas.carve(source);

    let start = CellCoord::new(1, 0);
    let end = CellCoord::new(height - 2, width - 1);
    canvas.set(start, CellKind::Start);
    canvas.set(end, CellKind::End);

    let grid = Grid::from_cells(height, width, canvas.cells)?;
    debug!(
        "generated {width}x{height} maze with {} open cells",
        grid.open_cell_count()
    );
    Ok(grid)
}

/// Maze generator that owns its shuffle source across generations.
#[derive(Debug)]
pub struct MazeGenerator<S> {
    source: S,
}

impl<S> MazeGenerator<S>
where
    S: ShuffleSource,
{
    /// Creates a generator drawing its direction orderings from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Generates the next maze, advancing the shuffle source.
    pub fn generate(&mut self, width: u32, height: u32) -> Result<Grid, MazeError> {
        generate_maze(width, height, &mut self.source)
    }

    /// Mutable access to the underlying shuffle source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the generator and returns its shuffle source.
    pub fn into_source(self) -> S {
        self.source
    }
}

#[derive(Debug)]
struct Canvas {
    rows: u32,
    columns: u32,
    cells: Vec<CellKind>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimensions { width, height };
        if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
            return Err(invalid);
        }

        let count = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(width, height)| width.checked_mul(height))
            .ok_or(invalid)?;

        Ok(Self {
            rows: height,
            columns: width,
            cells: vec![CellKind::Wall; count],
        })
    }

    fn carve<S>(&mut self, source: &mut S)
    where
        S: ShuffleSource + ?Sized,
    {
        let mut stack = vec![self.enter(CARVE_ORIGIN, source)];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.cursor) else {
                let _ = stack.pop();
                continue;
            };
            frame.cursor += 1;
            let cell = frame.cell;

            let Some(target) = cell.offset(direction, 2, self.rows, self.columns) else {
                continue;
            };
            if self.kind(target) != Some(CellKind::Wall) {
                continue;
            }
            if let Some(passage) = cell.offset(direction, 1, self.rows, self.columns) {
                self.set(passage, CellKind::Path);
            }
            stack.push(self.enter(target, source));
        }
    }

    fn enter<S>(&mut self, cell: CellCoord, source: &mut S) -> Frame
    where
        S: ShuffleSource + ?Sized,
    {
        self.set(cell, CellKind::Path);
        let mut directions = Direction::ALL;
        source.shuffle_directions(&mut directions);
        Frame {
            cell,
            directions,
            cursor: 0,
        }
    }

    fn kind(&self, coord: CellCoord) -> Option<CellKind> {
        self.index(coord).and_then(|index| self.cells.get(index).copied())
    }

    fn set(&mut self, coord: CellCoord, kind: CellKind) {
        if let Some(cell) = self.index(coord).and_then(|index| self.cells.get_mut(index)) {
            *cell = kind;
        }
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.row() >= self.rows || coord.column() >= self.columns {
            return None;
        }

        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Pending work for one carved cell: the remaining directions to try.
#[derive(Debug)]
struct Frame {
    cell: CellCoord,
    directions: [Direction; 4],
    cursor: usize,
}
