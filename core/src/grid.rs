//! Structural maze grid and its presentation snapshot.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, CellKind, Direction, MazeError};

/// Immutable, validated maze layout stored in row-major order.
///
/// A grid holds exactly one [`CellKind::Start`] and one [`CellKind::End`] and
/// never stores [`CellKind::Visited`]; exploration state lives in traversal
/// overlays and [`MazeSnapshot`] values instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRows", into = "GridRows")]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<CellKind>,
    start: CellCoord,
    end: CellCoord,
}

impl Grid {
    /// Builds a grid from a row-major cell buffer.
    pub fn from_cells(rows: u32, columns: u32, cells: Vec<CellKind>) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::EmptyGrid);
        }

        let expected = cell_count(rows, columns).ok_or(MazeError::InvalidDimensions {
            width: columns,
            height: rows,
        })?;
        if cells.len() != expected {
            return Err(MazeError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }

        let mut start = None;
        let mut end = None;
        for (coord, kind) in coords(rows, columns).zip(cells.iter()) {
            match kind {
                CellKind::Start => {
                    if start.replace(coord).is_some() {
                        return Err(MazeError::MultipleStarts);
                    }
                }
                CellKind::End => {
                    if end.replace(coord).is_some() {
                        return Err(MazeError::MultipleEnds);
                    }
                }
                CellKind::Visited => return Err(MazeError::VisitedInGrid { coord }),
                CellKind::Wall | CellKind::Path => {}
            }
        }

        Ok(Self {
            rows,
            columns,
            cells,
            start: start.ok_or(MazeError::MissingStart)?,
            end: end.ok_or(MazeError::MissingEnd)?,
        })
    }

    /// Builds a grid from hand-authored rows, top row first.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, MazeError> {
        let expected = rows.first().ok_or(MazeError::EmptyGrid)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, length)| *length != expected)
        {
            return Err(MazeError::RaggedRows {
                row,
                expected,
                found,
            });
        }

        let invalid = MazeError::InvalidDimensions {
            width: u32::try_from(expected).unwrap_or(u32::MAX),
            height: u32::try_from(rows.len()).unwrap_or(u32::MAX),
        };
        let height = u32::try_from(rows.len()).map_err(|_| invalid.clone())?;
        let width = u32::try_from(expected).map_err(|_| invalid)?;

        Self::from_cells(height, width, rows.into_iter().flatten().collect())
    }

    /// Number of rows, which is the maze height.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns, which is the maze width.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Cell the traversal starts from.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell the traversal attempts to reach.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        self.end
    }

    /// Row-major cell buffer.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.columns
    }

    /// Offset of the coordinate inside the row-major buffer.
    #[must_use]
    pub fn index(&self, coord: CellCoord) -> Option<usize> {
        index(self.rows, self.columns, coord)
    }

    /// Kind stored at the coordinate, or `None` outside the grid.
    #[must_use]
    pub fn kind(&self, coord: CellCoord) -> Option<CellKind> {
        self.index(coord)
            .and_then(|offset| self.cells.get(offset).copied())
    }

    /// Reports whether the coordinate is inside the grid and passable.
    #[must_use]
    pub fn is_open(&self, coord: CellCoord) -> bool {
        self.kind(coord).map_or(false, CellKind::is_open)
    }

    /// Adjacent coordinate in `direction`, or `None` at the grid edge.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        coord.offset(direction, 1, self.rows, self.columns)
    }

    /// Number of passable cells, including the start and end.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|kind| kind.is_open()).count()
    }

    /// Iterator over the rows of the grid, top row first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(row_width(self.columns))
    }

    /// Copies the grid into nested rows, top row first.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<CellKind>> {
        self.iter_rows().map(<[CellKind]>::to_vec).collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct GridRows {
    rows: Vec<Vec<CellKind>>,
}

impl TryFrom<GridRows> for Grid {
    type Error = MazeError;

    fn try_from(raw: GridRows) -> Result<Self, Self::Error> {
        Self::from_rows(raw.rows)
    }
}

impl From<Grid> for GridRows {
    fn from(grid: Grid) -> Self {
        Self {
            rows: grid.to_rows(),
        }
    }
}

/// Read-only presentation snapshot of a maze, including visited cells.
///
/// Snapshots are plain copies. Callers keep them current by folding the
/// per-step deltas reported by the traversal instead of re-reading the world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    rows: u32,
    columns: u32,
    cells: Vec<CellKind>,
}

impl MazeSnapshot {
    /// Captures the structural kinds of a grid with no visited cells.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            cells: grid.cells().to_vec(),
        }
    }

    /// Captures a grid with every visited path cell shown as [`CellKind::Visited`].
    #[must_use]
    pub fn with_overlay<F>(grid: &Grid, mut is_visited: F) -> Self
    where
        F: FnMut(CellCoord) -> bool,
    {
        let mut snapshot = Self::from_grid(grid);
        for (coord, kind) in coords(grid.rows(), grid.columns()).zip(snapshot.cells.iter_mut()) {
            if *kind == CellKind::Path && is_visited(coord) {
                *kind = CellKind::Visited;
            }
        }
        snapshot
    }

    /// Applies a traversal delta, returning how many cells changed.
    ///
    /// Only path cells become visited. Walls, the start, the end, and cells
    /// that are already visited keep their kind, and coordinates outside the
    /// snapshot are ignored.
    pub fn fold_visited(&mut self, visited: &[CellCoord]) -> usize {
        let mut changed = 0;
        for &coord in visited {
            let Some(offset) = index(self.rows, self.columns, coord) else {
                continue;
            };
            if let Some(kind) = self.cells.get_mut(offset) {
                if *kind == CellKind::Path {
                    *kind = CellKind::Visited;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Number of rows in the snapshot.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the snapshot.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Row-major cell buffer.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Kind presented at the coordinate, or `None` outside the snapshot.
    #[must_use]
    pub fn kind(&self, coord: CellCoord) -> Option<CellKind> {
        index(self.rows, self.columns, coord)
            .and_then(|offset| self.cells.get(offset).copied())
    }

    /// Number of cells presented with the provided kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }

    /// Iterator over the rows of the snapshot, top row first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(row_width(self.columns))
    }
}

fn coords(rows: u32, columns: u32) -> impl Iterator<Item = CellCoord> {
    (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
}

fn cell_count(rows: u32, columns: u32) -> Option<usize> {
    let rows = usize::try_from(rows).ok()?;
    let columns = usize::try_from(columns).ok()?;
    rows.checked_mul(columns)
}

fn row_width(columns: u32) -> usize {
    usize::try_from(columns).unwrap_or(usize::MAX).max(1)
}

fn index(rows: u32, columns: u32, coord: CellCoord) -> Option<usize> {
    if coord.row() >= rows || coord.column() >= columns {
        return None;
    }

    let row = usize::try_from(coord.row()).ok()?;
    let column = usize::try_from(coord.column()).ok()?;
    let width = usize::try_from(columns).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
