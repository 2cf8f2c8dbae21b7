//! Error types shared by generation, traversal, and grid validation.

use thiserror::Error;

use crate::CellCoord;

/// Failures raised while building or reading a maze grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The requested dimensions cannot host a carved maze.
    #[error("maze dimensions {width}x{height} are invalid: both must be odd and at least 3")]
    InvalidDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// A coordinate fell outside the grid extents.
    #[error("cell {coord} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Offending coordinate.
        coord: CellCoord,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// A traversal was asked to start from a wall.
    #[error("traversal cannot start from wall cell {coord}")]
    BlockedStart {
        /// Wall cell supplied as the starting point.
        coord: CellCoord,
    },
    /// The grid contained no cells.
    #[error("grid contains no cells")]
    EmptyGrid,
    /// A hand-authored grid had rows of differing lengths.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Index of the first row whose length differed.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The flat cell buffer did not match the declared dimensions.
    #[error("grid holds {found} cells, expected {expected}")]
    CellCountMismatch {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
    /// The grid has no start cell.
    #[error("grid has no start cell")]
    MissingStart,
    /// The grid has more than one start cell.
    #[error("grid has more than one start cell")]
    MultipleStarts,
    /// The grid has no end cell.
    #[error("grid has no end cell")]
    MissingEnd,
    /// The grid has more than one end cell.
    #[error("grid has more than one end cell")]
    MultipleEnds,
    /// A structural grid contained a presentation-only visited cell.
    #[error("grid cell {coord} is marked visited; grids only hold structural kinds")]
    VisitedInGrid {
        /// Location of the visited cell.
        coord: CellCoord,
    },
}

/// Raised when a string does not name a supported search algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown search algorithm '{0}' (expected 'bfs' or 'dfs')")]
pub struct ParseAlgorithmError(String);

impl ParseAlgorithmError {
    pub(crate) fn new(value: &str) -> Self {
        Self(value.to_owned())
    }
}
