#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the path-finding visualizer.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session world, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! and presentation layers to react to deterministically.
//!
//! All grid coordinates are expressed as `(row, column)` pairs. Rows index the
//! height axis and columns index the width axis; every bounds check compares a
//! coordinate against its matching dimension.

mod error;
mod grid;

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

pub use error::{MazeError, ParseAlgorithmError};
pub use grid::{Grid, MazeSnapshot};

/// Step interval applied when no explicit configuration has been provided.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(300);

/// Search algorithm selected when no explicit choice has been made.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Bfs;

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the session's maze with a freshly generated grid.
    ///
    /// Any solve in flight is cancelled before the grid is swapped.
    InstallMaze {
        /// Validated grid that becomes the session's maze.
        grid: Grid,
    },
    /// Selects the search algorithm used by the next solve.
    SelectAlgorithm {
        /// Algorithm that should drive the next traversal.
        algorithm: Algorithm,
    },
    /// Updates the delay between successive traversal steps.
    ConfigureStepInterval {
        /// Simulated time that must elapse before the next step is scheduled to fire.
        interval: Duration,
    },
    /// Starts solving the installed maze with the selected algorithm.
    StartSolve,
    /// Cancels any solve in flight and clears the visited overlay.
    ResetSession,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests a single traversal step on behalf of a scheduled solve.
    AdvanceTraversal {
        /// Ticket identifying the solve the step was scheduled for.
        ticket: SolveTicket,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a new maze replaced the previous one.
    MazeInstalled {
        /// Number of rows (height) of the installed grid.
        rows: u32,
        /// Number of columns (width) of the installed grid.
        columns: u32,
        /// Cell the traversal starts from.
        start: CellCoord,
        /// Cell the traversal attempts to reach.
        end: CellCoord,
    },
    /// Confirms that the session switched search algorithms.
    AlgorithmSelected {
        /// Algorithm that will drive the next solve.
        algorithm: Algorithm,
    },
    /// Confirms that the step interval changed.
    StepIntervalConfigured {
        /// Interval applied to every step scheduled from now on.
        interval: Duration,
    },
    /// Announces that a solve began.
    SolveStarted {
        /// Ticket allocated to the solve.
        ticket: SolveTicket,
        /// Algorithm driving the traversal.
        algorithm: Algorithm,
        /// Step interval in effect when the solve began.
        interval: Duration,
    },
    /// Announces that an unfinished solve was abandoned.
    SolveCancelled {
        /// Ticket of the solve that will no longer accept steps.
        ticket: SolveTicket,
    },
    /// Confirms that the session returned to its idle state.
    SessionReset,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports a traversal step that neither reached the end nor exhausted the frontier.
    TraversalAdvanced {
        /// Ticket of the solve that advanced.
        ticket: SolveTicket,
        /// Cells that transitioned to the visited presentation state during the step.
        visited: Vec<CellCoord>,
    },
    /// Reports that a traversal reached a terminal state.
    TraversalFinished {
        /// Ticket of the solve that finished.
        ticket: SolveTicket,
        /// Terminal result of the traversal.
        outcome: TraversalOutcome,
        /// Cells that transitioned to the visited presentation state during the final step.
        visited: Vec<CellCoord>,
    },
    /// Reports that a step arrived for a solve that is no longer active.
    StaleStepIgnored {
        /// Ticket carried by the discarded step request.
        ticket: SolveTicket,
    },
    /// Reports that a command was refused without mutating the session.
    CommandRejected {
        /// Specific reason the command was refused.
        reason: RejectionReason,
    },
}

/// Graph search strategies available to the traversal engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Breadth-first search backed by a FIFO frontier.
    Bfs,
    /// Depth-first search backed by a LIFO frontier.
    Dfs,
}

impl Algorithm {
    /// Short lowercase identifier used by adapters and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }

    /// Human readable name of the algorithm.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bfs => "Breadth-first Search",
            Self::Dfs => "Depth-first Search",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            _ => Err(ParseAlgorithmError::new(value)),
        }
    }
}

/// Unique identifier allocated to every solve started by the world.
///
/// Scheduled steps carry the ticket of the solve they belong to so that a
/// step outliving its solve can be recognised and discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolveTicket(u64);

impl SolveTicket {
    /// Creates a new ticket with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the ticket.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Cardinal directions connecting neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Canonical direction order, shuffled by maze generation before each carve.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Fixed neighbour order used by traversals: right, down, left, up.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Moves `distance` cells in `direction`, staying inside a `rows` by `columns` grid.
    ///
    /// Returns `None` when the arithmetic would underflow, overflow, or leave
    /// the grid. Rows are checked against `rows` and columns against
    /// `columns`; the result is never clamped.
    #[must_use]
    pub fn offset(
        self,
        direction: Direction,
        distance: u32,
        rows: u32,
        columns: u32,
    ) -> Option<Self> {
        let (row, column) = match direction {
            Direction::North => (self.row.checked_sub(distance)?, self.column),
            Direction::East => (self.row, self.column.checked_add(distance)?),
            Direction::South => (self.row.checked_add(distance)?, self.column),
            Direction::West => (self.row, self.column.checked_sub(distance)?),
        };

        if row < rows && column < columns {
            Some(Self::new(row, column))
        } else {
            None
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Closed set of states a maze cell can be presented in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable cell.
    Wall,
    /// Open cell that has not been explored.
    Path,
    /// Cell the traversal starts from.
    Start,
    /// Cell the traversal attempts to reach.
    End,
    /// Open cell explored by the traversal. Never stored inside a [`Grid`].
    Visited,
}

impl CellKind {
    /// Reports whether a traversal may pass through the cell.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Terminal result of a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOutcome {
    /// The traversal reached the end cell.
    Solved {
        /// End cell that terminated the traversal.
        end: CellCoord,
    },
    /// The frontier emptied before the end cell was found.
    Exhausted,
}

/// Lifecycle of the session's current solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// No solve has been started for the installed maze.
    Idle,
    /// A traversal is advancing step by step.
    Solving,
    /// The traversal reached the end cell.
    Solved,
    /// The traversal ran out of cells to explore.
    Exhausted,
}

impl SolveStatus {
    /// Reports whether the solve reached a terminal state.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Solved | Self::Exhausted)
    }
}

/// Controls an adapter may offer for the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlAvailability {
    /// Whether the step interval may be adjusted from the UI.
    pub speed: bool,
    /// Whether another search algorithm may be selected.
    pub algorithm: bool,
    /// Whether a solve may be started.
    pub execute: bool,
    /// Whether the session may be reset with a freshly generated maze.
    pub reset: bool,
}

impl ControlAvailability {
    /// Derives the control availability for the provided session state.
    #[must_use]
    pub const fn for_status(status: SolveStatus, has_maze: bool) -> Self {
        let solving = matches!(status, SolveStatus::Solving);
        Self {
            speed: !solving,
            algorithm: !solving,
            execute: has_maze && matches!(status, SolveStatus::Idle),
            reset: status.is_finished(),
        }
    }
}

/// Reasons a command may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// No maze has been installed yet.
    NoMaze,
    /// The command is not permitted while a solve is advancing.
    SolveInProgress,
    /// The previous solve finished; the session must be reset first.
    ResetRequired,
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, CellCoord, ControlAvailability, Direction, SolveStatus};

    #[test]
    fn offset_rejects_cells_beyond_matching_dimension() {
        let origin = CellCoord::new(1, 3);

        assert_eq!(origin.offset(Direction::East, 1, 2, 5), Some(CellCoord::new(1, 4)));
        assert_eq!(origin.offset(Direction::East, 2, 2, 5), None);
        assert_eq!(origin.offset(Direction::South, 1, 2, 5), None);
        assert_eq!(origin.offset(Direction::North, 2, 2, 5), None);
        assert_eq!(origin.offset(Direction::West, 3, 2, 5), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn offset_never_wraps_at_numeric_limits() {
        let corner = CellCoord::new(u32::MAX, u32::MAX);

        assert_eq!(corner.offset(Direction::South, 1, u32::MAX, u32::MAX), None);
        assert_eq!(corner.offset(Direction::East, 1, u32::MAX, u32::MAX), None);
        assert_eq!(CellCoord::new(0, 0).offset(Direction::West, 1, 3, 3), None);
    }

    #[test]
    fn search_order_is_right_down_left_up() {
        assert_eq!(
            Direction::SEARCH_ORDER,
            [
                Direction::East,
                Direction::South,
                Direction::West,
                Direction::North
            ]
        );
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!(" dfs ".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        let error = "astar".parse::<Algorithm>().expect_err("unknown algorithm");
        assert!(error.to_string().contains("astar"));
        assert_eq!(Algorithm::Dfs.to_string(), "dfs");
    }

    #[test]
    fn controls_follow_solve_lifecycle() {
        let idle = ControlAvailability::for_status(SolveStatus::Idle, true);
        assert!(idle.execute && idle.speed && idle.algorithm && !idle.reset);

        let solving = ControlAvailability::for_status(SolveStatus::Solving, true);
        assert!(!solving.execute && !solving.speed && !solving.algorithm && !solving.reset);

        let solved = ControlAvailability::for_status(SolveStatus::Solved, true);
        assert!(!solved.execute && solved.reset && solved.speed);

        let empty = ControlAvailability::for_status(SolveStatus::Idle, false);
        assert!(!empty.execute);
    }
}
