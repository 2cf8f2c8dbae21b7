#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stepwise breadth-first and depth-first maze traversal.
//!
//! A [`Traversal`] expands exactly one frontier cell per [`Traversal::step`]
//! call and reports the cells it discovered, so presentation layers can
//! animate the search without re-reading the whole maze.

use std::collections::VecDeque;

use log::debug;
use pathviz_core::{Algorithm, CellCoord, Direction, Grid, MazeError, MazeSnapshot};

/// Result of a single traversal step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A frontier cell was expanded without reaching the end.
    Progressed {
        /// Cells marked visited during the step, in discovery order.
        newly_visited: Vec<CellCoord>,
    },
    /// The end cell was discovered.
    Solved {
        /// End cell that terminated the traversal.
        end: CellCoord,
        /// Cells marked visited earlier in the same step.
        newly_visited: Vec<CellCoord>,
    },
    /// The frontier was empty, so the end cannot be reached.
    Exhausted,
}

impl StepResult {
    /// Cells that transitioned to the visited state during the step.
    #[must_use]
    pub fn newly_visited(&self) -> &[CellCoord] {
        match self {
            Self::Progressed { newly_visited } | Self::Solved { newly_visited, .. } => {
                newly_visited
            }
            Self::Exhausted => &[],
        }
    }

    /// Reports whether the step left the traversal in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progressed { .. })
    }
}

/// Lifecycle of a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalStatus {
    /// The frontier may still contain unexplored cells.
    Running,
    /// The end cell was reached.
    Solved {
        /// End cell that terminated the traversal.
        end: CellCoord,
    },
    /// The frontier emptied without reaching the end cell.
    Exhausted,
}

/// Incremental search over a maze grid.
///
/// The traversal keeps its own copy of the grid and a dense visited overlay;
/// structural cell kinds are never modified.
#[derive(Clone, Debug)]
pub struct Traversal {
    grid: Grid,
    algorithm: Algorithm,
    visited: Vec<bool>,
    visited_count: usize,
    frontier: VecDeque<CellCoord>,
    status: TraversalStatus,
    steps_taken: u64,
}

impl Traversal {
    /// Creates a traversal that explores `grid` from `start`.
    pub fn new(grid: &Grid, start: CellCoord, algorithm: Algorithm) -> Result<Self, MazeError> {
        if !grid.contains(start) {
            return Err(MazeError::OutOfBounds {
                coord: start,
                rows: grid.rows(),
                columns: grid.columns(),
            });
        }
        if !grid.is_open(start) {
            return Err(MazeError::BlockedStart { coord: start });
        }
        Ok(Self::from_open_cell(grid, start, algorithm))
    }

    /// Creates a traversal that explores `grid` from its start cell.
    ///
    /// Cannot fail: a validated grid always holds its start cell in bounds.
    #[must_use]
    pub fn for_grid(grid: &Grid, algorithm: Algorithm) -> Self {
        Self::from_open_cell(grid, grid.start(), algorithm)
    }

    fn from_open_cell(grid: &Grid, start: CellCoord, algorithm: Algorithm) -> Self {
        let mut traversal = Self {
            grid: grid.clone(),
            algorithm,
            visited: vec![false; grid.cells().len()],
            visited_count: 0,
            frontier: VecDeque::from([start]),
            status: TraversalStatus::Running,
            steps_taken: 0,
        };
        let _ = traversal.mark_visited(start);
        debug!(
            "created {algorithm} traversal from {start} on {}x{} grid",
            grid.columns(),
            grid.rows()
        );
        traversal
    }

    /// Expands one frontier cell.
    ///
    /// Once the traversal has finished, every further call returns the same
    /// terminal result with an empty delta and leaves the state untouched.
    pub fn step(&mut self) -> StepResult {
        match self.status {
            TraversalStatus::Solved { end } => {
                return StepResult::Solved {
                    end,
                    newly_visited: Vec::new(),
                }
            }
            TraversalStatus::Exhausted => return StepResult::Exhausted,
            TraversalStatus::Running => {}
        }

        let next = match self.algorithm {
            Algorithm::Bfs => self.frontier.pop_front(),
            Algorithm::Dfs => self.frontier.pop_back(),
        };
        let Some(cell) = next else {
            self.status = TraversalStatus::Exhausted;
            debug!(
                "{} traversal exhausted after {} steps",
                self.algorithm, self.steps_taken
            );
            return StepResult::Exhausted;
        };
        self.steps_taken += 1;

        let end = self.grid.end();
        if cell == end {
            return self.solve(end, Vec::new());
        }
        if self.algorithm == Algorithm::Dfs {
            let _ = self.mark_visited(cell);
        }

        let mut newly_visited = Vec::new();
        for direction in Direction::SEARCH_ORDER {
            let Some(neighbor) = self.grid.neighbor(cell, direction) else {
                continue;
            };
            if !self.grid.is_open(neighbor) || self.is_visited(neighbor) {
                continue;
            }
            if neighbor == end {
                return self.solve(end, newly_visited);
            }
            if self.mark_visited(neighbor) {
                newly_visited.push(neighbor);
                self.frontier.push_back(neighbor);
            }
        }

        StepResult::Progressed { newly_visited }
    }

    /// Search strategy driving the traversal.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> TraversalStatus {
        self.status
    }

    /// Reports whether the traversal reached a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        !matches!(self.status, TraversalStatus::Running)
    }

    /// Number of frontier cells expanded so far.
    #[must_use]
    pub const fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Reports whether the cell has been visited. Cells outside the grid never are.
    #[must_use]
    pub fn is_visited(&self, coord: CellCoord) -> bool {
        self.grid
            .index(coord)
            .and_then(|index| self.visited.get(index).copied())
            .unwrap_or(false)
    }

    /// Number of visited cells, including the start.
    #[must_use]
    pub const fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Number of cells waiting to be expanded.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Grid being explored.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Presentation snapshot with visited path cells marked.
    #[must_use]
    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot::with_overlay(&self.grid, |coord| self.is_visited(coord))
    }

    fn solve(&mut self, end: CellCoord, newly_visited: Vec<CellCoord>) -> StepResult {
        self.status = TraversalStatus::Solved { end };
        debug!(
            "{} traversal reached {end} after {} steps",
            self.algorithm, self.steps_taken
        );
        StepResult::Solved { end, newly_visited }
    }

    /// Marks the cell visited, returning whether it was previously unvisited.
    fn mark_visited(&mut self, coord: CellCoord) -> bool {
        let Some(slot) = self
            .grid
            .index(coord)
            .and_then(|index| self.visited.get_mut(index))
        else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
        self.visited_count += 1;
        true
    }
}
