#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the path-finding visualizer.

use std::time::Duration;

use log::{debug, info, warn};
use pathviz_core::{
    Algorithm, Command, Event, Grid, RejectionReason, SolveStatus, SolveTicket, TraversalOutcome,
    DEFAULT_ALGORITHM, DEFAULT_STEP_INTERVAL,
};
use pathviz_system_traversal::{StepResult, Traversal};

/// Represents the authoritative visualizer session.
#[derive(Debug)]
pub struct World {
    grid: Option<Grid>,
    algorithm: Algorithm,
    step_interval: Duration,
    status: SolveStatus,
    traversal: Option<Traversal>,
    next_ticket: u64,
    active_ticket: Option<SolveTicket>,
}

impl World {
    /// Creates an empty session with default settings and no maze.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: None,
            algorithm: DEFAULT_ALGORITHM,
            step_interval: DEFAULT_STEP_INTERVAL,
            status: SolveStatus::Idle,
            traversal: None,
            next_ticket: 0,
            active_ticket: None,
        }
    }

    /// Abandons the active solve, returning its ticket when one was running.
    fn cancel_active(&mut self) -> Option<SolveTicket> {
        let ticket = self.active_ticket.take()?;
        debug!("cancelled solve {}", ticket.get());
        Some(ticket)
    }

    fn allocate_ticket(&mut self) -> SolveTicket {
        let ticket = SolveTicket::new(self.next_ticket);
        self.next_ticket = self.next_ticket.saturating_add(1);
        ticket
    }

    fn start_solve(&mut self, out_events: &mut Vec<Event>) {
        let Some(grid) = self.grid.as_ref() else {
            reject(RejectionReason::NoMaze, out_events);
            return;
        };
        match self.status {
            SolveStatus::Idle => {}
            SolveStatus::Solving => {
                reject(RejectionReason::SolveInProgress, out_events);
                return;
            }
            SolveStatus::Solved | SolveStatus::Exhausted => {
                reject(RejectionReason::ResetRequired, out_events);
                return;
            }
        }

        let traversal = Traversal::for_grid(grid, self.algorithm);
        let ticket = self.allocate_ticket();
        self.traversal = Some(traversal);
        self.status = SolveStatus::Solving;
        self.active_ticket = Some(ticket);
        debug!(
            "started solve {} with {} at {:?} per step",
            ticket.get(),
            self.algorithm,
            self.step_interval
        );
        out_events.push(Event::SolveStarted {
            ticket,
            algorithm: self.algorithm,
            interval: self.step_interval,
        });
    }

    fn advance(&mut self, ticket: SolveTicket, out_events: &mut Vec<Event>) {
        let traversal = match (self.active_ticket, self.traversal.as_mut()) {
            (Some(active), Some(traversal)) if active == ticket => traversal,
            _ => {
                warn!("ignored stale step for solve {}", ticket.get());
                out_events.push(Event::StaleStepIgnored { ticket });
                return;
            }
        };

        match traversal.step() {
            StepResult::Progressed { newly_visited } => {
                debug!(
                    "solve {} step {} visited {} cells",
                    ticket.get(),
                    traversal.steps_taken(),
                    newly_visited.len()
                );
                out_events.push(Event::TraversalAdvanced {
                    ticket,
                    visited: newly_visited,
                });
            }
            StepResult::Solved { end, newly_visited } => {
                info!(
                    "solve {} reached {end} after {} steps",
                    ticket.get(),
                    traversal.steps_taken()
                );
                self.finish(SolveStatus::Solved);
                out_events.push(Event::TraversalFinished {
                    ticket,
                    outcome: TraversalOutcome::Solved { end },
                    visited: newly_visited,
                });
            }
            StepResult::Exhausted => {
                info!(
                    "solve {} exhausted the maze after {} steps",
                    ticket.get(),
                    traversal.steps_taken()
                );
                self.finish(SolveStatus::Exhausted);
                out_events.push(Event::TraversalFinished {
                    ticket,
                    outcome: TraversalOutcome::Exhausted,
                    visited: Vec::new(),
                });
            }
        }
    }

    fn finish(&mut self, status: SolveStatus) {
        self.status = status;
        self.active_ticket = None;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::InstallMaze { grid } => {
            if let Some(ticket) = world.cancel_active() {
                out_events.push(Event::SolveCancelled { ticket });
            }
            let (rows, columns, start, end) =
                (grid.rows(), grid.columns(), grid.start(), grid.end());
            world.grid = Some(grid);
            world.traversal = None;
            world.status = SolveStatus::Idle;
            debug!("installed {columns}x{rows} maze");
            out_events.push(Event::MazeInstalled {
                rows,
                columns,
                start,
                end,
            });
        }
        Command::SelectAlgorithm { algorithm } => {
            if world.status == SolveStatus::Solving {
                reject(RejectionReason::SolveInProgress, out_events);
                return;
            }
            world.algorithm = algorithm;
            out_events.push(Event::AlgorithmSelected { algorithm });
        }
        Command::ConfigureStepInterval { interval } => {
            world.step_interval = interval;
            out_events.push(Event::StepIntervalConfigured { interval });
        }
        Command::StartSolve => world.start_solve(out_events),
        Command::ResetSession => {
            if let Some(ticket) = world.cancel_active() {
                out_events.push(Event::SolveCancelled { ticket });
            }
            world.traversal = None;
            world.status = SolveStatus::Idle;
            out_events.push(Event::SessionReset);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::AdvanceTraversal { ticket } => world.advance(ticket, out_events),
    }
}

fn reject(reason: RejectionReason, out_events: &mut Vec<Event>) {
    warn!("rejected command: {reason:?}");
    out_events.push(Event::CommandRejected { reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use pathviz_core::{
        Algorithm, ControlAvailability, Grid, MazeSnapshot, SolveStatus, SolveTicket,
    };

    /// Provides read-only access to the installed maze, if any.
    #[must_use]
    pub fn maze(world: &World) -> Option<&Grid> {
        world.grid.as_ref()
    }

    /// Captures the installed maze together with the current visited overlay.
    #[must_use]
    pub fn maze_snapshot(world: &World) -> Option<MazeSnapshot> {
        match (&world.traversal, &world.grid) {
            (Some(traversal), _) => Some(traversal.snapshot()),
            (None, Some(grid)) => Some(MazeSnapshot::from_grid(grid)),
            (None, None) => None,
        }
    }

    /// Algorithm that drives the next or current solve.
    #[must_use]
    pub fn algorithm(world: &World) -> Algorithm {
        world.algorithm
    }

    /// Delay applied between traversal steps.
    #[must_use]
    pub fn step_interval(world: &World) -> Duration {
        world.step_interval
    }

    /// Lifecycle state of the current solve.
    #[must_use]
    pub fn status(world: &World) -> SolveStatus {
        world.status
    }

    /// Ticket of the solve currently accepting steps.
    #[must_use]
    pub fn active_ticket(world: &World) -> Option<SolveTicket> {
        world.active_ticket
    }

    /// Controls an adapter may offer in the current state.
    #[must_use]
    pub fn controls(world: &World) -> ControlAvailability {
        ControlAvailability::for_status(world.status, world.grid.is_some())
    }

    /// Number of steps the current traversal has taken.
    #[must_use]
    pub fn steps_taken(world: &World) -> u64 {
        world
            .traversal
            .as_ref()
            .map_or(0, |traversal| traversal.steps_taken())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pathviz_core::{
        CellCoord,
        CellKind::{self, End as E, Path as P, Start as S, Wall as W},
    };

    fn corridor() -> Grid {
        Grid::from_rows(vec![
            vec![W, W, W, W, W],
            vec![W, S, P, P, W],
            vec![W, W, W, P, W],
            vec![W, W, W, P, E],
        ])
        .expect("corridor grid is valid")
    }

    fn installed() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::InstallMaze { grid: corridor() },
            &mut events,
        );
        world
    }

    fn start(world: &mut World) -> SolveTicket {
        let mut events = Vec::new();
        apply(world, Command::StartSolve, &mut events);
        match events.as_slice() {
            [Event::SolveStarted { ticket, .. }] => *ticket,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn new_world_uses_defaults() {
        let world = World::new();

        assert!(query::maze(&world).is_none());
        assert!(query::maze_snapshot(&world).is_none());
        assert_eq!(query::algorithm(&world), Algorithm::Bfs);
        assert_eq!(query::step_interval(&world), Duration::from_millis(300));
        assert_eq!(query::status(&world), SolveStatus::Idle);
        assert!(!query::controls(&world).execute);
    }

    #[test]
    fn install_reports_dimensions_and_endpoints() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::InstallMaze { grid: corridor() },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MazeInstalled {
                rows: 4,
                columns: 5,
                start: CellCoord::new(1, 1),
                end: CellCoord::new(3, 4),
            }]
        );
        assert!(query::controls(&world).execute);
    }

    #[test]
    fn start_without_maze_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartSolve, &mut events);

        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: RejectionReason::NoMaze
            }]
        );
        assert!(query::active_ticket(&world).is_none());
    }

    #[test]
    fn solving_locks_algorithm_and_start() {
        let mut world = installed();
        let ticket = start(&mut world);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SelectAlgorithm {
                algorithm: Algorithm::Dfs,
            },
            &mut events,
        );
        apply(&mut world, Command::StartSolve, &mut events);
        apply(
            &mut world,
            Command::ConfigureStepInterval {
                interval: Duration::from_millis(150),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::CommandRejected {
                    reason: RejectionReason::SolveInProgress
                },
                Event::CommandRejected {
                    reason: RejectionReason::SolveInProgress
                },
                Event::StepIntervalConfigured {
                    interval: Duration::from_millis(150)
                },
            ]
        );
        assert_eq!(query::algorithm(&world), Algorithm::Bfs);
        assert_eq!(query::active_ticket(&world), Some(ticket));
        assert_eq!(query::step_interval(&world), Duration::from_millis(150));
    }

    #[test]
    fn steps_run_until_the_end_is_reached() {
        let mut world = installed();
        let ticket = start(&mut world);
        let mut visited = Vec::new();

        let outcome = loop {
            let mut events = Vec::new();
            apply(&mut world, Command::AdvanceTraversal { ticket }, &mut events);
            match events.pop() {
                Some(Event::TraversalAdvanced { visited: delta, .. }) => visited.extend(delta),
                Some(Event::TraversalFinished { outcome, .. }) => break outcome,
                other => panic!("unexpected event: {other:?}"),
            }
        };

        assert_eq!(
            outcome,
            TraversalOutcome::Solved {
                end: CellCoord::new(3, 4)
            }
        );
        assert_eq!(visited.len(), 4);
        assert_eq!(query::status(&world), SolveStatus::Solved);
        assert_eq!(query::steps_taken(&world), 5);
        assert!(query::active_ticket(&world).is_none());

        let controls = query::controls(&world);
        assert!(controls.reset && !controls.execute);

        let snapshot = query::maze_snapshot(&world).expect("maze installed");
        assert_eq!(snapshot.count(CellKind::Visited), 4);
    }

    #[test]
    fn walled_in_start_still_starts_and_exhausts() {
        let grid = Grid::from_rows(vec![vec![W, W, W], vec![W, S, W], vec![W, W, E]])
            .expect("walled grid is valid");
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::InstallMaze { grid }, &mut events);

        let ticket = start(&mut world);
        let mut finished = Vec::new();
        for _ in 0..2 {
            apply(&mut world, Command::AdvanceTraversal { ticket }, &mut finished);
        }

        assert_eq!(
            finished.last(),
            Some(&Event::TraversalFinished {
                ticket,
                outcome: TraversalOutcome::Exhausted,
                visited: Vec::new(),
            })
        );
        assert_eq!(query::status(&world), SolveStatus::Exhausted);
    }

    #[test]
    fn finished_solve_requires_reset() {
        let mut world = installed();
        let ticket = start(&mut world);
        let mut events = Vec::new();
        for _ in 0..5 {
            apply(&mut world, Command::AdvanceTraversal { ticket }, &mut events);
        }
        events.clear();

        apply(&mut world, Command::StartSolve, &mut events);
        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: RejectionReason::ResetRequired
            }]
        );

        events.clear();
        apply(&mut world, Command::ResetSession, &mut events);
        assert_eq!(events, vec![Event::SessionReset]);

        let next = start(&mut world);
        assert_ne!(next, ticket);
    }

    #[test]
    fn stale_steps_after_reset_leave_no_visited_cells() {
        let mut world = installed();
        let ticket = start(&mut world);
        let mut events = Vec::new();
        apply(&mut world, Command::AdvanceTraversal { ticket }, &mut events);
        events.clear();

        apply(&mut world, Command::ResetSession, &mut events);
        apply(&mut world, Command::AdvanceTraversal { ticket }, &mut events);

        assert_eq!(
            events,
            vec![
                Event::SolveCancelled { ticket },
                Event::SessionReset,
                Event::StaleStepIgnored { ticket },
            ]
        );
        let snapshot = query::maze_snapshot(&world).expect("maze installed");
        assert_eq!(snapshot.count(CellKind::Visited), 0);
        assert_eq!(query::steps_taken(&world), 0);
    }

    #[test]
    fn reinstalling_cancels_the_running_solve() {
        let mut world = installed();
        let ticket = start(&mut world);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::InstallMaze { grid: corridor() },
            &mut events,
        );
        apply(&mut world, Command::AdvanceTraversal { ticket }, &mut events);

        assert_eq!(events.first(), Some(&Event::SolveCancelled { ticket }));
        assert_eq!(events.last(), Some(&Event::StaleStepIgnored { ticket }));
        assert_eq!(query::status(&world), SolveStatus::Idle);
        assert_eq!(
            query::maze_snapshot(&world).map(|snapshot| snapshot.count(CellKind::Visited)),
            Some(0)
        );
    }
}
