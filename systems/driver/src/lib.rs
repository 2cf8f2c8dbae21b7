#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step driver that paces traversal steps on the simulated clock.
//!
//! The driver keeps at most one step outstanding. A step is scheduled when a
//! solve starts and again only after the previous step's result has been
//! observed, so steps never overlap and a cancelled solve never receives
//! another request from the driver.

use std::time::Duration;

use log::debug;
use pathviz_core::{Command, Event, SolveTicket, DEFAULT_STEP_INTERVAL};

/// Traversal step waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledStep {
    ticket: SolveTicket,
    due: Duration,
}

impl ScheduledStep {
    /// Solve the step belongs to.
    #[must_use]
    pub const fn ticket(&self) -> SolveTicket {
        self.ticket
    }

    /// Simulated time at which the step fires.
    #[must_use]
    pub const fn due(&self) -> Duration {
        self.due
    }
}

/// Pure system that turns elapsed time into traversal step commands.
#[derive(Debug)]
pub struct StepDriver {
    clock: Duration,
    interval: Duration,
    pending: Option<ScheduledStep>,
    awaiting: Option<SolveTicket>,
}

impl StepDriver {
    /// Creates a driver that waits `interval` between steps until reconfigured.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            clock: Duration::ZERO,
            interval,
            pending: None,
            awaiting: None,
        }
    }

    /// Consumes world events and emits the step commands that became due.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SolveStarted {
                    ticket, interval, ..
                } => {
                    self.interval = *interval;
                    self.awaiting = None;
                    self.schedule(*ticket);
                }
                Event::StepIntervalConfigured { interval } => {
                    self.interval = *interval;
                }
                Event::TimeAdvanced { dt } => {
                    self.clock = self.clock.saturating_add(*dt);
                    if let Some(step) = self.pending {
                        if step.due <= self.clock {
                            self.pending = None;
                            self.awaiting = Some(step.ticket);
                            out.push(Command::AdvanceTraversal {
                                ticket: step.ticket,
                            });
                        }
                    }
                }
                Event::TraversalAdvanced { ticket, .. } => {
                    if self.awaiting == Some(*ticket) {
                        self.awaiting = None;
                        self.schedule(*ticket);
                    }
                }
                Event::StaleStepIgnored { ticket } => {
                    if self.awaiting == Some(*ticket) {
                        self.awaiting = None;
                    }
                }
                Event::TraversalFinished { .. }
                | Event::SolveCancelled { .. }
                | Event::SessionReset
                | Event::MazeInstalled { .. } => self.cancel(),
                Event::AlgorithmSelected { .. } | Event::CommandRejected { .. } => {}
            }
        }
    }

    /// Step waiting for its due time, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<ScheduledStep> {
        self.pending
    }

    /// Simulated time observed so far.
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Interval applied to the next scheduled step.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Reports whether no step is pending or awaiting its result.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.pending.is_none() && self.awaiting.is_none()
    }

    fn schedule(&mut self, ticket: SolveTicket) {
        self.pending = Some(ScheduledStep {
            ticket,
            due: self.clock.saturating_add(self.interval),
        });
    }

    fn cancel(&mut self) {
        if let Some(step) = self.pending.take() {
            debug!("dropped pending step for solve {}", step.ticket.get());
        }
        self.awaiting = None;
    }
}

impl Default for StepDriver {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}
