#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for path-finding visualizer adapters.

mod text;

use std::time::Duration;

use anyhow::Result as AnyResult;
use crossterm::style::Color as TermColor;
use pathviz_core::{
    Algorithm, CellCoord, CellKind, ControlAvailability, Event, MazeSnapshot, SolveStatus,
    TraversalOutcome, DEFAULT_ALGORITHM, DEFAULT_STEP_INTERVAL,
};
use thiserror::Error;

pub use text::{glyph, render_maze, render_scene, status_line, TextStyle};

/// Opaque 24-bit color painted behind a terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// Creates a color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Blends the color towards white; `amount` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let blend = |channel: u8| {
            let channel = f32::from(channel);
            (channel + (255.0 - channel) * amount).round() as u8
        };

        Self {
            red: blend(self.red),
            green: blend(self.green),
            blue: blend(self.blue),
        }
    }
}

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        Self::Rgb {
            r: color.red,
            g: color.green,
            b: color.blue,
        }
    }
}

/// Colors assigned to each presentable cell kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPalette {
    /// Color of impassable cells.
    pub wall: Color,
    /// Color of unexplored open cells.
    pub path: Color,
    /// Color of the start cell.
    pub start: Color,
    /// Color of the end cell.
    pub end: Color,
    /// Color of explored cells.
    pub visited: Color,
}

impl CellPalette {
    /// Color used to present the provided cell kind.
    #[must_use]
    pub const fn color(&self, kind: CellKind) -> Color {
        match kind {
            CellKind::Wall => self.wall,
            CellKind::Path => self.path,
            CellKind::Start => self.start,
            CellKind::End => self.end,
            CellKind::Visited => self.visited,
        }
    }
}

impl Default for CellPalette {
    fn default() -> Self {
        let visited = Color::from_rgb_u8(0x3b, 0x82, 0xf6);
        Self {
            wall: Color::from_rgb_u8(0x1f, 0x29, 0x37),
            path: Color::from_rgb_u8(0xf3, 0xf4, 0xf6),
            start: Color::from_rgb_u8(0x00, 0x80, 0x00),
            end: Color::from_rgb_u8(0xdc, 0x26, 0x26),
            visited: visited.lighten(0.35),
        }
    }
}

/// Scene description mirroring the session as seen by adapters.
///
/// Adapters install the maze snapshot once per generated maze and then keep
/// the scene current by folding world events; visited cells arrive as
/// per-step deltas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Maze currently presented, including visited cells.
    pub maze: Option<MazeSnapshot>,
    /// Algorithm selected for the next or current solve.
    pub algorithm: Algorithm,
    /// Delay between traversal steps.
    pub step_interval: Duration,
    /// Lifecycle state of the current solve.
    pub status: SolveStatus,
    /// Number of traversal steps observed for the current solve.
    pub steps: u64,
    /// Terminal result of the last finished solve.
    pub outcome: Option<TraversalOutcome>,
    pristine: Option<MazeSnapshot>,
}

impl Scene {
    /// Creates an empty scene with the provided settings.
    #[must_use]
    pub const fn new(algorithm: Algorithm, step_interval: Duration) -> Self {
        Self {
            maze: None,
            algorithm,
            step_interval,
            status: SolveStatus::Idle,
            steps: 0,
            outcome: None,
            pristine: None,
        }
    }

    /// Replaces the presented maze with a freshly installed one.
    pub fn install_maze(&mut self, snapshot: MazeSnapshot) {
        self.pristine = Some(snapshot.clone());
        self.maze = Some(snapshot);
        self.clear_progress();
    }

    /// Folds world events into the scene.
    pub fn apply_events(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::AlgorithmSelected { algorithm } => self.algorithm = *algorithm,
                Event::StepIntervalConfigured { interval } => self.step_interval = *interval,
                Event::SolveStarted {
                    algorithm,
                    interval,
                    ..
                } => {
                    self.algorithm = *algorithm;
                    self.step_interval = *interval;
                    self.status = SolveStatus::Solving;
                    self.steps = 0;
                    self.outcome = None;
                }
                Event::TraversalAdvanced { visited, .. } => {
                    self.fold(visited);
                }
                Event::TraversalFinished {
                    outcome, visited, ..
                } => {
                    self.fold(visited);
                    self.outcome = Some(*outcome);
                    self.status = match outcome {
                        TraversalOutcome::Solved { .. } => SolveStatus::Solved,
                        TraversalOutcome::Exhausted => SolveStatus::Exhausted,
                    };
                }
                Event::SessionReset => {
                    self.maze = self.pristine.clone();
                    self.clear_progress();
                }
                Event::MazeInstalled { .. }
                | Event::SolveCancelled { .. }
                | Event::TimeAdvanced { .. }
                | Event::StaleStepIgnored { .. }
                | Event::CommandRejected { .. } => {}
            }
        }
    }

    /// Controls an adapter may offer for the presented state.
    #[must_use]
    pub const fn controls(&self) -> ControlAvailability {
        ControlAvailability::for_status(self.status, self.maze.is_some())
    }

    fn fold(&mut self, visited: &[CellCoord]) {
        self.steps += 1;
        if let Some(maze) = self.maze.as_mut() {
            let _ = maze.fold_visited(visited);
        }
    }

    fn clear_progress(&mut self) {
        self.status = SolveStatus::Idle;
        self.steps = 0;
        self.outcome = None;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_ALGORITHM, DEFAULT_STEP_INTERVAL)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title printed above each frame.
    pub title: String,
    /// How cells are drawn.
    pub style: TextStyle,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, style: TextStyle, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            style,
            scene,
        }
    }
}

/// Decision returned by the scene update closure after every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Present the current frame one last time and stop.
    Exit,
}

/// Rendering backend capable of presenting visualizer scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure requests an exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time and
    /// may mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl;
}

/// Errors raised while turning scenes into frames.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The scene has no maze to draw yet.
    #[error("scene has no maze to render")]
    MissingMaze,
}
