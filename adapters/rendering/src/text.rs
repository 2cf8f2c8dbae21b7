//! Character-cell rendering for terminals and logs.

use std::fmt::Write as _;

use crossterm::style::Stylize;
use pathviz_core::{CellKind, MazeSnapshot, SolveStatus, TraversalOutcome};

use crate::{CellPalette, RenderingError, Scene};

/// How cells are turned into characters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextStyle {
    /// One glyph per cell, no escape sequences.
    Plain,
    /// Two spaces per cell painted with a 24-bit terminal background color.
    Ansi(CellPalette),
}

/// Character used for a cell in plain output.
#[must_use]
pub const fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Wall => '#',
        CellKind::Path => ' ',
        CellKind::Start => 'S',
        CellKind::End => 'E',
        CellKind::Visited => '.',
    }
}

/// Renders the maze one text line per row, top row first.
#[must_use]
pub fn render_maze(maze: &MazeSnapshot, style: TextStyle) -> String {
    let mut out = String::new();
    for row in maze.iter_rows() {
        for kind in row {
            match style {
                TextStyle::Plain => out.push(glyph(*kind)),
                TextStyle::Ansi(palette) => {
                    let _ = write!(out, "{}", "  ".on(palette.color(*kind).into()));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Summarises the scene's solve settings and progress in one line.
#[must_use]
pub fn status_line(scene: &Scene) -> String {
    let state = match (scene.status, scene.outcome) {
        (SolveStatus::Idle, _) => "ready".to_owned(),
        (SolveStatus::Solving, _) => "solving".to_owned(),
        (SolveStatus::Solved, Some(TraversalOutcome::Solved { end })) => format!("reached {end}"),
        (SolveStatus::Solved, _) => "solved".to_owned(),
        (SolveStatus::Exhausted, _) => "no path".to_owned(),
    };
    format!(
        "{} | {} ms/step | {} | steps: {}",
        scene.algorithm.display_name(),
        scene.step_interval.as_millis(),
        state,
        scene.steps
    )
}

/// Renders the status line followed by the maze.
pub fn render_scene(scene: &Scene, style: TextStyle) -> Result<String, RenderingError> {
    let maze = scene.maze.as_ref().ok_or(RenderingError::MissingMaze)?;
    let mut frame = status_line(scene);
    frame.push('\n');
    frame.push_str(&render_maze(maze, style));
    Ok(frame)
}
