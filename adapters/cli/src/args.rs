use std::time::Duration;

use clap::{Parser, ValueEnum};
use pathviz_core::Algorithm;
use pathviz_rendering::{CellPalette, TextStyle};

/// Command-line options accepted by the visualizer.
#[derive(Debug, Parser)]
#[command(
    name = "pathviz",
    version,
    about = "Generate a maze and watch breadth-first or depth-first search solve it"
)]
pub(crate) struct Args {
    /// Maze width in cells; must be odd and at least 3.
    #[arg(long, default_value_t = 15)]
    pub(crate) width: u32,

    /// Maze height in cells; must be odd and at least 3.
    #[arg(long, default_value_t = 15)]
    pub(crate) height: u32,

    /// Search algorithm used to solve the maze.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Bfs)]
    pub(crate) algorithm: AlgorithmArg,

    /// Delay between traversal steps in milliseconds.
    #[arg(
        long,
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(100..=500)
    )]
    pub(crate) interval_ms: u64,

    /// Seed for maze generation; a random seed is drawn when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Run the simulation without pausing and print only the final frame.
    #[arg(long)]
    pub(crate) headless: bool,

    /// Draw cells as plain characters instead of colored blocks.
    #[arg(long)]
    pub(crate) no_color: bool,

    /// Stop after this many traversal steps even if the search is unfinished.
    #[arg(long, default_value_t = 100_000)]
    pub(crate) max_steps: u64,
}

impl Args {
    pub(crate) fn algorithm(&self) -> Algorithm {
        self.algorithm.into()
    }

    pub(crate) fn step_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub(crate) fn text_style(&self) -> TextStyle {
        if self.no_color {
            TextStyle::Plain
        } else {
            TextStyle::Ansi(CellPalette::default())
        }
    }
}

/// Search algorithms selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum AlgorithmArg {
    /// Breadth-first search.
    Bfs,
    /// Depth-first search.
    Dfs,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Bfs => Algorithm::Bfs,
            AlgorithmArg::Dfs => Algorithm::Dfs,
        }
    }
}
