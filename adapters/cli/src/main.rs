#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a maze and animates its solution.

mod args;
mod session;
mod terminal;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use pathviz_core::Command;
use pathviz_rendering::{FrameControl, Presentation, RenderingBackend, Scene};

use crate::{
    args::Args,
    session::Session,
    terminal::{Pacing, TerminalBackend},
};

const FRAME_PERIOD: Duration = Duration::from_millis(30);

/// Entry point for the path-finding visualizer command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating {}x{} maze with seed {seed}", args.width, args.height);

    let mut session = Session::new(seed);
    let mut scene = Scene::new(args.algorithm(), args.step_interval());
    let mut events = session.regenerate(args.width, args.height)?;
    scene.install_maze(session.snapshot().context("maze was not installed")?);

    for command in [
        Command::SelectAlgorithm {
            algorithm: args.algorithm(),
        },
        Command::ConfigureStepInterval {
            interval: args.step_interval(),
        },
        Command::StartSolve,
    ] {
        events.extend(session.submit(command));
    }
    scene.apply_events(&events);

    let pacing = if args.headless {
        Pacing::Simulated {
            dt: args.step_interval(),
        }
    } else {
        Pacing::RealTime {
            frame: FRAME_PERIOD,
        }
    };
    let title = format!(
        "pathviz {}x{} seed {seed} ({})",
        args.width,
        args.height,
        args.algorithm().label()
    );
    let presentation = Presentation::new(title, args.text_style(), scene);
    let max_steps = args.max_steps;

    TerminalBackend::new(io::stdout().lock(), pacing).run(presentation, move |dt, scene| {
        let events = session.submit(Command::Tick { dt });
        scene.apply_events(&events);

        if scene.status.is_finished() {
            return FrameControl::Exit;
        }
        if scene.steps >= max_steps {
            warn!("stopping after {max_steps} steps without finishing the search");
            return FrameControl::Exit;
        }
        FrameControl::Continue
    })
}
