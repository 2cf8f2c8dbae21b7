//! Owns the world, the step driver and the maze generator for one run.

use anyhow::{Context, Result};
use pathviz_core::{Command, Event, MazeSnapshot};
use pathviz_system_driver::StepDriver;
use pathviz_system_generation::MazeGenerator;
use pathviz_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub(crate) struct Session {
    world: World,
    driver: StepDriver,
    generator: MazeGenerator<ChaCha8Rng>,
}

impl Session {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            world: World::new(),
            driver: StepDriver::default(),
            generator: MazeGenerator::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Applies the command and every step it triggers, returning all events.
    pub(crate) fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut transcript = Vec::new();
        let mut commands = vec![command];

        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.driver.handle(&events, &mut commands);
            transcript.extend(events);
        }
        transcript
    }

    /// Generates and installs a new maze.
    pub(crate) fn regenerate(&mut self, width: u32, height: u32) -> Result<Vec<Event>> {
        let grid = self
            .generator
            .generate(width, height)
            .with_context(|| format!("failed to generate a {width}x{height} maze"))?;
        Ok(self.submit(Command::InstallMaze { grid }))
    }

    pub(crate) fn snapshot(&self) -> Option<MazeSnapshot> {
        query::maze_snapshot(&self.world)
    }
}
