use std::time::Duration;

use pathviz_core::{Algorithm, CellKind, Command, Event, SolveStatus, TraversalOutcome};
use pathviz_system_driver::StepDriver;
use pathviz_system_generation::generate_maze;
use pathviz_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FRAME: Duration = Duration::from_millis(20);

/// Applies `command` and feeds every resulting event through the driver until
/// no further commands are produced.
fn pump(world: &mut World, driver: &mut StepDriver, command: Command) -> Vec<Event> {
    let mut transcript = Vec::new();
    let mut commands = vec![command];

    while !commands.is_empty() {
        let mut events = Vec::new();
        for command in commands.drain(..) {
            world::apply(world, command, &mut events);
        }
        driver.handle(&events, &mut commands);
        transcript.extend(events);
    }
    transcript
}

fn session(width: u32, height: u32, seed: u64) -> (World, StepDriver) {
    let mut world = World::new();
    let mut driver = StepDriver::default();
    let grid = generate_maze(width, height, &mut ChaCha8Rng::seed_from_u64(seed))
        .expect("valid dimensions");
    let _ = pump(&mut world, &mut driver, Command::InstallMaze { grid });
    (world, driver)
}

#[test]
fn driver_runs_a_solve_to_completion() {
    let (mut world, mut driver) = session(15, 15, 21);
    let _ = pump(
        &mut world,
        &mut driver,
        Command::ConfigureStepInterval {
            interval: Duration::from_millis(100),
        },
    );
    let _ = pump(&mut world, &mut driver, Command::StartSolve);

    let mut outcome = None;
    let mut ticks: u64 = 0;
    while outcome.is_none() && ticks < 100_000 {
        ticks += 1;
        for event in pump(&mut world, &mut driver, Command::Tick { dt: FRAME }) {
            if let Event::TraversalFinished { outcome: result, .. } = event {
                outcome = Some(result);
            }
        }
    }

    let end = query::maze(&world).expect("maze installed").end();
    assert_eq!(outcome, Some(TraversalOutcome::Solved { end }));
    assert_eq!(query::status(&world), SolveStatus::Solved);
    assert!(driver.is_idle());
    // Five frames per step at 100 ms per step and 20 ms per frame.
    assert_eq!(ticks, query::steps_taken(&world) * 5);
}

#[test]
fn reset_mid_solve_never_fires_the_pending_step() {
    let (mut world, mut driver) = session(21, 21, 3);
    let _ = pump(&mut world, &mut driver, Command::StartSolve);
    for _ in 0..40 {
        let _ = pump(&mut world, &mut driver, Command::Tick { dt: FRAME });
    }
    assert!(query::steps_taken(&world) > 0);

    let _ = pump(&mut world, &mut driver, Command::ResetSession);
    assert!(driver.pending().is_none());

    let mut transcript = Vec::new();
    for _ in 0..200 {
        transcript.extend(pump(&mut world, &mut driver, Command::Tick { dt: FRAME }));
    }

    assert!(transcript
        .iter()
        .all(|event| matches!(event, Event::TimeAdvanced { .. })));
    let snapshot = query::maze_snapshot(&world).expect("maze installed");
    assert_eq!(snapshot.count(CellKind::Visited), 0);
    assert_eq!(query::status(&world), SolveStatus::Idle);
}

#[test]
fn late_step_cannot_touch_a_regenerated_maze() {
    let (mut world, mut driver) = session(11, 11, 8);
    let _ = pump(&mut world, &mut driver, Command::StartSolve);
    let ticket = query::active_ticket(&world).expect("solve running");

    let grid = generate_maze(11, 11, &mut ChaCha8Rng::seed_from_u64(9)).expect("maze");
    let _ = pump(&mut world, &mut driver, Command::InstallMaze { grid });

    // A step that slipped past the driver's cancellation.
    let events = pump(&mut world, &mut driver, Command::AdvanceTraversal { ticket });

    assert_eq!(events, vec![Event::StaleStepIgnored { ticket }]);
    let snapshot = query::maze_snapshot(&world).expect("maze installed");
    assert_eq!(snapshot.count(CellKind::Visited), 0);
}

#[test]
fn algorithm_switch_between_solves_takes_effect() {
    let (mut world, mut driver) = session(9, 9, 1);
    let _ = pump(
        &mut world,
        &mut driver,
        Command::SelectAlgorithm {
            algorithm: Algorithm::Dfs,
        },
    );

    let events = pump(&mut world, &mut driver, Command::StartSolve);

    assert!(matches!(
        events.as_slice(),
        [Event::SolveStarted {
            algorithm: Algorithm::Dfs,
            ..
        }]
    ));
    assert_eq!(
        driver.pending().map(|step| step.due()),
        Some(Duration::from_millis(300))
    );
}
