use std::collections::VecDeque;

use pathviz_core::{CellCoord, CellKind, Direction, Grid};
use pathviz_system_generation::{generate_maze, MazeGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZES: [(u32, u32); 6] = [(3, 3), (5, 5), (7, 3), (5, 9), (15, 15), (31, 21)];

fn reachable_from_start(grid: &Grid) -> Vec<CellCoord> {
    let mut seen = vec![false; grid.cells().len()];
    let mut queue = VecDeque::from([grid.start()]);
    let mut order = Vec::new();
    if let Some(index) = grid.index(grid.start()) {
        seen[index] = true;
    }

    while let Some(cell) = queue.pop_front() {
        order.push(cell);
        for direction in Direction::SEARCH_ORDER {
            let Some(next) = grid.neighbor(cell, direction) else {
                continue;
            };
            let index = grid.index(next).expect("neighbour lies inside the grid");
            if grid.is_open(next) && !seen[index] {
                seen[index] = true;
                queue.push_back(next);
            }
        }
    }
    order
}

fn open_adjacency_edges(grid: &Grid) -> usize {
    let mut edges = 0;
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(row, column);
            if !grid.is_open(cell) {
                continue;
            }
            for direction in [Direction::East, Direction::South] {
                if grid
                    .neighbor(cell, direction)
                    .is_some_and(|next| grid.is_open(next))
                {
                    edges += 1;
                }
            }
        }
    }
    edges
}

#[test]
fn generated_mazes_are_perfect() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);

    for (width, height) in SIZES {
        let grid = generate_maze(width, height, &mut rng).expect("odd dimensions are valid");
        let open = grid.open_cell_count();

        assert_eq!(
            reachable_from_start(&grid).len(),
            open,
            "{width}x{height}: every open cell is reachable"
        );
        assert_eq!(
            open_adjacency_edges(&grid),
            open - 1,
            "{width}x{height}: open cells form a tree"
        );
    }
}

#[test]
fn end_is_reachable_for_every_size() {
    for seed in 0..8 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for (width, height) in SIZES {
            let grid = generate_maze(width, height, &mut rng).expect("valid dimensions");

            assert_eq!(grid.start(), CellCoord::new(1, 0));
            assert_eq!(grid.end(), CellCoord::new(height - 2, width - 1));
            assert!(
                reachable_from_start(&grid).contains(&grid.end()),
                "seed {seed}: end unreachable in {width}x{height}"
            );
        }
    }
}

#[test]
fn border_holds_only_walls_start_and_end() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let grid = generate_maze(21, 13, &mut rng).expect("valid dimensions");

    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let on_border = row == 0
                || column == 0
                || row == grid.rows() - 1
                || column == grid.columns() - 1;
            let cell = CellCoord::new(row, column);
            if on_border && cell != grid.start() && cell != grid.end() {
                assert_eq!(grid.kind(cell), Some(CellKind::Wall), "border cell {cell}");
            }
        }
    }
}

#[test]
fn identical_seeds_produce_identical_mazes() {
    let first = generate_maze(25, 25, &mut ChaCha8Rng::seed_from_u64(42)).expect("maze");
    let second = generate_maze(25, 25, &mut ChaCha8Rng::seed_from_u64(42)).expect("maze");
    let other = generate_maze(25, 25, &mut ChaCha8Rng::seed_from_u64(43)).expect("maze");

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn generator_advances_its_source_between_mazes() {
    let mut generator = MazeGenerator::new(ChaCha8Rng::seed_from_u64(11));
    let first = generator.generate(15, 15).expect("first maze");
    let second = generator.generate(15, 15).expect("second maze");

    let mut replay = ChaCha8Rng::seed_from_u64(11);
    let _ = generate_maze(15, 15, &mut replay).expect("replayed first maze");
    let replayed_second = generate_maze(15, 15, &mut replay).expect("replayed second maze");

    assert_ne!(first, second);
    assert_eq!(second, replayed_second);
}
