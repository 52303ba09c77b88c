use std::collections::HashSet;

use grid_snake::config::GridSize;
use grid_snake::game::{Game, GameStatus, StepOutcome};
use grid_snake::grid::{Cell, Tile};
use grid_snake::input::{Direction, GameInput};
use grid_snake::layout::Layout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FIVE: GridSize = GridSize {
    width: 5,
    height: 5,
};

fn row_snake(row: u16, cols: std::ops::RangeInclusive<u16>) -> Vec<Cell> {
    cols.map(|col| Cell::new(row, col)).collect()
}

fn assert_occupancy(game: &Game) {
    let tagged: HashSet<Cell> = game
        .grid()
        .cells()
        .filter(|(_, tile)| tile.is_snake())
        .map(|(cell, _)| cell)
        .collect();
    let segments: Vec<Cell> = game.snake().segments().copied().collect();
    let unique: HashSet<Cell> = segments.iter().copied().collect();

    assert_eq!(unique.len(), segments.len(), "snake holds a cell twice");
    assert_eq!(tagged, unique, "board tags drifted from the snake");
    assert_eq!(game.grid()[game.snake().head()], Tile::Head);
    assert_eq!(game.grid()[game.snake().tail()], Tile::Tail);
    assert_eq!(game.grid().count(Tile::Head), 1);
    assert_eq!(game.grid().count(Tile::Tail), 1);
}

#[test]
fn blocked_by_obstacle_leaves_board_untouched() {
    let layout = Layout::new(FIVE, row_snake(2, 1..=3)).with_obstacles([Cell::new(2, 4)]);
    let mut game = Game::new(&layout).expect("valid layout");
    let before = game.grid().clone();

    let outcome = game.step();

    assert_eq!(outcome, StepOutcome::Blocked {
        tile: Tile::Obstacle
    });
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.grid(), &before);
    assert_eq!(game.snake().len(), 3);
}

#[test]
fn eating_an_item_grows_and_keeps_the_tail() {
    let layout = Layout::new(FIVE, row_snake(2, 1..=2)).with_items([Cell::new(2, 3)]);
    let mut game = Game::new(&layout).expect("valid layout");

    assert_eq!(game.step(), StepOutcome::Grew);

    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.grid()[Cell::new(2, 3)], Tile::Head);
    assert_eq!(game.grid()[Cell::new(2, 2)], Tile::Body);
    assert_eq!(game.grid()[Cell::new(2, 1)], Tile::Tail);
    assert_eq!(game.grid().count(Tile::Item), 0);
    assert_occupancy(&game);
}

#[test]
fn plain_move_vacates_the_tail() {
    let layout = Layout::new(FIVE, row_snake(2, 1..=3));
    let mut game = Game::new(&layout).expect("valid layout");

    assert_eq!(game.step(), StepOutcome::Moved);

    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.snake().head(), Cell::new(2, 4));
    assert_eq!(game.grid()[Cell::new(2, 4)], Tile::Head);
    assert_eq!(game.grid()[Cell::new(2, 1)], Tile::Empty);
    assert_eq!(game.grid()[Cell::new(2, 2)], Tile::Tail);
    assert_eq!(game.grid()[Cell::new(2, 3)], Tile::Body);
    assert_occupancy(&game);
}

#[test]
fn steps_while_paused_change_nothing() {
    let layout = Layout::new(FIVE, row_snake(2, 0..=2)).with_items([Cell::new(2, 3)]);
    let mut game = Game::new(&layout).expect("valid layout");
    game.step();
    game.request_pause();

    let grid = game.grid().clone();
    let snake = game.snake().clone();
    for _ in 0..25 {
        assert_eq!(game.step(), StepOutcome::Idle);
    }

    assert_eq!(game.grid(), &grid);
    assert_eq!(game.snake(), &snake);
    assert_eq!(game.status(), GameStatus::Paused);

    game.request_resume();
    assert_eq!(game.step(), StepOutcome::Moved);
}

#[test]
fn full_lap_along_a_row_returns_the_head_home() {
    let size = GridSize {
        width: 6,
        height: 3,
    };
    let mut game = Game::new(&Layout::new(size, row_snake(1, 0..=1))).expect("valid layout");
    let start = game.snake().head();

    let mut heads = HashSet::new();
    for _ in 0..size.width {
        assert_eq!(game.step(), StepOutcome::Moved);
        assert!(heads.insert(game.snake().head()));
    }

    assert_eq!(game.snake().head(), start);
    assert_eq!(heads.len(), usize::from(size.width));
    assert!(heads.iter().all(|cell| cell.row == 1));
}

#[test]
fn full_lap_along_a_column_returns_the_head_home() {
    let size = GridSize {
        width: 3,
        height: 6,
    };
    let layout = Layout::new(size, [Cell::new(1, 1), Cell::new(0, 1)]);
    let mut game = Game::new(&layout).expect("valid layout");
    assert_eq!(game.direction(), Direction::Up);
    let start = game.snake().head();

    let mut heads = HashSet::new();
    for _ in 0..size.height {
        assert_eq!(game.step(), StepOutcome::Moved);
        assert!(heads.insert(game.snake().head()));
    }

    assert_eq!(game.snake().head(), start);
    assert_eq!(heads.len(), usize::from(size.height));
    assert!(heads.iter().all(|cell| cell.col == 1));
}

#[test]
fn reversal_requests_never_reach_the_next_tick() {
    let mut game = Game::new(&Layout::new(FIVE, row_snake(2, 0..=2))).expect("valid layout");

    game.apply_input(GameInput::Direction(Direction::Left));
    assert_eq!(game.pending_direction(), Direction::Right);

    assert_eq!(game.step(), StepOutcome::Moved);
    assert_eq!(game.snake().head(), Cell::new(2, 3));
}

#[test]
fn wandering_snake_keeps_board_and_queue_in_sync() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut layout = Layout::new(
            GridSize {
                width: 12,
                height: 9,
            },
            row_snake(4, 2..=5),
        )
        .with_obstacles([Cell::new(0, 0), Cell::new(7, 3), Cell::new(7, 4)]);
        layout
            .scatter_items(&mut rng, 20)
            .expect("board has room for items");

        let mut game = Game::new(&layout).expect("valid layout");
        assert_occupancy(&game);

        for _ in 0..300 {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            game.request_direction_change(direction);

            let items_before = game.grid().count(Tile::Item);
            let length_before = game.snake().len();
            match game.step() {
                StepOutcome::Moved => {
                    assert_eq!(game.snake().len(), length_before);
                    assert_eq!(game.grid().count(Tile::Item), items_before);
                }
                StepOutcome::Grew => {
                    assert_eq!(game.snake().len(), length_before + 1);
                    assert_eq!(game.grid().count(Tile::Item), items_before - 1);
                }
                StepOutcome::Blocked { tile } => {
                    assert!(matches!(tile, Tile::Obstacle | Tile::Body | Tile::Head));
                    assert_eq!(game.status(), GameStatus::GameOver);
                    assert_occupancy(&game);
                    break;
                }
                StepOutcome::Idle => unreachable!("game was running"),
            }

            assert_occupancy(&game);
            assert_eq!(game.grid().count(Tile::Obstacle), 3);
        }
    }
}

#[test]
fn stock_board_runs_into_its_wall() {
    let mut game = Game::new(&Layout::classic()).expect("stock layout is valid");
    assert_eq!(game.snake().len(), 4);

    let mut steps = 0;
    while game.status() == GameStatus::Running {
        game.step();
        steps += 1;
        assert!(steps <= 40, "snake should hit the wall within one lap");
    }

    // Head starts at column 6 heading right and wraps into the column-0 wall.
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.snake().head(), Cell::new(4, 39));
    assert_eq!(game.tick_count(), 33);
}
