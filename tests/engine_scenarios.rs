use std::time::Duration;

use grid_snake::game::{
    CollisionType, Direction, GameConfig, GameEngine, GameState, GameStatus, Position,
    ScheduleDirective, Snake,
};

fn engine(seed: u64) -> GameEngine {
    GameEngine::seeded(GameConfig::default(), seed).expect("default config is valid")
}

fn is_on_grid(pos: Position) -> bool {
    (0..400).contains(&pos.x) && (0..400).contains(&pos.y) && pos.x % 20 == 0 && pos.y % 20 == 0
}

#[test]
fn plain_ticks_translate_without_growing() {
    let mut engine = engine(1);
    let mut state = engine.reset();
    state.food = Position::new(0, 0);

    for turn in [None, Some(Direction::Down), None, Some(Direction::Left), None] {
        if let Some(direction) = turn {
            assert!(engine.set_direction(&mut state, direction));
        }
        let before = state.snake.head();
        let length = state.snake.len();

        let outcome = engine.tick(&mut state);

        assert!(!outcome.ate_food);
        assert_eq!(state.snake.len(), length);
        assert_eq!(state.snake.head(), before.stepped(state.direction(), 20));
    }
}

#[test]
fn eating_scores_grows_and_speeds_up() {
    let mut engine = engine(2);
    let mut state = engine.reset();
    assert_eq!(state.snake.head(), Position::new(100, 100));
    assert_eq!(state.direction(), Direction::Right);

    state.food = Position::new(120, 100);
    let outcome = engine.tick(&mut state);

    assert!(outcome.ate_food);
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.speed_ms, 190);
    assert_eq!(outcome.schedule, ScheduleDirective::Rearm(Duration::from_millis(190)));
    assert!(is_on_grid(state.food));

    let snapshot = outcome.snapshot.expect("executed tick has a snapshot");
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.head(), Some(Position::new(120, 100)));

    // The extra segment stays once the snake moves on
    state.food = Position::new(0, 0);
    engine.tick(&mut state);
    assert_eq!(
        state.snake.body,
        vec![Position::new(140, 100), Position::new(120, 100)]
    );
}

#[test]
fn speed_never_drops_below_floor() {
    let mut engine = engine(3);
    let mut state = engine.reset();
    let mut last_speed = state.speed_ms;

    // Eat along a zig-zag so the snake never runs out of board
    for i in 0..25 {
        let direction = if i % 2 == 0 { Direction::Down } else { Direction::Right };
        engine.set_direction(&mut state, direction);
        state.food = state.snake.head().stepped(direction, 20);

        let outcome = engine.tick(&mut state);
        assert!(outcome.ate_food, "tick {i} should have eaten");
        assert!(state.speed_ms <= last_speed);
        last_speed = state.speed_ms;
    }

    assert_eq!(state.speed_ms, 50);
    assert_eq!(state.score, 250);
}

#[test]
fn reversal_is_rejected() {
    let mut engine = engine(4);
    let mut state = engine.reset();

    assert!(!engine.set_direction(&mut state, Direction::Left));
    assert_eq!(state.direction(), Direction::Right);

    assert!(engine.set_direction(&mut state, Direction::Down));
    let mut state = engine.reset();
    assert!(engine.set_direction(&mut state, Direction::Up));
}

#[test]
fn leaving_the_board_ends_the_game() {
    let mut engine = engine(5);

    let mut left = engine.reset();
    left.snake = Snake::new(Position::new(0, 100), Direction::Left);
    let outcome = engine.tick(&mut left);
    assert_eq!(left.snake.head(), Position::new(-20, 100));
    assert_eq!(outcome.collision, Some(CollisionType::Wall));
    assert!(left.is_game_over());

    let mut right = engine.reset();
    right.snake = Snake::new(Position::new(380, 100), Direction::Right);
    let outcome = engine.tick(&mut right);
    assert_eq!(right.snake.head(), Position::new(400, 100));
    assert_eq!(outcome.schedule, ScheduleDirective::Cancel);

    let report = outcome.snapshot.expect("terminal tick reports");
    assert!(report.is_game_over());
    assert_eq!(report.final_score_text().as_deref(), Some("Game Over! Final Score: 0"));
}

#[test]
fn game_over_is_terminal_until_reset() {
    let mut engine = engine(6);
    let mut state = engine.reset();
    state.snake = Snake::new(Position::new(380, 380), Direction::Down);
    engine.tick(&mut state);
    assert!(state.is_game_over());

    let frozen = state.clone();
    assert!(engine.tick(&mut state).snapshot.is_none());
    assert!(!engine.set_direction(&mut state, Direction::Up));
    assert_eq!(engine.toggle_pause(&mut state), ScheduleDirective::Keep);
    assert_eq!(state, frozen);

    let state = engine.reset();
    assert_eq!(state.status, GameStatus::Running);
}

#[test]
fn biting_the_body_ends_the_game() {
    let mut engine = engine(7);
    let mut state = engine.reset();
    state.food = Position::new(0, 0);
    state.snake = Snake::with_length(Position::new(200, 200), Direction::Right, 5, 20);

    for direction in [Direction::Down, Direction::Left, Direction::Up] {
        assert!(!engine.tick(&mut state).terminated());
        engine.set_direction(&mut state, direction);
    }
    let outcome = engine.tick(&mut state);

    assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
    assert!(state.is_game_over());
}

#[test]
fn reset_matches_a_fresh_engine() {
    let mut used = engine(8);
    let mut state = used.reset();
    state.food = Position::new(120, 100);
    used.tick(&mut state);
    used.toggle_pause(&mut state);

    let fresh = engine(9).reset();
    let again = used.reset();

    for candidate in [&again, &fresh] {
        assert_eq!(candidate.score, 0);
        assert_eq!(candidate.snake.len(), 1);
        assert_eq!(candidate.snake.head(), Position::new(100, 100));
        assert_eq!(candidate.direction(), Direction::Right);
        assert_eq!(candidate.speed_ms, 200);
        assert!(!candidate.is_paused());
        assert!(!candidate.is_game_over());
        assert!(is_on_grid(candidate.food));
    }

    let strip_food = |s: &GameState| GameState { food: Position::default(), ..s.clone() };
    assert_eq!(strip_food(&again), strip_food(&fresh));
}

#[test]
fn food_is_always_on_a_free_grid_cell() {
    let mut engine = engine(10);
    let mut state = engine.reset();
    state.snake = Snake::with_length(Position::new(380, 0), Direction::Right, 19, 20);

    for _ in 0..200 {
        engine.place_food(&mut state);
        assert!(is_on_grid(state.food));
        assert!(!state.is_occupied_by_snake(state.food));
    }
}
