use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::Result;
use tracing::{debug, info, trace};

use crate::Coords;
use crate::frame::Frame;
use crate::random::RandomSource;
use crate::snake::{Snake, Direction::{*, self}};
use crate::term::{InputSource, Renderer};

pub const GRID_WIDTH: i16 = 50;
pub const GRID_HEIGHT: i16 = 22;

const INITIAL_SNAKE_LENGTH: i16 = 3;
const FOOD_REWARD: u32 = 10;
const INITIAL_TICK_MS: u64 = 110;
const TICK_STEP_MS: u64 = 2;
const MIN_TICK_MS: u64 = 55;
const FRAME_SLEEP_MS: u64 = 8;

/// What a single key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Quit,
    Restart,
    Turn(Direction),
}

impl Intent {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(Intent::Quit),
            'r' => Some(Intent::Restart),
            'w' => Some(Intent::Turn(Up)),
            'a' => Some(Intent::Turn(Left)),
            's' => Some(Intent::Turn(Down)),
            'd' => Some(Intent::Turn(Right)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    SelfHit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is over, nothing moved.
    Idle,
    Moved,
    Ate,
    Crashed(Crash),
}

pub struct GameState<R> {
    width: i16,
    height: i16,
    rng: R,
    snake: Snake,
    food: Coords,
    score: u32,
    tick_ms: u64,
    game_over: bool,
    quit: bool,
}

impl<R: RandomSource> GameState<R> {
    pub fn new(width: i16, height: i16, rng: R) -> Self {
        let mut state = GameState {
            width,
            height,
            rng,
            snake: Snake::new((width / 2, height / 2), INITIAL_SNAKE_LENGTH, Right),
            food: (0, 0),
            score: 0,
            tick_ms: INITIAL_TICK_MS,
            game_over: false,
            quit: false,
        };
        state.reset();
        state
    }

    pub fn reset(&mut self) {
        let center = (self.width / 2, self.height / 2);

        self.snake = Snake::new(center, INITIAL_SNAKE_LENGTH, Right);
        self.score = 0;
        self.tick_ms = INITIAL_TICK_MS;
        self.game_over = false;
        self.quit = false;
        self.spawn_food();

        info!(width = self.width, height = self.height, "new game");
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Quit => {
                info!(score = self.score, "quit requested");
                self.quit = true;
            },
            Intent::Restart if self.game_over => {
                info!(score = self.score, "restarting");
                self.reset();
            },
            Intent::Turn(dir) if !self.game_over => {
                if !self.snake.set_direction(dir) {
                    trace!(?dir, current = ?self.snake.direction(), "reverse turn ignored");
                }
            },
            _ => {}
        }
    }

    /// Advances the snake one cell in its current direction.
    pub fn step(&mut self) -> StepOutcome {
        if self.game_over {
            return StepOutcome::Idle;
        }

        let next = self.snake.next_head();

        let crash = if self.hits_wall(next) {
            Some(Crash::Wall)
        } else if self.snake.contains(&next) {
            Some(Crash::SelfHit)
        } else {
            None
        };

        if let Some(cause) = crash {
            info!(?cause, score = self.score, length = self.snake.len(), "game over");
            self.game_over = true;
            return StepOutcome::Crashed(cause);
        }

        let ate = next == self.food;
        self.snake.advance(next, ate);

        if !ate {
            return StepOutcome::Moved;
        }

        self.score += FOOD_REWARD;
        self.tick_ms = self.tick_ms.saturating_sub(TICK_STEP_MS).max(MIN_TICK_MS);
        debug!(score = self.score, tick_ms = self.tick_ms, "food eaten");

        if !self.spawn_food() {
            info!(score = self.score, "board is full");
            self.game_over = true;
        }

        StepOutcome::Ate
    }

    /// Places food on a random free interior cell. Returns false when no free cell exists.
    fn spawn_food(&mut self) -> bool {
        let interior = (self.width - 2).max(0) as usize * (self.height - 2).max(0) as usize;
        if self.snake.len() >= interior {
            return false;
        }

        // Rejection sampling; terminates with probability 1 while a free cell exists.
        loop {
            let pos = (
                self.rng.next_int(1, self.width - 2),
                self.rng.next_int(1, self.height - 2),
            );

            if !self.snake.contains(&pos) {
                trace!(?pos, "food placed");
                self.food = pos;
                return true;
            }
        }
    }
}

impl<R> GameState<R> {
    fn hits_wall(&self, pos: Coords) -> bool {
        pos.0 <= 0 || pos.0 >= self.width - 1 || pos.1 <= 0 || pos.1 >= self.height - 1
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[cfg(test)]
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }
}

/// Level-based scheduling: a tick is due once `interval` has passed since `last`.
pub fn tick_due(last: Instant, now: Instant, interval: Duration) -> bool {
    now.saturating_duration_since(last) >= interval
}

/// Runs until a quit intent arrives: poll one key, maybe tick, draw, sleep.
pub fn run<T, R>(state: &mut GameState<R>, term: &mut T) -> Result<()>
where
    T: InputSource + Renderer,
    R: RandomSource,
{
    let mut last_tick = Instant::now();

    while !state.should_quit() {
        if let Some(intent) = term.poll_key().and_then(Intent::from_key) {
            state.apply(intent);
        }

        let now = Instant::now();
        if tick_due(last_tick, now, state.tick_interval()) {
            state.step();
            last_tick = now;
        }

        term.draw(&Frame::of(state).into_lines())?;
        sleep(Duration::from_millis(FRAME_SLEEP_MS));
    }

    Ok(())
}
