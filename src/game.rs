use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::food::spawn_food;
use crate::input::Direction;
use crate::random::RandomSource;
use crate::snake::{Cell, Snake};

/// Lifecycle phase of a session: `Ready -> Playing -> Ended -> Ready`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Ready,
    Playing,
    Ended,
}

/// What ended the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Result of one [`GameEngine::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Nothing,
    AteFood,
    GameOver(DeathReason),
}

/// Output of [`GameEngine::reset`]: the value to persist, if the best score rose.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ResetOutcome {
    pub new_high_score: Option<u32>,
}

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub heading: Direction,
    pub score: u32,
    pub high_score: u32,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
}

/// Derived per-session figures shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub snake_length: usize,
    pub food: Option<Cell>,
    pub heading: Direction,
    pub is_active: bool,
    /// Share of the grid covered by the snake, `0.0..=100.0`.
    pub coverage_percent: f64,
}

/// Snake simulation engine.
///
/// The engine never schedules its own ticks: a driver calls [`tick`](Self::tick)
/// at a fixed cadence while the phase is [`GamePhase::Playing`] and may call
/// [`set_direction`](Self::set_direction) any number of times in between.
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    config: EngineConfig,
    phase: GamePhase,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    high_score: u32,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Creates an engine seeded from system entropy.
    pub fn new(config: EngineConfig, high_score: u32) -> Result<Self, EngineError> {
        Self::with_rng(config, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible sessions.
    pub fn new_with_seed(
        config: EngineConfig,
        high_score: u32,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::with_rng(config, high_score, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Creates an engine in the `Ready` phase using `rng` for food placement.
    ///
    /// `high_score` is the previously persisted best score (0 when none exists).
    pub fn with_rng(config: EngineConfig, high_score: u32, rng: R) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self {
            config,
            phase: GamePhase::Ready,
            snake: initial_snake(&config),
            food: None,
            score: 0,
            high_score,
            tick_count: 0,
            death_reason: None,
            rng,
        })
    }

    /// Creates an engine already `Playing` on a preset board.
    ///
    /// Every segment must lie on the grid without overlaps, and `food`, when
    /// given, must be a free cell. Without `food` one is spawned.
    pub fn with_board(
        config: EngineConfig,
        high_score: u32,
        rng: R,
        snake: Snake,
        food: Option<Cell>,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::with_rng(config, high_score, rng)?;
        let bounds = config.grid();

        let mut seen = Vec::with_capacity(snake.len());
        for segment in snake.segments() {
            if !segment.is_within_bounds(bounds) || seen.contains(segment) {
                return Err(EngineError::InvalidConfig(format!(
                    "snake segment ({}, {}) is off the grid or overlaps another segment",
                    segment.x, segment.y
                )));
            }
            seen.push(*segment);
        }

        let food = match food {
            Some(cell) if !cell.is_within_bounds(bounds) || snake.occupies(cell) => {
                return Err(EngineError::InvalidConfig(format!(
                    "food ({}, {}) must be a free cell on the grid",
                    cell.x, cell.y
                )));
            }
            Some(cell) => cell,
            None => spawn_food(&mut engine.rng, bounds, &snake)?,
        };

        engine.snake = snake;
        engine.food = Some(food);
        engine.phase = GamePhase::Playing;
        Ok(engine)
    }

    /// Begins a session from `Ready` or `Ended`. A no-op while already `Playing`.
    ///
    /// On error the engine keeps its previous phase and board.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.phase == GamePhase::Playing {
            debug!("start ignored: session already running");
            return Ok(());
        }

        let snake = initial_snake(&self.config);
        let food = spawn_food(&mut self.rng, self.config.grid(), &snake)?;

        self.snake = snake;
        self.food = Some(food);
        self.score = 0;
        self.tick_count = 0;
        self.death_reason = None;
        self.phase = GamePhase::Playing;

        info!("session started, food at ({}, {})", food.x, food.y);
        Ok(())
    }

    /// Returns to `Ready` from any phase, folding the session score into the
    /// high score. Emits the new high score only when it increased.
    pub fn reset(&mut self) -> ResetOutcome {
        let best = self.score.max(self.high_score);
        let new_high_score = (best > self.high_score).then_some(best);
        if let Some(value) = new_high_score {
            info!("new high score {value} (previous {})", self.high_score);
        }

        self.high_score = best;
        self.snake = initial_snake(&self.config);
        self.food = None;
        self.score = 0;
        self.tick_count = 0;
        self.death_reason = None;
        self.phase = GamePhase::Ready;

        debug!("session reset");
        ResetOutcome { new_high_score }
    }

    /// Queues a turn for the next tick.
    ///
    /// Ignored outside `Playing`. The exact opposite of the current heading is
    /// rejected; any accepted turn overwrites the previously queued one.
    /// Returns whether the turn was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }

        let accepted = self.snake.queue_direction(direction);
        if accepted {
            debug!("direction queued: {direction:?}");
        } else {
            debug!(
                "direction {direction:?} rejected against heading {:?}",
                self.snake.heading()
            );
        }
        accepted
    }

    /// Advances the simulation by one cell.
    ///
    /// Returns [`TickOutcome::Nothing`] without touching state outside `Playing`.
    /// A collision leaves the snake and score as they were and removes the food.
    /// Fails only when food cannot be placed after growth; the session is then
    /// ended with no food on the board.
    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if self.phase != GamePhase::Playing {
            return Ok(TickOutcome::Nothing);
        }

        self.tick_count += 1;
        let bounds = self.config.grid();
        let next_head = self.snake.next_head();

        // Checked against the pre-move body, tail included.
        let collision = if !next_head.is_within_bounds(bounds) {
            Some(DeathReason::Wall)
        } else if self.snake.occupies(next_head) {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        self.snake.commit_heading();

        if let Some(reason) = collision {
            self.phase = GamePhase::Ended;
            self.food = None;
            self.death_reason = Some(reason);
            info!(
                "game over after {} ticks: {reason:?}, score {}",
                self.tick_count, self.score
            );
            return Ok(TickOutcome::GameOver(reason));
        }

        let ate_food = self.food == Some(next_head);
        self.snake.advance(next_head, ate_food);
        if !ate_food {
            return Ok(TickOutcome::Nothing);
        }

        self.score = self.score.saturating_add(self.config.score_increment);
        debug!("food eaten, score {}", self.score);

        match spawn_food(&mut self.rng, bounds, &self.snake) {
            Ok(cell) => {
                self.food = Some(cell);
                Ok(TickOutcome::AteFood)
            }
            Err(error) => {
                self.food = None;
                self.phase = GamePhase::Ended;
                Err(error)
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score known to the engine. Only changes inside [`reset`](Self::reset).
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True when the running or finished session beats the stored best.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.score > self.high_score
    }

    /// Copies the renderable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            heading: self.snake.heading(),
            score: self.score,
            high_score: self.high_score,
            tick_count: self.tick_count,
            death_reason: self.death_reason,
        }
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        let total = self.config.grid().total_cells();
        let coverage_percent = if total == 0 {
            0.0
        } else {
            self.snake.len() as f64 / total as f64 * 100.0
        };

        SessionStats {
            snake_length: self.snake.len(),
            food: self.food,
            heading: self.snake.heading(),
            is_active: self.phase == GamePhase::Playing,
            coverage_percent,
        }
    }
}

fn initial_snake(config: &EngineConfig) -> Snake {
    Snake::new(config.start_cell(), config.initial_heading)
}
