use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, INITIAL_FOOD_OFFSET};
use crate::direction::{Direction, would_reverse};
use crate::food::{self, Food};
use crate::grid::{CellId, Coordinate, Grid};
use crate::snake::{Advance, Collision, Snake};

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    OutOfBounds,
    SelfCollision,
    /// The snake covers the whole board, leaving nowhere to place food.
    BoardFilled,
}

impl EndReason {
    /// Returns true when the player won rather than crashed.
    #[must_use]
    pub fn is_victory(self) -> bool {
        self == Self::BoardFilled
    }
}

impl From<Collision> for EndReason {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::OutOfBounds => Self::OutOfBounds,
            Collision::SelfCollision => Self::SelfCollision,
        }
    }
}

/// What a renderer should draw on one cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellKind {
    Empty,
    Snake,
    Food,
    ReversingFood,
}

/// Complete state of one game, from start until game over.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    config: GameConfig,
    snake: Snake,
    food: Food,
    direction: Direction,
    score: u32,
    rng: StdRng,
}

/// Outcome of one [`Session::tick`].
#[derive(Debug, Clone)]
pub enum Step {
    Running(Session),
    GameOver(GameOver),
}

/// Terminal state of a session, holding the final board for display.
#[derive(Debug, Clone)]
pub struct GameOver {
    pub reason: EndReason,
    pub final_score: u32,
    session: Session,
}

impl GameOver {
    /// Returns the session as it stood when the game ended.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Starts a fresh game with the same configuration.
    #[must_use]
    pub fn reset(self) -> Session {
        info!("resetting after game over (final score {})", self.final_score);
        Session::from_rng(self.session.config, self.session.rng)
    }
}

impl Session {
    /// Creates a new game seeded from system entropy.
    ///
    /// `config` should have passed [`GameConfig::validate`]; a NaN reversal
    /// probability is treated as zero.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let grid = Grid::new(config.board_size);
        let start = start_cell(grid);
        let snake = Snake::new(grid, start);

        let offset_cell = CellId(start.0 + INITIAL_FOOD_OFFSET);
        let food = if grid.contains(offset_cell) {
            Food::regular(offset_cell)
        } else {
            // Boards of at least two cells always have a free cell; the head
            // is only a placeholder that can never be eaten.
            food::spawn(
                &mut rng,
                snake.occupied(),
                start,
                grid.total_cells(),
                config.reversal_probability,
            )
            .unwrap_or(Food::regular(start))
        };

        Self {
            grid,
            config,
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            rng,
        }
    }

    /// Replaces the snake and its travel direction.
    ///
    /// Food left under the new body is moved to a free cell.
    #[must_use]
    pub fn with_snake(mut self, snake: Snake, direction: Direction) -> Self {
        self.snake = snake;
        self.direction = direction;
        self.relocate_covered_food()
    }

    /// Replaces the current food.
    ///
    /// Food placed on the snake or off the board is moved to a free cell.
    #[must_use]
    pub fn with_food(mut self, food: Food) -> Self {
        self.food = food;
        self.relocate_covered_food()
    }

    fn relocate_covered_food(mut self) -> Self {
        let cell = self.food.cell;
        if self.grid.contains(cell) && !self.snake.occupies(cell) {
            return self;
        }

        // A snake covering every cell leaves the food where it is; the next
        // move collides before it could be eaten.
        if let Some(food) = food::spawn(
            &mut self.rng,
            self.snake.occupied(),
            self.snake.head_cell(),
            self.grid.total_cells(),
            self.config.reversal_probability,
        ) {
            debug!("moved food off cell {} to cell {}", cell.0, food.cell.0);
            self.food = food;
        }
        self
    }

    /// Advances the game by one tick.
    ///
    /// `pending` is the most recent direction the player asked for since
    /// the previous tick. It is dropped when it would turn the snake back
    /// onto itself.
    pub fn tick(mut self, pending: Option<Direction>) -> Step {
        if let Some(next) = pending {
            if !would_reverse(next, self.direction, self.snake.len()) {
                self.direction = next;
            }
        }

        if let Advance::Collided(collision) = self.snake.advance(self.grid, self.direction) {
            return self.end(collision.into());
        }

        if self.snake.head_cell() != self.food.cell {
            return Step::Running(self);
        }

        if !self.snake.grow(self.grid, self.direction) {
            warn!(
                "no room to grow behind tail at cell {}",
                self.snake.tail_cell().0
            );
        }
        if self.food.reversing {
            self.direction = self.snake.reverse(self.direction);
            debug!("snake reversed, now heading {:?}", self.direction);
        }
        self.score += 1;

        match food::spawn(
            &mut self.rng,
            self.snake.occupied(),
            self.food.cell,
            self.grid.total_cells(),
            self.config.reversal_probability,
        ) {
            Some(food) => {
                self.food = food;
                Step::Running(self)
            }
            None => self.end(EndReason::BoardFilled),
        }
    }

    fn end(self, reason: EndReason) -> Step {
        info!("game over: {reason:?} with score {}", self.score);
        Step::GameOver(GameOver {
            reason,
            final_score: self.score,
            session: self,
        })
    }

    /// Classifies `cell` for drawing.
    #[must_use]
    pub fn cell_kind(&self, cell: CellId) -> CellKind {
        if self.snake.occupies(cell) {
            CellKind::Snake
        } else if self.food.cell == cell && self.food.reversing {
            CellKind::ReversingFood
        } else if self.food.cell == cell {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    /// Iterates every cell of the board with its classification.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, CellKind)> + '_ {
        self.grid.cells().map(|cell| (cell, self.cell_kind(cell)))
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Starting cell, roughly a third of the way in on both axes.
fn start_cell(grid: Grid) -> CellId {
    let third = i32::from((grid.size() + 1) / 3);
    grid.cell_at(Coordinate::new(third, third)).unwrap_or(CellId(0))
}
