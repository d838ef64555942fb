use std::{collections::VecDeque, fmt};

use log::{debug, info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Amount of time between two ticks when driven by the terminal loop.
pub const MILLIS_BETWEEN_FRAMES: u64 = 50;
/// Default board width.
pub const DEFAULT_WIDTH: i32 = 10;
/// Default board height.
pub const DEFAULT_HEIGHT: i32 = 10;
/// Smallest board that still has a cell where fruit can be placed.
pub const MIN_BOARD_SIZE: i32 = 3;
/// Max number of segments behind the head.
pub const MAX_TAIL_LEN: usize = 100;
/// Score added for every fruit eaten.
pub const FRUIT_REWARD: u32 = 10;

type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize { width: i32, height: i32 },
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidBoardSize { width, height } => write!(
                f,
                "board of {width}x{height} is too small, both sides must be at least {MIN_BOARD_SIZE}"
            ),
        }
    }
}

impl std::error::Error for SnakeError {}

/// A cell on the board. Signed so that a head which left the board can still be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in the given direction. [`Heading::None`] stays put.
    #[must_use]
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.value();
        Self {
            x: self.x + i32::from(dx),
            y: self.y + i32::from(dy),
        }
    }

    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Direction the snake is travelling in. `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heading {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    /// Every heading that actually moves the head.
    pub const MOVES: [Heading; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    #[must_use]
    pub fn value(self) -> (i8, i8) {
        match self {
            Heading::None => (0, 0),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> Heading {
        match self {
            Heading::None => Heading::None,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
        }
    }

    /// Maps a unit step back onto the heading that produces it.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Heading> {
        Self::MOVES
            .into_iter()
            .find(|heading| {
                let (hx, hy) = heading.value();
                (i32::from(hx), i32::from(hy)) == (dx, dy)
            })
    }
}

fn within_walls(width: i32, height: i32, pos: Position) -> bool {
    pos.x > 0 && pos.x < width && pos.y >= 0 && pos.y < height
}

/// Read-only copy of everything a bot needs to pick its next heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialSnakeGame {
    pub width: i32,
    pub height: i32,
    pub head: Position,
    pub body: Vec<Position>,
    pub fruit: Position,
    pub heading: Heading,
}

impl PartialSnakeGame {
    #[must_use]
    pub fn from_full(game: &SnakeGame) -> Self {
        Self {
            width: game.width,
            height: game.height,
            head: game.head,
            body: game.body.iter().copied().collect(),
            fruit: game.fruit,
            heading: game.heading,
        }
    }

    /// Same wall rule the simulation uses for collisions.
    #[must_use]
    pub fn is_inside(&self, pos: Position) -> bool {
        within_walls(self.width, self.height, pos)
    }

    /// A cell is blocked if it is a wall or covered by the body right now.
    /// Tail cells that will be vacated before the head gets there still count as blocked.
    #[must_use]
    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.is_inside(pos) || self.body.contains(&pos)
    }
}

/// Model of a single snake session on a fixed board.
///
/// Playable cells are `1..width` horizontally and `0..height` vertically. The
/// fruit is only ever placed in `1..width - 1` by `1..height - 1`.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    width: i32,
    height: i32,
    head: Position,
    body: VecDeque<Position>,
    heading: Heading,
    fruit: Position,
    score: u32,
    game_over: bool,
    rng: StdRng,
}

impl SnakeGame {
    /// Creates and resets a game seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if either side is below [`MIN_BOARD_SIZE`].
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Creates and resets a game whose fruit placement is reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if either side is below [`MIN_BOARD_SIZE`].
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i32, height: i32, rng: StdRng) -> Result<Self> {
        if width < MIN_BOARD_SIZE || height < MIN_BOARD_SIZE {
            return Err(SnakeError::InvalidBoardSize { width, height });
        }
        let center = Position::new(width / 2, height / 2);
        let mut game = Self {
            width,
            height,
            head: center,
            body: VecDeque::with_capacity(MAX_TAIL_LEN),
            heading: Heading::None,
            fruit: center,
            score: 0,
            game_over: false,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Puts the head back in the center with no body and a fresh fruit.
    pub fn reset(&mut self) {
        self.game_over = false;
        self.heading = Heading::None;
        self.head = Position::new(self.width / 2, self.height / 2);
        self.body.clear();
        self.score = 0;
        self.put_random_fruit();
        info!(
            "New {}x{} game, head at {:?}, fruit at {:?}",
            self.width, self.height, self.head, self.fruit
        );
    }

    fn put_random_fruit(&mut self) {
        let head = self.head;
        let body = &self.body;
        let avaliable: Vec<Position> = (1..self.height - 1)
            .flat_map(|y| (1..self.width - 1).map(move |x| Position::new(x, y)))
            .filter(|pos| *pos != head && !body.contains(pos))
            .collect();
        match avaliable.choose(&mut self.rng) {
            Some(pos) => self.fruit = *pos,
            None => warn!("No where left to place fruit, leaving it at {:?}", self.fruit),
        }
    }

    /// Advances the game by one step in the given direction.
    ///
    /// Reversals are not rejected here; moving back into the body simply ends the game.
    pub fn tick(&mut self, heading: Heading) {
        if self.game_over {
            debug!("Tried to tick after game over");
            return;
        }
        self.heading = heading;

        // shift: every segment takes the place of the one in front of it
        let old_head = self.head;
        self.body.push_front(old_head);
        let vacated = self.body.pop_back().unwrap_or(old_head);

        self.head = old_head.step(heading);

        if !self.is_inside(self.head) {
            debug!("Head hit the wall at {:?}", self.head);
            self.game_over = true;
        }
        if self.body.contains(&self.head) {
            debug!("Head ran into the body at {:?}", self.head);
            self.game_over = true;
        }

        if self.head == self.fruit {
            self.score += FRUIT_REWARD;
            if self.body.len() < MAX_TAIL_LEN {
                self.body.push_back(vacated);
            }
            debug!(
                "Ate fruit at {:?}, score {} and length {}",
                self.fruit,
                self.score,
                self.body.len()
            );
            self.put_random_fruit();
        }
    }

    #[must_use]
    pub fn is_inside(&self, pos: Position) -> bool {
        within_walls(self.width, self.height, pos)
    }

    #[must_use]
    pub fn snapshot(&self) -> PartialSnakeGame {
        PartialSnakeGame::from_full(self)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Segments ordered from the one right behind the head to the tail.
    #[must_use]
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    #[must_use]
    pub fn fruit(&self) -> Position {
        self.fruit
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[cfg(test)]
    pub(crate) fn set_state(
        &mut self,
        head: Position,
        body: &[Position],
        heading: Heading,
        fruit: Position,
    ) {
        self.head = head;
        self.body = body.iter().copied().collect();
        self.heading = heading;
        self.fruit = fruit;
    }
}
