use super::{
    bots::a_star_bot::AStarBot,
    snake_game::{Heading, PartialSnakeGame},
};

/// Something that can steer the snake given a copy of the board.
pub trait SnakeBot: std::fmt::Debug {
    fn make_move(&self, game_state: &PartialSnakeGame) -> Heading;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeBotType {
    AStarBot,
}

impl SnakeBotType {
    pub const VALUES: [Self; 1] = [Self::AStarBot];

    #[must_use]
    pub fn make_new_bot(&self) -> Box<dyn SnakeBot> {
        match self {
            SnakeBotType::AStarBot => Box::new(AStarBot::new()),
        }
    }
}

impl std::fmt::Display for SnakeBotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeBotType::AStarBot => write!(f, "A* Pathfinding Bot"),
        }
    }
}
