//! Module for turning key presses into headings for the [`SnakeGame`].
use std::fmt;

use log::{debug, info};

use super::{
    snake_bot::SnakeBot,
    snake_game::{Heading, SnakeGame},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    Manual,
    AutoPlay,
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMode::Manual => write!(f, "Manual"),
            ControlMode::AutoPlay => write!(f, "AI (AutoPlay)"),
        }
    }
}

/// The person (or bot) steering the snake.
#[derive(Debug)]
pub struct SnakePlayer {
    mode: ControlMode,
    requested: Heading,
    quit_requested: bool,
    bot: Box<dyn SnakeBot>,
}

impl SnakePlayer {
    #[must_use]
    pub fn new(mode: ControlMode, bot: Box<dyn SnakeBot>) -> Self {
        Self {
            mode,
            requested: Heading::None,
            quit_requested: false,
            bot,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Handles one key. `current` is the heading the snake is moving in right now.
    ///
    /// `wasd` steer in manual mode but can never turn the snake straight around,
    /// `p` switches between manual and autoplay and `x` quits.
    pub fn push_key(&mut self, key: char, current: Heading) {
        let heading = match key.to_ascii_lowercase() {
            'p' => {
                self.mode = match self.mode {
                    ControlMode::Manual => ControlMode::AutoPlay,
                    ControlMode::AutoPlay => ControlMode::Manual,
                };
                self.requested = current;
                info!("Switched to {} mode", self.mode);
                return;
            }
            'x' => {
                info!("Quit requested");
                self.quit_requested = true;
                return;
            }
            'a' => Heading::Left,
            'd' => Heading::Right,
            'w' => Heading::Up,
            's' => Heading::Down,
            _ => return,
        };
        if self.mode == ControlMode::AutoPlay {
            return;
        }
        if heading == current.get_opposite() {
            debug!("Ignoring {heading:?}, snake is heading {current:?}");
            return;
        }
        self.requested = heading;
    }

    /// Heading to feed into the next [`SnakeGame::tick`].
    pub fn next_heading(&mut self, game: &SnakeGame) -> Heading {
        if self.mode == ControlMode::AutoPlay {
            self.requested = self.bot.make_move(&game.snapshot());
        }
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snake::{bots::a_star_bot::AStarBot, snake_game::Position};

    fn player(mode: ControlMode) -> SnakePlayer {
        SnakePlayer::new(mode, Box::new(AStarBot::new()))
    }

    fn game() -> SnakeGame {
        let _ = env_logger::builder().is_test(true).try_init();
        SnakeGame::with_seed(10, 10, 9).unwrap()
    }

    #[test]
    fn maps_wasd() {
        let game = game();
        let mut player = player(ControlMode::Manual);
        for (key, heading) in [
            ('a', Heading::Left),
            ('W', Heading::Up),
            ('d', Heading::Right),
            ('s', Heading::Down),
        ] {
            player.push_key(key, Heading::None);
            assert_eq!(player.next_heading(&game), heading);
        }
        player.push_key('q', Heading::None);
        assert_eq!(player.next_heading(&game), Heading::Down);
    }

    #[test]
    fn refuses_to_reverse() {
        let game = game();
        let mut player = player(ControlMode::Manual);
        player.push_key('d', Heading::None);
        player.push_key('a', Heading::Right);
        assert_eq!(player.next_heading(&game), Heading::Right);
        player.push_key('w', Heading::Right);
        assert_eq!(player.next_heading(&game), Heading::Up);
    }

    #[test]
    fn autoplay_ignores_direction_keys() {
        let mut game = game();
        game.set_state(Position::new(5, 5), &[], Heading::None, Position::new(5, 2));
        let mut player = player(ControlMode::AutoPlay);
        player.push_key('s', Heading::None);
        assert_eq!(player.next_heading(&game), Heading::Up);
    }

    #[test]
    fn toggle_switches_modes_and_keeps_heading() {
        let mut game = game();
        game.set_state(Position::new(5, 5), &[], Heading::Left, Position::new(8, 5));
        let mut player = player(ControlMode::Manual);
        player.push_key('p', Heading::Left);
        assert_eq!(player.mode(), ControlMode::AutoPlay);
        assert_eq!(player.next_heading(&game), Heading::Right);
        player.push_key('P', Heading::Down);
        assert_eq!(player.mode(), ControlMode::Manual);
        assert_eq!(player.next_heading(&game), Heading::Down);
    }

    #[test]
    fn x_quits_in_either_mode() {
        let mut player = player(ControlMode::AutoPlay);
        assert!(!player.quit_requested());
        player.push_key('x', Heading::Up);
        assert!(player.quit_requested());
    }

    #[test]
    fn mode_labels() {
        assert_eq!(ControlMode::Manual.to_string(), "Manual");
        assert_eq!(ControlMode::AutoPlay.to_string(), "AI (AutoPlay)");
    }
}
