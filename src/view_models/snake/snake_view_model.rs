use log::{debug, info};

use crate::{
    app::{Message, SnakeParams},
    models::snake::{
        snake_bot::SnakeBotType,
        snake_game::{SnakeError, SnakeGame},
        snake_player::{ControlMode, SnakePlayer},
    },
    view_model::ViewModel,
};

/// Owns one session and composes the player (or bot) with the simulation.
#[derive(Debug)]
pub struct SnakeViewModel {
    game: SnakeGame,
    player: SnakePlayer,
}

impl SnakeViewModel {
    /// Creates a new view model with the given paramters.
    ///
    /// # Errors
    ///
    /// If the board size is invalid and a [`SnakeGame`] cannot
    /// be created, returns a [`SnakeError`].
    pub fn new(params: &SnakeParams) -> Result<Self, SnakeError> {
        debug!("New SnakeViewModel params: {:#?}", params);
        let game = match params.seed {
            Some(seed) => SnakeGame::with_seed(params.width, params.height, seed)?,
            None => SnakeGame::new(params.width, params.height)?,
        };
        let mode = if params.autoplay {
            ControlMode::AutoPlay
        } else {
            ControlMode::Manual
        };
        let player = SnakePlayer::new(mode, SnakeBotType::AStarBot.make_new_bot());
        Ok(Self { game, player })
    }

    #[must_use]
    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut SnakeGame {
        &mut self.game
    }

    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.player.mode()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.game.is_game_over() || self.player.quit_requested()
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        match message {
            Message::Key(key) => self.player.push_key(key, self.game.heading()),
            Message::Tick => {
                if !self.is_finished() {
                    let heading = self.player.next_heading(&self.game);
                    self.game.tick(heading);
                }
            }
            Message::GameOver(_) => (),
        }
        if self.is_finished() {
            info!("Session over with score {}", self.game.score());
            return Some(Message::GameOver(self.game.score()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snake::snake_game::{Heading, Position, MAX_TAIL_LEN};

    fn params(autoplay: bool) -> SnakeParams {
        let _ = env_logger::builder().is_test(true).try_init();
        SnakeParams {
            autoplay,
            seed: Some(4),
            ..SnakeParams::default()
        }
    }

    #[test]
    fn rejects_bad_params() {
        let params = SnakeParams {
            width: 1,
            ..params(false)
        };
        assert!(SnakeViewModel::new(&params).is_err());
    }

    #[test]
    fn manual_session_steers_into_the_wall() {
        let mut view_model = SnakeViewModel::new(&params(false)).unwrap();
        assert_eq!(view_model.mode(), ControlMode::Manual);
        assert_eq!(view_model.update(Message::Key('a')), None);
        let mut outcome = None;
        for _ in 0..5 {
            outcome = view_model.update(Message::Tick);
        }
        assert!(view_model.game().is_game_over());
        assert_eq!(view_model.game().head(), Position::new(0, 5));
        assert_eq!(outcome, Some(Message::GameOver(view_model.game().score())));
    }

    #[test]
    fn no_key_means_no_movement() {
        let mut view_model = SnakeViewModel::new(&params(false)).unwrap();
        assert_eq!(view_model.update(Message::Tick), None);
        assert_eq!(view_model.game().head(), Position::new(5, 5));
        assert_eq!(view_model.game().heading(), Heading::None);
    }

    #[test]
    fn quitting_finishes_the_session() {
        let mut view_model = SnakeViewModel::new(&params(true)).unwrap();
        assert_eq!(
            view_model.update(Message::Key('x')),
            Some(Message::GameOver(0))
        );
        let head = view_model.game().head();
        view_model.update(Message::Tick);
        assert_eq!(view_model.game().head(), head);
    }

    #[test]
    fn autoplay_eats_fruit() {
        let mut view_model = SnakeViewModel::new(&params(true)).unwrap();
        let mut ticks = 0;
        while view_model.game().score() < 50 && !view_model.is_finished() && ticks < 2_000 {
            let fruit = view_model.game().fruit();
            let head = view_model.game().head();
            view_model.update(Message::Tick);
            ticks += 1;
            if !view_model.game().is_game_over() {
                assert_eq!(view_model.game().head().manhattan(head), 1);
                assert!(!view_model.game().body().contains(&view_model.game().head()));
                if view_model.game().head() == fruit {
                    assert_ne!(view_model.game().fruit(), fruit);
                }
            }
            assert!(view_model.game().body().len() <= MAX_TAIL_LEN);
        }
        // an empty 10x10 board always leaves the first few fruits reachable
        assert!(view_model.game().score() >= 10);
    }
}
