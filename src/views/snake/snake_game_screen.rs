use std::fmt::Write;

use crate::{
    app::Message,
    models::snake::snake_game::Position,
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::SnakeViewModel,
};

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
    player_name: String,
}

impl SnakeGameScreen {
    #[must_use]
    pub fn new(view_model: SnakeViewModel, player_name: String) -> Self {
        Self {
            view_model,
            player_name,
        }
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> String {
        let game = self.view_model.game();
        let border = "-".repeat(usize::try_from(game.width() + 2).unwrap_or_default());

        let mut frame = String::new();
        frame.push_str(&border);
        frame.push('\n');
        for y in 0..game.height() {
            for x in 0..=game.width() {
                let cell = Position::new(x, y);
                let symbol = if x == 0 || x == game.width() {
                    '|'
                } else if cell == game.head() {
                    'O'
                } else if cell == game.fruit() {
                    '#'
                } else if game.body().contains(&cell) {
                    'o'
                } else {
                    ' '
                };
                frame.push(symbol);
            }
            frame.push('\n');
        }
        frame.push_str(&border);
        frame.push('\n');
        let _ = writeln!(frame, "{}'s Score: {}", self.player_name, game.score());
        let _ = writeln!(frame, "Mode: {} | Press 'p' to toggle", self.view_model.mode());
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::SnakeParams, models::snake::snake_game::Heading};

    fn screen(width: i32, height: i32) -> SnakeGameScreen {
        let _ = env_logger::builder().is_test(true).try_init();
        let params = SnakeParams {
            player_name: String::from("Ada"),
            width,
            height,
            seed: Some(0),
            ..SnakeParams::default()
        };
        SnakeGameScreen::new(SnakeViewModel::new(&params).unwrap(), params.player_name)
    }

    #[test]
    fn renders_walls_snake_and_fruit() {
        let mut screen = screen(5, 3);
        screen.view_model.game_mut().set_state(
            Position::new(2, 1),
            &[Position::new(1, 1)],
            Heading::Right,
            Position::new(3, 1),
        );
        let expected = "-------\n\
                        |    |\n\
                        |oO# |\n\
                        |    |\n\
                        -------\n\
                        Ada's Score: 0\n\
                        Mode: Manual | Press 'p' to toggle\n";
        assert_eq!(screen.view(), expected);
    }

    #[test]
    fn shows_autoplay_after_toggle() {
        let mut screen = screen(10, 10);
        assert_eq!(screen.update(Message::Key('p')), None);
        let frame = screen.view();
        assert!(frame.contains("Mode: AI (AutoPlay) | Press 'p' to toggle"));
        assert_eq!(frame.lines().count(), 14);
        assert!(frame.lines().nth(6).unwrap().contains('O'));
    }
}
