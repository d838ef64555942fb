pub mod bots;
pub mod snake_bot;
pub mod snake_game;
pub mod snake_player;
