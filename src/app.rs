use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    terminal::{Clear, ClearType},
};
use log::info;
use tokio::{
    sync::mpsc::UnboundedReceiver,
    time::{self, Interval, MissedTickBehavior},
};

use crate::{
    models::snake::snake_game::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MILLIS_BETWEEN_FRAMES},
    view::View,
    views::snake::snake_game_screen::SnakeGameScreen,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Key(char),
    Tick,
    GameOver(u32),
}

#[derive(Clone, Debug)]
pub struct SnakeParams {
    pub player_name: String,
    pub width: i32,
    pub height: i32,
    pub autoplay: bool,
    pub millis_between_frames: u64,
    /// Fixed seed for fruit placement, system entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SnakeParams {
    fn default() -> Self {
        Self {
            player_name: String::from("Player"),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            autoplay: false,
            millis_between_frames: MILLIS_BETWEEN_FRAMES,
            seed: None,
        }
    }
}

/// Translates a terminal key press into the key the session understands.
///
/// Arrow keys map onto `wasd` and Ctrl+C onto `x`, since raw mode swallows the signal.
#[must_use]
pub fn key_to_char(key: KeyEvent) -> Option<char> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some('x');
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Left => Some('a'),
        KeyCode::Right => Some('d'),
        KeyCode::Up => Some('w'),
        KeyCode::Down => Some('s'),
        _ => None,
    }
}

/// Frame timer that waits a full frame after a stall instead of catching up.
#[must_use]
pub fn frame_interval(millis_between_frames: u64) -> Interval {
    let mut frames = time::interval(Duration::from_millis(millis_between_frames.max(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    frames
}

fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Drives a session at a fixed frame rate until it ends and returns the final score.
///
/// Keys that arrived since the last frame are applied before every tick. Lines end
/// in `\r\n` because the terminal is in raw mode while playing.
///
/// # Errors
///
/// Returns any error from writing frames to `out`.
pub async fn run_session<W: Write>(
    mut screen: SnakeGameScreen,
    millis_between_frames: u64,
    mut keys: UnboundedReceiver<char>,
    out: &mut W,
) -> io::Result<u32> {
    let mut frames = frame_interval(millis_between_frames);
    loop {
        frames.tick().await;
        while let Ok(key) = keys.try_recv() {
            screen.update(Message::Key(key));
        }
        let outcome = screen.update(Message::Tick);
        clear(out)?;
        write!(out, "{}", screen.view().replace('\n', "\r\n"))?;
        out.flush()?;

        if let Some(Message::GameOver(score)) = outcome {
            clear(out)?;
            write!(out, "Game Over!\r\n")?;
            write!(out, "{}'s Final Score: {score}\r\n", screen.player_name())?;
            out.flush()?;
            info!("{} finished with {score}", screen.player_name());
            return Ok(score);
        }
    }
}
