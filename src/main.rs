use std::{
    error::Error,
    io::{self, BufRead, Write},
};

use crossterm::{
    cursor::{Hide, Show},
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, error};
use rustsnake::{
    app::{self, SnakeParams},
    view_models::snake::snake_view_model::SnakeViewModel,
    views::snake::snake_game_screen::SnakeGameScreen,
};
use tokio::sync::mpsc::{self, UnboundedSender};

fn prompt(question: &str) -> io::Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Forwards key presses from the terminal until the session stops listening.
async fn forward_keys(sender: UnboundedSender<char>) {
    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(c) = app::key_to_char(key) {
                    if sender.send(c).is_err() {
                        return;
                    }
                }
            }
            Ok(_) => (),
            Err(e) => {
                error!("Error reading terminal events: {e}");
                return;
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    execute!(io::stdout(), Show)?;
    disable_raw_mode()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("rustsnake=warn"))
        .init();
    debug!("Debug on");

    let player_name = prompt("Enter your name: ")?;
    let choice = prompt("\nChoose mode:\n1. Manual Control\n2. AI AutoPlay\nChoice: ")?;
    let params = SnakeParams {
        player_name,
        autoplay: choice == "2",
        ..SnakeParams::default()
    };
    let screen = SnakeGameScreen::new(SnakeViewModel::new(&params)?, params.player_name.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, Hide) {
        restore_terminal()?;
        return Err(e.into());
    }

    let (sender, receiver) = mpsc::unbounded_channel();
    let key_task = tokio::spawn(forward_keys(sender));

    let result =
        app::run_session(screen, params.millis_between_frames, receiver, &mut stdout).await;
    key_task.abort();
    restore_terminal()?;
    result?;
    Ok(())
}
