mod frame;
mod game;
mod random;
mod snake;
mod term;

use std::{env, fs::File, sync::Mutex};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use game::{GameState, GRID_HEIGHT, GRID_WIDTH};
use term::TermManager;

pub type Coords = (i16, i16);

/// The screen is the game, so logs only go to the file named by `SNAKE_LOG`.
fn init_logging() -> Result<()> {
    let Some(path) = env::var_os("SNAKE_LOG") else {
        return Ok(());
    };

    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let mut state = GameState::new(GRID_WIDTH, GRID_HEIGHT, StdRng::from_entropy());
    let mut term = TermManager::new();
    term.setup();

    let res = game::run(&mut state, &mut term);

    // Restore before anything is printed to the normal screen.
    term.restore();
    info!(score = state.score(), "exiting");
    res
}
