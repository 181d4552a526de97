mod config;
mod food;
mod game;
mod segment;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use config::Config;
use game::{Clock, SnakeGame};
use term::TermManager;

pub type TermInt = u16;
/// Board position in units; one cell is `CELL_SIZE` units wide.
pub type Coord = i32;

pub const BOARD_SIZE: Coord = 400;
pub const CELL_SIZE: Coord = 10;
pub const GRID_CELLS: Coord = BOARD_SIZE / CELL_SIZE;
/// Food only lands on the first 20 rows and columns.
pub const FOOD_CELLS: Coord = 20;
pub const TICK_RATE_HZ: u32 = 15;

const LOG_FILE: &str = "snake.log";
const TITLE: &str = "Snake Game";

fn main() -> Result<()> {
    // The terminal is the screen, so logs go to a file
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(LOG_FILE).context("Error creating log file")?,
    )
    .context("Error initializing logger")?;

    info!("Starting snake");

    let mut term = TermManager::create_display(BOARD_SIZE, BOARD_SIZE, TITLE)?;
    let config = Config::default();
    let mut game = SnakeGame::new(config);

    let result = game.run(&mut term, &mut Clock::new(TICK_RATE_HZ));
    term.restore()?;
    let summary = result?;

    if config.track_score {
        println!("Game over! Your Score: {}", summary.score);
    } else {
        println!("Game over!");
    }
    Ok(())
}
