use crate::{Coord, TermInt, BOARD_SIZE, CELL_SIZE, GRID_CELLS};
use crate::segment::Rgb;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyModifiers, poll, read};

/// Terminal columns used to draw one board cell, so cells come out roughly square.
const COLS_PER_CELL: TermInt = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    KeyDown(Key),
    Quit,
}

/// What the game loop needs from a display.
pub trait Surface {
    fn fill_background(&mut self, rgb: Rgb) -> Result<()>;

    /// Fills a `w` x `h` rectangle whose top-left corner is at (`x`, `y`), in board units.
    fn draw_rect(&mut self, rgb: Rgb, x: Coord, y: Coord, w: Coord, h: Coord) -> Result<()>;

    fn draw_text(&mut self, rgb: Rgb, x: Coord, y: Coord, text: &str) -> Result<()>;

    /// Everything queued since the last call, without waiting for more.
    fn poll_events(&mut self) -> Result<Vec<Event>>;

    fn present(&mut self) -> Result<()>;
}

pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    /// Takes over the terminal for a `width` x `height` board.
    /// Fails without touching the screen if the terminal can't fit it.
    pub fn create_display(width: Coord, height: Coord, title: &str) -> Result<Self> {
        let (cols, rows) = terminal::size().context("Error reading terminal size")?;
        let needed = (to_term_col(width), to_term_row(height));

        if cols < needed.0 || rows < needed.1 {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                cols, rows, needed.0, needed.1
            );
        }

        let mut manager = TermManager { stdout: stdout(), active: false };
        manager.setup(title)?;
        Ok(manager)
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        execute!(self.stdout, style::ResetColor, cursor::Show, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn setup(&mut self, title: &str) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.active = true;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(
            self.stdout,
            cursor::Hide,
            terminal::SetTitle(title),
            terminal::Clear(ClearType::All)
        ).context("Error preparing screen")?;
        Ok(())
    }
}

impl Surface for TermManager {
    fn fill_background(&mut self, rgb: Rgb) -> Result<()> {
        self.draw_rect(rgb, 0, 0, BOARD_SIZE, BOARD_SIZE)
    }

    fn draw_rect(&mut self, rgb: Rgb, x: Coord, y: Coord, w: Coord, h: Coord) -> Result<()> {
        let first_col = clamp_cell(x);
        let first_row = clamp_cell(y);
        let last_col = clamp_cell(x + w);
        let last_row = clamp_cell(y + h);
        if first_col >= last_col || first_row >= last_row {
            return Ok(());
        }

        let line = " ".repeat(((last_col - first_col) as TermInt * COLS_PER_CELL) as usize);
        queue!(self.stdout, style::SetBackgroundColor(to_color(rgb)))?;
        for row in first_row..last_row {
            queue!(
                self.stdout,
                cursor::MoveTo(first_col as TermInt * COLS_PER_CELL, row as TermInt),
                style::Print(&line)
            )?;
        }
        Ok(())
    }

    fn draw_text(&mut self, rgb: Rgb, x: Coord, y: Coord, text: &str) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(to_term_col(x), to_term_row(y)),
            style::SetBackgroundColor(style::Color::Reset),
            style::SetForegroundColor(to_color(rgb)),
            style::Print(text),
            style::ResetColor
        )?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<Event>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("Error polling input")? {
            if let TermEvent::Key(ev) = read().context("Error reading input")? {
                if let Some(ev) = translate_key(&ev) {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn translate_key(ev: &KeyEvent) -> Option<Event> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => Some(Event::Quit),
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Up => Some(Event::KeyDown(Key::Up)),
            KeyCode::Down => Some(Event::KeyDown(Key::Down)),
            KeyCode::Left => Some(Event::KeyDown(Key::Left)),
            KeyCode::Right => Some(Event::KeyDown(Key::Right)),
            KeyCode::Esc => Some(Event::KeyDown(Key::Escape)),
            _ => None,
        }
    }
}

fn clamp_cell(units: Coord) -> Coord {
    (units / CELL_SIZE).max(0).min(GRID_CELLS)
}

fn to_term_col(units: Coord) -> TermInt {
    clamp_cell(units) as TermInt * COLS_PER_CELL
}

fn to_term_row(units: Coord) -> TermInt {
    clamp_cell(units) as TermInt
}

fn to_color((r, g, b): Rgb) -> style::Color {
    style::Color::Rgb { r, g, b }
}
