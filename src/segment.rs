use crate::{Coord, CELL_SIZE};

pub type Rgb = (u8, u8, u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Blue,
    Black,
    Yellow,
    Background,
}

impl Color {
    pub fn rgb(self) -> Rgb {
        match self {
            Color::Blue => (0, 0, 255),
            Color::Black => (0, 0, 0),
            Color::Yellow => (255, 255, 0),
            Color::Background => (225, 225, 225),
        }
    }
}

/// A single 10x10 cell on the board, used for snake pieces and the food marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    row: Coord,
    col: Coord,
    color: Color,
}

impl Segment {
    pub const SIZE: Coord = CELL_SIZE;

    pub fn new(row: Coord, col: Coord) -> Self {
        Segment { row, col, color: Color::Blue }
    }

    pub fn row(&self) -> Coord {
        self.row
    }

    pub fn col(&self) -> Coord {
        self.col
    }

    pub fn position(&self) -> (Coord, Coord) {
        (self.row, self.col)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn same_cell(&self, other: &Segment) -> bool {
        self.position() == other.position()
    }
}
