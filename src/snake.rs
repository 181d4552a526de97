use std::collections::VecDeque;

use log::debug;

use crate::{Coord, BOARD_SIZE, CELL_SIZE};
use crate::segment::Segment;
use Direction::*;

/// Row and column of the last cell on the board. Touching it is lethal, same as touching 0.
const LAST_CELL: Coord = BOARD_SIZE - CELL_SIZE;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// (row, col) step of one cell in this direction.
    fn delta(self) -> (Coord, Coord) {
        match self {
            Up => (-CELL_SIZE, 0),
            Down => (CELL_SIZE, 0),
            Left => (0, -CELL_SIZE),
            Right => (0, CELL_SIZE),
        }
    }
}

pub struct Snake {
    body: VecDeque<Segment>,
    position: (Coord, Coord),
    direction: Direction,
}

impl Snake {
    /// Builds a straight snake of `size` segments with its head at `pos`,
    /// trailing away from `direction`.
    pub fn new(pos: (Coord, Coord), size: usize, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size.max(1) as Coord)
            .map(|i| Segment::new(pos.0 - diff.0 * i, pos.1 - diff.1 * i))
            .collect();
        Snake { body, position: pos, direction }
    }

    pub fn body(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> &Segment {
        &self.body[0]
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn change_direction(&mut self, new_direction: Direction) {
        if new_direction == self.direction.reverse() {
            debug!("Ignoring reverse turn {:?} while heading {:?}", new_direction, self.get_direction());
            return;
        }
        self.direction = new_direction;
    }

    /// Steps the head one cell along the heading and drops the tail.
    pub fn move_step(&mut self) {
        let diff = self.direction.delta();
        self.position = (self.position.0 + diff.0, self.position.1 + diff.1);

        self.body.push_front(Segment::new(self.position.0, self.position.1));
        self.body.pop_back();
    }

    /// Adds a segment on top of the current head. It separates from the head
    /// on the next move, since the tail is only dropped by `move_step`.
    pub fn grow(&mut self) {
        self.body.push_front(Segment::new(self.position.0, self.position.1));
    }

    pub fn is_collision(&self) -> bool {
        let head = self.head();

        if head.row() <= 0 || head.col() <= 0 || head.row() >= LAST_CELL || head.col() >= LAST_CELL {
            return true;
        }

        self.body.iter().skip(1).any(|seg| seg.same_cell(head))
    }
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new((200, 200), 5, Right)
    }
}
