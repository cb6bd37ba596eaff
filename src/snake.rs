use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn offset(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Snake body, front is the head and back is the tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    /// Builds a straight snake with its head at `pos`, trailing away from `direction`.
    pub fn new(pos: Coords, size: i16, direction: Direction) -> Self {
        let diff = direction.offset();

        let body = (0..size)
            .map(|i| (pos.0 - diff.0 * i, pos.1 - diff.1 * i))
            .collect();
        Snake { body, direction }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Coords], direction: Direction) -> Self {
        Snake { body: cells.iter().copied().collect(), direction }
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coords {
        // The body is never emptied: advance() pushes before it pops.
        self.body.front().copied().unwrap_or_default()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns false when the turn is rejected for reversing into the body.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn next_head(&self) -> Coords {
        let head = self.head();
        let (dx, dy) = self.direction.offset();
        (head.0 + dx, head.1 + dy)
    }

    /// Pushes `new_head` and drops the tail unless the snake grows this step.
    pub fn advance(&mut self, new_head: Coords, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }
}
