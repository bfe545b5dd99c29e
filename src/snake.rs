use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid coordinate in logical cell units. `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`. May leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus its heading and the single pending turn.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Direction,
    pending: Option<Direction>,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided heading.
    #[must_use]
    pub fn new(start: Cell, heading: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            heading,
            pending: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, heading: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            heading,
            pending: None,
        }
    }

    /// Stores `direction` as the turn for the next tick.
    ///
    /// Reversals of the current heading are rejected; an accepted turn replaces
    /// whatever was pending. Returns whether the turn was accepted.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.heading, direction) {
            return false;
        }

        self.pending = Some(direction);
        true
    }

    /// Returns the direction the next tick will move in.
    #[must_use]
    pub fn effective_direction(&self) -> Direction {
        self.pending.unwrap_or(self.heading)
    }

    /// Consumes the pending turn, making it the heading. Returns the new heading.
    pub fn commit_heading(&mut self) -> Direction {
        self.heading = self.effective_direction();
        self.pending = None;
        self.heading
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head(&self) -> Cell {
        self.head().step(self.effective_direction())
    }

    /// Prepends `head`; drops the tail unless `grow` is set.
    pub fn advance(&mut self, head: Cell, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the last tick.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the accepted turn not yet consumed by a tick.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
