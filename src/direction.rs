use crossterm::event::KeyCode;

use crate::grid::Coordinate;

/// Canonical movement directions on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, clockwise from `Up`.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Maps a key press to a direction. Anything other than the arrow keys
    /// (or WASD) yields `None` and is meant to be ignored.
    #[must_use]
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Self::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Self::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Self::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Self::Right),
            _ => None,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(row, col)` unit delta of one step.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Returns the direction of the unit step from `from` to `to`, or `None`
    /// when the two coordinates are not orthogonally adjacent.
    #[must_use]
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Self> {
        let delta = (to.row - from.row, to.col - from.col);
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// Returns whether switching to `next` would turn the snake back onto its
/// own body. A single-cell snake may turn around freely.
#[must_use]
pub fn would_reverse(next: Direction, current: Direction, body_len: usize) -> bool {
    next.opposite() == current && body_len > 1
}
