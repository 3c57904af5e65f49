use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::direction::Direction;

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// Maps one key press to a game input. Unbound keys yield `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char('r' | 'R' | ' ') | KeyCode::Enter => Some(GameInput::Restart),
        code => Direction::from_key(code).map(GameInput::Direction),
    }
}

/// Waits up to `timeout` for the next mapped input.
///
/// Returns `Ok(None)` when the timeout elapses or the event is not bound.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// Holds the direction requested since the last tick, last write wins.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct PendingDirection(Option<Direction>);

impl PendingDirection {
    /// Records a request, replacing any earlier one.
    pub fn set(&mut self, direction: Direction) {
        self.0 = Some(direction);
    }

    /// Hands the request to the tick and clears the slot.
    pub fn take(&mut self) -> Option<Direction> {
        self.0.take()
    }
}
