use std::io;

use thiserror::Error;

use crate::grid::Coordinate;

/// Rejected game configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size must be between {min} and {max}, got {got}")]
    BoardSize { got: u16, min: u16, max: u16 },
    #[error("reversal probability must lie in [0, 1], got {0}")]
    ReversalProbability(f64),
    #[error("tick interval must be at least 1 ms")]
    TickInterval,
}

/// Failure to read the optional settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read settings file")]
    Read(#[from] io::Error),
    #[error("failed to parse settings file")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings")]
    Invalid(#[from] ConfigError),
}

/// Explicit snake layouts that cannot form a body.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum LayoutError {
    #[error("a snake needs at least one segment")]
    Empty,
    #[error("segment at ({}, {}) lies off the board", .0.row, .0.col)]
    OutOfBounds(Coordinate),
    #[error("segment at ({}, {}) appears twice", .0.row, .0.col)]
    Duplicate(Coordinate),
    #[error("segment at ({}, {}) does not touch its predecessor", .0.row, .0.col)]
    Disconnected(Coordinate),
}
