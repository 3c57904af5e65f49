use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::grid::CellId;

/// Below this share of free cells, spawning picks from the enumerated free
/// cells instead of redrawing.
const REJECTION_MIN_FREE_SHARE: usize = 4;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: CellId,
    /// Eating this food turns the snake end-to-end.
    pub reversing: bool,
}

impl Food {
    /// Creates ordinary food on `cell`.
    #[must_use]
    pub fn regular(cell: CellId) -> Self {
        Self {
            cell,
            reversing: false,
        }
    }

    /// Creates reversal food on `cell`.
    #[must_use]
    pub fn reversing(cell: CellId) -> Self {
        Self {
            cell,
            reversing: true,
        }
    }
}

/// Spawns food on a uniformly chosen cell in `[0, max_cell)` that is neither
/// occupied nor `exclude`, and marks it reversing with probability
/// `reversal_probability`.
///
/// Returns `None` when no such cell exists. A NaN probability never
/// reverses.
pub fn spawn<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: &HashSet<CellId>,
    exclude: CellId,
    max_cell: usize,
    reversal_probability: f64,
) -> Option<Food> {
    let is_free = |cell: &CellId| !occupied.contains(cell) && *cell != exclude;

    let taken = occupied.iter().filter(|cell| cell.0 < max_cell).count()
        + usize::from(exclude.0 < max_cell && !occupied.contains(&exclude));
    let free = max_cell.saturating_sub(taken);
    if free == 0 {
        return None;
    }

    let cell = if free * REJECTION_MIN_FREE_SHARE >= max_cell {
        loop {
            let draw = CellId(rng.gen_range(0..max_cell));
            if is_free(&draw) {
                break draw;
            }
        }
    } else {
        (0..max_cell).map(CellId).filter(is_free).choose(rng)?
    };

    let reversal_probability = if reversal_probability.is_nan() {
        0.0
    } else {
        reversal_probability.clamp(0.0, 1.0)
    };
    let reversing = rng.gen_bool(reversal_probability);
    debug!("spawned food at cell {} (reversing: {reversing})", cell.0);

    Some(Food { cell, reversing })
}
