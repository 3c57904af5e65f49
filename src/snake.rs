use std::collections::HashSet;
use std::mem;

use crate::direction::Direction;
use crate::error::LayoutError;
use crate::grid::{CellId, Coordinate, Grid};

/// One body cell, linked to its neighbours toward the head and the tail.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub coord: Coordinate,
    pub cell: CellId,
    toward_head: Option<usize>,
    toward_tail: Option<usize>,
}

/// Why an advance could not happen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    OutOfBounds,
    SelfCollision,
}

/// Result of one [`Snake::advance`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Advance {
    Moved { head: Coordinate },
    /// Nothing was mutated.
    Collided(Collision),
}

/// Snake body stored as an index-linked chain inside a slot arena.
///
/// The chain and the set of occupied cells are only ever changed together,
/// so `occupied` always equals the cells of the chain. Slots of dropped tail
/// segments are recycled by later heads and tails.
#[derive(Debug, Clone)]
pub struct Snake {
    slots: Vec<Segment>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
    occupied: HashSet<CellId>,
}

impl Snake {
    /// Creates a one-cell snake on `cell`.
    #[must_use]
    pub fn new(grid: Grid, cell: CellId) -> Self {
        let segment = Segment {
            coord: grid.coordinate_of(cell),
            cell,
            toward_head: None,
            toward_tail: None,
        };

        Self {
            slots: vec![segment],
            free: Vec::new(),
            head: 0,
            tail: 0,
            len: 1,
            occupied: HashSet::from([cell]),
        }
    }

    /// Creates a snake from explicit coordinates, head first.
    ///
    /// Every coordinate must be on the board, distinct, and orthogonally
    /// adjacent to the one before it.
    pub fn from_coordinates(grid: Grid, coords: &[Coordinate]) -> Result<Self, LayoutError> {
        if coords.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut slots = Vec::with_capacity(coords.len());
        let mut occupied = HashSet::with_capacity(coords.len());
        let last = coords.len() - 1;

        for (index, &coord) in coords.iter().enumerate() {
            let cell = grid
                .cell_at(coord)
                .ok_or(LayoutError::OutOfBounds(coord))?;
            if !occupied.insert(cell) {
                return Err(LayoutError::Duplicate(coord));
            }
            if let Some(&previous) = index.checked_sub(1).and_then(|i| coords.get(i)) {
                if Direction::between(previous, coord).is_none() {
                    return Err(LayoutError::Disconnected(coord));
                }
            }

            slots.push(Segment {
                coord,
                cell,
                toward_head: index.checked_sub(1),
                toward_tail: (index < last).then_some(index + 1),
            });
        }

        Ok(Self {
            slots,
            free: Vec::new(),
            head: 0,
            tail: last,
            len: coords.len(),
            occupied,
        })
    }

    /// Moves the head one cell in `direction` and drops the tail.
    ///
    /// Leaving the board, or entering any occupied cell (the current tail
    /// included), reports a collision and leaves the snake untouched.
    pub fn advance(&mut self, grid: Grid, direction: Direction) -> Advance {
        let next = self.head().coord.step(direction);
        let Some(cell) = grid.cell_at(next) else {
            return Advance::Collided(Collision::OutOfBounds);
        };
        if self.occupied.contains(&cell) {
            return Advance::Collided(Collision::SelfCollision);
        }

        let old_head = self.head;
        let new_head = self.alloc(Segment {
            coord: next,
            cell,
            toward_head: None,
            toward_tail: Some(old_head),
        });
        self.slots[old_head].toward_head = Some(new_head);
        self.head = new_head;
        self.occupied.insert(cell);
        self.len += 1;

        self.drop_tail();
        Advance::Moved { head: next }
    }

    /// Extends the body by one cell behind the tail.
    ///
    /// The new cell lies on the side of the tail facing away from its
    /// neighbour; a one-cell snake grows opposite to `direction`. Returns
    /// `false`, changing nothing, when that cell is off the board or taken.
    pub fn grow(&mut self, grid: Grid, direction: Direction) -> bool {
        let tail = self.slots[self.tail];
        let outward = self.segment_direction(&tail, direction).opposite();
        let coord = tail.coord.step(outward);
        let Some(cell) = grid.cell_at(coord) else {
            return false;
        };
        if self.occupied.contains(&cell) {
            return false;
        }

        let old_tail = self.tail;
        let new_tail = self.alloc(Segment {
            coord,
            cell,
            toward_head: Some(old_tail),
            toward_tail: None,
        });
        self.slots[old_tail].toward_tail = Some(new_tail);
        self.tail = new_tail;
        self.occupied.insert(cell);
        self.len += 1;
        true
    }

    /// Turns the snake end-to-end and returns its new travel direction.
    ///
    /// The old tail becomes the head and heads away from its former
    /// neighbour. Every link is flipped in one pass over the chain.
    pub fn reverse(&mut self, direction: Direction) -> Direction {
        let tail = self.slots[self.tail];
        let heading = self.segment_direction(&tail, direction).opposite();

        let mut cursor = Some(self.head);
        while let Some(index) = cursor {
            let segment = &mut self.slots[index];
            mem::swap(&mut segment.toward_head, &mut segment.toward_tail);
            cursor = segment.toward_head;
        }
        mem::swap(&mut self.head, &mut self.tail);

        heading
    }

    /// Direction from `segment` toward its neighbour on the head side, or
    /// `fallback` when `segment` is the head.
    #[must_use]
    pub fn segment_direction(&self, segment: &Segment, fallback: Direction) -> Direction {
        segment
            .toward_head
            .and_then(|index| self.slots.get(index))
            .and_then(|next| Direction::between(segment.coord, next.coord))
            .unwrap_or(fallback)
    }

    /// Returns the head segment.
    #[must_use]
    pub fn head(&self) -> &Segment {
        &self.slots[self.head]
    }

    /// Returns the tail segment.
    #[must_use]
    pub fn tail(&self) -> &Segment {
        &self.slots[self.tail]
    }

    #[must_use]
    pub fn head_cell(&self) -> CellId {
        self.head().cell
    }

    #[must_use]
    pub fn tail_cell(&self) -> CellId {
        self.tail().cell
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// A snake always has a head, so this is never true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if any segment covers `cell`.
    #[must_use]
    pub fn occupies(&self, cell: CellId) -> bool {
        self.occupied.contains(&cell)
    }

    /// Returns the set of covered cells.
    #[must_use]
    pub fn occupied(&self) -> &HashSet<CellId> {
        &self.occupied
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            snake: self,
            cursor: Some(self.head),
        }
    }

    fn alloc(&mut self, segment: Segment) -> usize {
        if let Some(index) = self.free.pop() {
            self.slots[index] = segment;
            index
        } else {
            self.slots.push(segment);
            self.slots.len() - 1
        }
    }

    fn drop_tail(&mut self) {
        let old_tail = self.tail;
        let Some(new_tail) = self.slots[old_tail].toward_head else {
            return;
        };

        self.slots[new_tail].toward_tail = None;
        self.tail = new_tail;
        self.occupied.remove(&self.slots[old_tail].cell);
        self.free.push(old_tail);
        self.len -= 1;
    }
}

/// Head-to-tail iterator returned by [`Snake::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    snake: &'a Snake,
    cursor: Option<usize>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.snake.slots.get(self.cursor?)?;
        self.cursor = segment.toward_tail;
        Some(segment)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Advance, Collision, Snake};
    use crate::direction::Direction;
    use crate::error::LayoutError;
    use crate::grid::{CellId, Coordinate, Grid};

    const GRID: Grid = Grid::new(10);

    fn cells(snake: &Snake) -> Vec<usize> {
        snake.segments().map(|segment| segment.cell.0).collect()
    }

    fn assert_consistent(snake: &Snake) {
        let chain: Vec<CellId> = snake.segments().map(|segment| segment.cell).collect();
        let unique: HashSet<CellId> = chain.iter().copied().collect();

        assert_eq!(chain.len(), snake.len(), "chain length drifted");
        assert_eq!(unique.len(), chain.len(), "chain holds a duplicate cell");
        assert_eq!(&unique, snake.occupied(), "occupied set drifted");
    }

    fn horizontal(cols: &[i32]) -> Snake {
        let coords: Vec<Coordinate> = cols.iter().map(|&col| Coordinate::new(3, col)).collect();
        Snake::from_coordinates(GRID, &coords).expect("layout should be valid")
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(GRID, CellId(33));

        let advance = snake.advance(GRID, Direction::Right);

        assert_eq!(
            advance,
            Advance::Moved {
                head: Coordinate::new(3, 4)
            }
        );
        assert_eq!(cells(&snake), vec![34]);
        assert_consistent(&snake);
    }

    #[test]
    fn advance_keeps_length_and_drops_tail() {
        let mut snake = horizontal(&[5, 4, 3]);

        snake.advance(GRID, Direction::Down);

        assert_eq!(cells(&snake), vec![45, 35, 34]);
        assert!(!snake.occupies(CellId(33)));
        assert_consistent(&snake);
    }

    #[test]
    fn advance_off_the_board_collides_without_mutation() {
        let mut snake = Snake::new(GRID, CellId(0));

        assert_eq!(
            snake.advance(GRID, Direction::Up),
            Advance::Collided(Collision::OutOfBounds)
        );
        assert_eq!(cells(&snake), vec![0]);
    }

    #[test]
    fn advance_into_body_collides_without_mutation() {
        // Head at (2, 2), curling back so that moving Down re-enters (3, 2).
        let coords = [
            Coordinate::new(2, 2),
            Coordinate::new(2, 3),
            Coordinate::new(3, 3),
            Coordinate::new(3, 2),
            Coordinate::new(3, 1),
        ];
        let mut snake = Snake::from_coordinates(GRID, &coords).expect("layout should be valid");

        assert_eq!(
            snake.advance(GRID, Direction::Down),
            Advance::Collided(Collision::SelfCollision)
        );
        assert_eq!(cells(&snake), vec![22, 23, 33, 32, 31]);
        assert_consistent(&snake);
    }

    #[test]
    fn moving_into_current_tail_is_a_collision() {
        let coords = [
            Coordinate::new(2, 2),
            Coordinate::new(2, 3),
            Coordinate::new(3, 3),
            Coordinate::new(3, 2),
        ];
        let mut snake = Snake::from_coordinates(GRID, &coords).expect("layout should be valid");

        assert_eq!(
            snake.advance(GRID, Direction::Down),
            Advance::Collided(Collision::SelfCollision)
        );
    }

    #[test]
    fn single_cell_snake_grows_behind_its_travel_direction() {
        let mut snake = Snake::new(GRID, CellId(33));

        assert!(snake.grow(GRID, Direction::Right));

        assert_eq!(cells(&snake), vec![33, 32]);
        assert_consistent(&snake);
    }

    #[test]
    fn growth_extends_away_from_tail_neighbour() {
        // Tail at (4, 3) hangs below (3, 3); growth continues downward.
        let coords = [
            Coordinate::new(3, 4),
            Coordinate::new(3, 3),
            Coordinate::new(4, 3),
        ];
        let mut snake = Snake::from_coordinates(GRID, &coords).expect("layout should be valid");

        assert!(snake.grow(GRID, Direction::Right));

        assert_eq!(cells(&snake), vec![34, 33, 43, 53]);
        assert_eq!(snake.tail_cell(), CellId(53));
        assert_consistent(&snake);
    }

    #[test]
    fn growth_off_the_board_is_skipped() {
        let mut snake = horizontal(&[1, 0]);

        assert!(!snake.grow(GRID, Direction::Right));

        assert_eq!(snake.len(), 2);
        assert_eq!(cells(&snake), vec![31, 30]);
        assert_consistent(&snake);
    }

    #[test]
    fn growth_into_own_body_is_skipped() {
        // Tail at (3, 3) faces (3, 4); the cell behind it, (3, 2), is body.
        let coords = [
            Coordinate::new(4, 2),
            Coordinate::new(3, 2),
            Coordinate::new(2, 2),
            Coordinate::new(2, 3),
            Coordinate::new(2, 4),
            Coordinate::new(3, 4),
            Coordinate::new(3, 3),
        ];
        let mut snake = Snake::from_coordinates(GRID, &coords).expect("layout should be valid");

        assert!(!snake.grow(GRID, Direction::Down));
        assert_eq!(snake.len(), 7);
        assert_consistent(&snake);
    }

    #[test]
    fn reverse_swaps_head_and_tail() {
        let mut snake = horizontal(&[5, 4, 3]);
        let head = snake.head_cell();
        let tail = snake.tail_cell();

        let heading = snake.reverse(Direction::Right);

        assert_eq!(snake.head_cell(), tail);
        assert_eq!(snake.tail_cell(), head);
        assert_eq!(heading, Direction::Left);
        assert_eq!(cells(&snake), vec![33, 34, 35]);
        assert_consistent(&snake);
    }

    #[test]
    fn reverse_follows_the_tail_around_a_corner() {
        let coords = [
            Coordinate::new(3, 4),
            Coordinate::new(3, 3),
            Coordinate::new(4, 3),
        ];
        let mut snake = Snake::from_coordinates(GRID, &coords).expect("layout should be valid");

        let heading = snake.reverse(Direction::Right);

        assert_eq!(heading, Direction::Down);
        assert_eq!(
            snake.advance(GRID, heading),
            Advance::Moved {
                head: Coordinate::new(5, 3)
            }
        );
        assert_eq!(cells(&snake), vec![53, 43, 33]);
        assert_consistent(&snake);
    }

    #[test]
    fn reverse_of_single_cell_turns_around() {
        let mut snake = Snake::new(GRID, CellId(33));

        assert_eq!(snake.reverse(Direction::Up), Direction::Down);
        assert_eq!(cells(&snake), vec![33]);
    }

    #[test]
    fn reversed_snake_keeps_moving_and_recycles_slots() {
        let mut snake = horizontal(&[5, 4, 3]);
        let heading = snake.reverse(Direction::Right);

        for _ in 0..3 {
            assert!(matches!(snake.advance(GRID, heading), Advance::Moved { .. }));
            assert_consistent(&snake);
        }

        assert_eq!(cells(&snake), vec![30, 31, 32]);
        assert!(snake.slots.len() <= 4);
    }

    #[test]
    fn segment_direction_falls_back_at_the_head() {
        let snake = horizontal(&[5, 4]);

        assert_eq!(
            snake.segment_direction(snake.head(), Direction::Up),
            Direction::Up
        );
        assert_eq!(
            snake.segment_direction(snake.tail(), Direction::Up),
            Direction::Right
        );
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        assert_eq!(
            Snake::from_coordinates(GRID, &[]).err(),
            Some(LayoutError::Empty)
        );
        assert_eq!(
            Snake::from_coordinates(GRID, &[Coordinate::new(-1, 0)]).err(),
            Some(LayoutError::OutOfBounds(Coordinate::new(-1, 0)))
        );
        assert_eq!(
            Snake::from_coordinates(GRID, &[Coordinate::new(0, 0), Coordinate::new(0, 2)]).err(),
            Some(LayoutError::Disconnected(Coordinate::new(0, 2)))
        );
        assert_eq!(
            Snake::from_coordinates(
                GRID,
                &[
                    Coordinate::new(0, 0),
                    Coordinate::new(0, 1),
                    Coordinate::new(0, 0)
                ]
            )
            .err(),
            Some(LayoutError::Duplicate(Coordinate::new(0, 0)))
        );
    }
}
