use smallvec::SmallVec;

use std::fmt;

pub const DIRECTION_COUNT: u32 = 4;
const DIRECTION_BITS: u32 = (1 << DIRECTION_COUNT) - 1;

const LEFT_BIT: u32 = 0;
const UP_BIT: u32 = 1;
const RIGHT_BIT: u32 = 2;
const DOWN_BIT: u32 = 3;
const VISITED_BIT: u32 = 30;
const BLOCK_BIT: u32 = 31;

/// One of the four compass moves, held as a single bit in the low nibble of
/// a cell bitfield so that turning is bit rotation and combined masks are
/// bitwise ors.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Direction(u32);

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

impl Direction {
    pub const LEFT: Direction = Direction(1 << LEFT_BIT);
    pub const UP: Direction = Direction(1 << UP_BIT);
    pub const RIGHT: Direction = Direction(1 << RIGHT_BIT);
    pub const DOWN: Direction = Direction(1 << DOWN_BIT);

    /// The raw flag bit, usable directly as a cell flag mask.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Quarter turn clockwise on screen (y grows downward):
    /// LEFT → UP → RIGHT → DOWN → LEFT.
    #[inline]
    pub fn turn_clockwise(self) -> Direction {
        self.rotated(1)
    }

    /// Quarter turn counterclockwise: LEFT → DOWN → RIGHT → UP → LEFT.
    #[inline]
    pub fn turn_counterclockwise(self) -> Direction {
        self.rotated(DIRECTION_COUNT - 1)
    }

    /// The opposite direction.
    #[inline]
    pub fn reverse(self) -> Direction {
        self.rotated(DIRECTION_COUNT / 2)
    }

    /// Rotate the flag bit within the low nibble.
    #[inline]
    fn rotated(self, quarter_turns: u32) -> Direction {
        Direction(((self.0 << quarter_turns) |
                   (self.0 >> (DIRECTION_COUNT - quarter_turns))) & DIRECTION_BITS)
    }

    /// The ordered candidate moves out of a cell that was entered by moving
    /// in `self`: counterclockwise turn, clockwise turn, then straight
    /// ahead in the final slot. The reverse of the entry move is never
    /// offered, so a walk cannot immediately double back on itself. The
    /// straight slot sits last because the caller's keep-going bias consumes
    /// the list from the tail.
    pub fn onward_directions(self) -> DirectionSmallVec {
        [self.turn_counterclockwise(), self.turn_clockwise(), self]
            .iter()
            .cloned()
            .collect::<DirectionSmallVec>()
    }

    /// Decompose into 0/1 indicators `[left, up, right, down]`, the form the
    /// grid wants for computing linear index deltas.
    #[inline]
    pub fn components(self) -> [u32; 4] {
        [(self.0 >> LEFT_BIT) & 1,
         (self.0 >> UP_BIT) & 1,
         (self.0 >> RIGHT_BIT) & 1,
         (self.0 >> DOWN_BIT) & 1]
    }
}

/// A single grid position packed into one machine word: the four directional
/// flags in the low nibble plus the VISITED and BLOCK markers in the top two
/// bits.
///
/// A directional flag is applied to a cell when a carve attempt leaving the
/// cell in that direction failed, so on a visited cell a set flag reads as a
/// wall on that side and a clear flag as an open passage. The bit by itself
/// does not say whether the far side was ever tried; only the neighbour's
/// state settles that.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Cell(u32);

impl Cell {
    /// Set the first time the traversal enters the cell, never cleared.
    pub const VISITED: u32 = 1 << VISITED_BIT;
    /// Set at construction on border padding cells, which the traversal
    /// never enters.
    pub const BLOCK: u32 = 1 << BLOCK_BIT;

    pub fn new() -> Cell {
        Cell(0)
    }

    pub fn with_flags(flags: u32) -> Cell {
        Cell(flags)
    }

    /// Bitwise-or the flags into the cell. Idempotent.
    #[inline]
    pub fn apply(&mut self, flags: u32) {
        self.0 |= flags;
    }

    /// Clear the given flags. Idempotent.
    #[inline]
    pub fn remove(&mut self, flags: u32) {
        self.0 &= !flags;
    }

    /// True iff at least one of the given flags is set. Callers or flag
    /// constants together for compound tests, e.g.
    /// `check_any(Cell::VISITED | Cell::BLOCK)`.
    #[inline]
    pub fn check_any(self, flags: u32) -> bool {
        self.0 & flags != 0
    }

    /// The raw bitfield.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Cell {
    /// Full-width zero-padded bitstring, the form the grid dump prints.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}
