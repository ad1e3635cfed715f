use cells::{Cell, Direction};
use grid::CellGrid;
use units::{Height, KeepChance, Width};

use petgraph::{Graph, Undirected};
use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng, XorShiftRng};
use std::error;
use std::fmt;

/// Arguments that would make a degenerate maze are rejected up front rather
/// than left to produce an all-border grid or a walk that can never finish.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum BuildError {
    /// Width or height of zero: there would be no interior to carve.
    ZeroDimension,
    /// The keep-chance is not a probability in [0, 1] (NaN included).
    KeepChanceOutOfRange,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BuildError::ZeroDimension => write!(f, "maze dimensions must both be at least 1"),
            BuildError::KeepChanceOutOfRange => {
                write!(f, "keep-chance must be a probability within [0, 1]")
            }
        }
    }
}

impl error::Error for BuildError {}

/// Maze generation by randomized recursive backtracking.
///
/// The walk starts at the interior cell next to the entrance and repeatedly
/// tries to step into a neighbour it has not seen, recursing on success and
/// recording a wall flag on the failed side otherwise. Every backtrack
/// happens implicitly by returning up the call stack, so a single run visits
/// every interior cell exactly once and the open sides form a spanning tree
/// over the interior: a perfect maze.
///
/// The `keep_chance` knob biases each step toward continuing in the
/// direction it was already moving, which stretches corridors out; at 0 the
/// next cell is always picked uniformly from the turn candidates, at 1 the
/// walk goes straight until it hits something visited or blocked.
#[derive(Debug, Clone)]
pub struct RecursiveBacktracker {
    grid: CellGrid,
    keep_chance: f64,
    visit_order: Vec<usize>,
    max_depth: usize,
}

impl RecursiveBacktracker {
    /// Fail-fast construction: dimensions must be positive and `keep_chance`
    /// must be inside [0, 1].
    pub fn new(width: Width,
               height: Height,
               keep_chance: KeepChance)
               -> Result<RecursiveBacktracker, BuildError> {
        let Width(w) = width;
        let Height(h) = height;
        let KeepChance(chance) = keep_chance;

        if w == 0 || h == 0 {
            return Err(BuildError::ZeroDimension);
        }
        if !(chance >= 0.0 && chance <= 1.0) {
            return Err(BuildError::KeepChanceOutOfRange);
        }

        let grid = CellGrid::new(width, height);
        let order_capacity = grid.len();
        Ok(RecursiveBacktracker {
            grid: grid,
            keep_chance: chance,
            visit_order: Vec::with_capacity(order_capacity),
            max_depth: 0,
        })
    }

    /// Carve the maze. Call once per instance: the walk keys off the VISITED
    /// flags, so a second run would find every cell taken and only stack up
    /// wall flags.
    ///
    /// The entrance sits on the left side of the start cell at (1, 1), so
    /// the walk begins as though it had stepped in moving RIGHT. With
    /// `open_exits` the two border cells at the entrance and at the
    /// diagonally opposite exit are afterwards replaced by straight
    /// through-corridor cells (UP and DOWN walls only, BLOCK cleared) and
    /// the matching wall flags on their interior neighbours are removed,
    /// whatever the randomized walk left there.
    pub fn generate(&mut self, rng: &mut XorShiftRng, open_exits: bool) {
        let start = self.grid.index_of(1, 1);

        self.grid.cell_mut(start).apply(Direction::LEFT.bits());
        self.carve(start, Direction::RIGHT, 0, rng);

        if open_exits {
            let w = self.grid.width();
            let h = self.grid.height();
            let through = Direction::UP.bits() | Direction::DOWN.bits();

            let entrance = self.grid.index_of(0, 1);
            *self.grid.cell_mut(entrance) = Cell::with_flags(through);
            self.grid.cell_mut(start).remove(Direction::LEFT.bits());
            let before_exit = self.grid.index_of(w, h);
            self.grid.cell_mut(before_exit).remove(Direction::RIGHT.bits());
            let exit = self.grid.index_of(w + 1, h);
            *self.grid.cell_mut(exit) = Cell::with_flags(through);
        }
    }

    /// One step of the depth-first carve. Returns false when the cell at
    /// `index` is unavailable (already visited, or border padding); the
    /// caller then records the failed side on itself.
    fn carve(&mut self,
             index: usize,
             last_move: Direction,
             depth: usize,
             rng: &mut XorShiftRng)
             -> bool {
        // Depth bookkeeping runs before the availability check, so probes
        // into unavailable neighbours still count as depth reached.
        if depth > self.max_depth {
            self.max_depth = depth;
        }

        if self.grid.cell(index).check_any(Cell::VISITED | Cell::BLOCK) {
            return false;
        }

        self.grid.cell_mut(index).apply(Cell::VISITED);

        let mut moves = last_move.onward_directions();
        let mut remaining = moves.len();

        // One uniform draw per visited cell, consumed whether or not the
        // bias fires. Under keep_chance the straight candidate (the final
        // slot) is tried before anything else and drops out of the pool.
        if rng.next_f64() < self.keep_chance {
            let onward = self.grid.offset(index, last_move);
            if !self.carve(onward, last_move, depth + 1, rng) {
                self.grid.cell_mut(index).apply(last_move.bits());
            }
            remaining -= 1;
        }

        while remaining > 0 {
            let choice = rng.gen::<usize>() % remaining;
            remaining -= 1;

            let direction = moves[choice];
            let onward = self.grid.offset(index, direction);
            if !self.carve(onward, direction, depth + 1, rng) {
                self.grid.cell_mut(index).apply(direction.bits());
            }

            // close the gap, keeping the untried candidates in order
            for slot in choice..remaining {
                moves[slot] = moves[slot + 1];
            }
        }

        self.visit_order.push(index);
        true
    }

    /// The grid, for renderers and diagnostics.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Raw bitfield read access for rendering.
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.grid.cell_at(x, y)
    }

    /// The visitation order as linear indices into the padded grid. Cells
    /// are logged as they finish (post-order), so this returns the log
    /// reversed to approximate discovery order: the start cell comes first.
    /// Fresh copy on every call.
    pub fn visit_order(&self) -> Vec<usize> {
        self.visit_order.iter().rev().cloned().collect()
    }

    /// Deepest recursion reached during the walk. A rough proxy for the
    /// longest corridor explored before backtracking, not the maze
    /// diameter.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The carved maze as an undirected graph: one node per interior cell in
    /// row-major order, one edge per open side between two interior cells.
    ///
    /// Only each cell's own RIGHT and DOWN flags are read, toward its right
    /// and down interior neighbours. That covers every interior edge once,
    /// and it is unambiguous despite the wall flags' double duty: a carved
    /// passage leaves both facing flags clear (the child never re-attempts
    /// its entry side, since the reverse direction is not a candidate),
    /// while an uncarved interior edge is attempted and flagged from both
    /// sides eventually.
    pub fn passage_graph(&self) -> Graph<(), (), Undirected> {
        let w = self.grid.width();
        let h = self.grid.height();
        let mut graph = Graph::with_capacity(w * h, 2 * w * h);

        for _ in 0..w * h {
            graph.add_node(());
        }
        let node = |x: usize, y: usize| NodeIndex::new((x - 1) + (y - 1) * w);

        for (x, y) in self.grid.interior_cells() {
            let cell = self.grid.cell_at(x, y);
            if x < w && !cell.check_any(Direction::RIGHT.bits()) {
                graph.add_edge(node(x, y), node(x + 1, y), ());
            }
            if y < h && !cell.check_any(Direction::DOWN.bits()) {
                graph.add_edge(node(x, y), node(x, y + 1), ());
            }
        }
        graph
    }
}

/// An `XorShiftRng` whose four state words derive from one seed value.
/// Xorshift state must not be all zero, so seed 0 is remapped to a fixed
/// nonzero state.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let low = (seed & 0xffff_ffff) as u32;
    let high = (seed >> 32) as u32;
    if low == 0 && high == 0 {
        XorShiftRng::from_seed([0x193a_6754, 0xa8a7_d469, 0x9783_0e05, 0x113b_a7bb])
    } else {
        XorShiftRng::from_seed([low, high, low ^ 0x9e37_79b9, high ^ 0x6c07_8965])
    }
}
