use cells::{Cell, Direction};
use units::{Height, Width};

use itertools::Itertools;
use std::fmt;

/// The maze's cell storage: a `width × height` interior wrapped in a one
/// cell thick border of permanently blocked padding, stored row major as a
/// flat `Vec` of `(width + 2) * (height + 2)` cells and addressed by
/// `index = x + y * (width + 2)`.
///
/// The padding is what lets neighbour lookups skip bounds checks: stepping
/// one cell in any direction from an interior cell always lands on a real
/// cell, worst case a blocked border one.
#[derive(Debug, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Build the padded grid. Border cells (x of 0 or width+1, y of 0 or
    /// height+1) start as BLOCK, interior cells start with no flags.
    pub fn new(width: Width, height: Height) -> CellGrid {
        let Width(w) = width;
        let Height(h) = height;
        let row_length = w + 2;
        let length = row_length * (h + 2);

        let mut cells = Vec::with_capacity(length);
        for index in 0..length {
            let x = index % row_length;
            let y = index / row_length;
            if x == 0 || x == w + 1 || y == 0 || y == h + 1 {
                cells.push(Cell::with_flags(Cell::BLOCK));
            } else {
                cells.push(Cell::new());
            }
        }

        CellGrid {
            width: w,
            height: h,
            cells: cells,
        }
    }

    /// Interior width, excluding the border columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Interior height, excluding the border rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells per row, border columns included.
    #[inline]
    pub fn row_length(&self) -> usize {
        self.width + 2
    }

    /// Total cell count, border included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Linear index of `(x, y)`; border coordinates are addressable too.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        x + y * self.row_length()
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index_of(x, y)]
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Signed index offset for moving one cell in `dir`, derived from the
    /// direction's 0/1 components.
    #[inline]
    pub fn index_delta(&self, dir: Direction) -> isize {
        let c = dir.components();
        let row_length = self.row_length() as isize;
        -(c[0] as isize) - row_length * (c[1] as isize) + (c[2] as isize) +
        row_length * (c[3] as isize)
    }

    /// The index one step from `index` in `dir`. In range for any interior
    /// `index`; stepping out of a border cell is the caller's bug.
    #[inline]
    pub fn offset(&self, index: usize, dir: Direction) -> usize {
        (index as isize + self.index_delta(dir)) as usize
    }

    /// Iterate the `(x, y)` coordinates of the interior cells, row major.
    pub fn interior_cells(&self) -> InteriorCells {
        InteriorCells {
            width: self.width,
            height: self.height,
            current_cell_number: 0,
        }
    }
}

impl fmt::Display for CellGrid {
    /// Diagnostic dump: one row of cells per line, each cell as a 32 bit
    /// zero padded bitstring, border included.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::new();
        for y in 0..self.height + 2 {
            let row_start = self.index_of(0, y);
            let row = &self.cells[row_start..row_start + self.row_length()];
            output.push_str(&row.iter().join(" "));
            output.push_str("\n");
        }
        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct InteriorCells {
    width: usize,
    height: usize,
    current_cell_number: usize,
}

impl Iterator for InteriorCells {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.width * self.height {
            let x = 1 + self.current_cell_number % self.width;
            let y = 1 + self.current_cell_number / self.width;
            self.current_cell_number += 1;
            Some((x, y))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.width * self.height - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a CellGrid {
    type Item = (usize, usize);
    type IntoIter = InteriorCells;

    fn into_iter(self) -> Self::IntoIter {
        self.interior_cells()
    }
}
