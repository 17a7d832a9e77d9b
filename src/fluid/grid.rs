use glam::DVec2;
use std::ops::{Index, IndexMut};

use crate::constants::water;

/// One grid position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Impermeable cell, never carries water and never moves
    pub obstacle: bool,
    /// Water fraction. The conservative model keeps it in [0, 1]
    pub water: f64,
    /// Per-cell velocity, only used by the velocity field
    pub velocity: DVec2,
}

impl Cell {
    /// Dry, open cell
    pub const EMPTY: Cell = Cell {
        obstacle: false,
        water: water::EMPTY,
        velocity: DVec2::ZERO,
    };

    /// Impermeable wall cell
    pub const OBSTACLE: Cell = Cell {
        obstacle: true,
        water: water::EMPTY,
        velocity: DVec2::ZERO,
    };

    /// Open cell holding `water`
    pub fn with_water(water: f64) -> Self {
        Self {
            water,
            ..Self::EMPTY
        }
    }

    /// Open cell that can still accept water
    #[inline]
    pub fn has_room(&self) -> bool {
        !self.obstacle && self.water < water::FULL
    }

    /// Headroom left before the cell saturates
    #[inline]
    pub fn room(&self) -> f64 {
        water::FULL - self.water
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Dense 2D cell store, row 0 at the top, stored row-major
///
/// Flow models step it by cloning a read-only snapshot and mutating the
/// owned grid, so no rule observes a half-updated neighbor unless it reads
/// the evolving buffer on purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FluidGrid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Check a signed coordinate against the grid bounds
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index_of(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index_of(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Signed lookup for neighbor offsets; out of bounds yields `None`
    pub fn get_signed(&self, x: i64, y: i64) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.get(x as usize, y as usize)
        } else {
            None
        }
    }

    /// Overwrite a cell. Panics when out of bounds
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self[(x, y)] = cell;
    }

    /// Iterate `(x, y, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    /// Sum of water over all open cells
    pub fn total_water(&self) -> f64 {
        self.cells
            .iter()
            .filter(|cell| !cell.obstacle)
            .map(|cell| cell.water)
            .sum()
    }
}

impl Index<(usize, usize)> for FluidGrid {
    type Output = Cell;

    fn index(&self, (x, y): (usize, usize)) -> &Cell {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        &self.cells[self.index_of(x, y)]
    }
}

impl IndexMut<(usize, usize)> for FluidGrid {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Cell {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        let idx = self.index_of(x, y);
        &mut self.cells[idx]
    }
}
