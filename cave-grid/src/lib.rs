#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt::Debug;
use std::mem;
use std::ops::{Index, IndexMut};

/// What a shell needs from a simulation: something to draw and two ways to change it.
pub trait World {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn num_cells(&self) -> usize;
    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone;
    /// Advance one generation.
    fn update(&mut self);
    /// Start over from fresh random content.
    fn reset(&mut self);
    fn status_lines(&self) -> Vec<String> {
        vec![]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn num_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Double-buffered grid. `cells` always holds a complete generation; `next_cells` is
/// scratch space that only `update` writes to.
#[derive(Clone, Debug)]
pub struct WorldGrid<C>
where
    C: GridCell,
{
    size: GridSize,
    pub cells: WorldGridCells<C>,
    next_cells: WorldGridCells<C>,
}

impl<C> WorldGrid<C>
where
    C: Debug + GridCell,
{
    pub fn new(size: GridSize) -> Self {
        assert!(size.width > 0 && size.height > 0);
        Self {
            size,
            cells: WorldGridCells::new(size),
            next_cells: WorldGridCells::new(size),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &C> + Clone {
        self.cells.cells_iter()
    }

    pub fn update(&mut self, rules: &C::Rules) {
        self.next_cells.copy_from(&self.cells);
        self.update_cells(rules);
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    fn update_cells(&mut self, rules: &C::Rules) {
        for row in 0..self.height() {
            for col in 0..self.width() {
                self.update_cell(Loc::new(row, col), rules);
            }
        }
    }

    fn update_cell(&mut self, loc: Loc, rules: &C::Rules) {
        let cell = &self.cells[loc];
        let neighborhood = Neighborhood::new(&self.cells, loc);
        let next_cell = &mut self.next_cells[loc];
        cell.update(&neighborhood, next_cell, rules);
    }
}

/// Row-major cell storage.
#[derive(Clone, Debug)]
pub struct WorldGridCells<C>
where
    C: GridCell,
{
    cells: Vec<C>,
    size: GridSize,
}

impl<C> WorldGridCells<C>
where
    C: GridCell,
{
    pub fn new(size: GridSize) -> Self {
        assert!(size.width != 0 && size.height != 0);
        Self {
            cells: vec![C::default(); size.num_cells()],
            size,
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &C> + Clone {
        self.cells.iter()
    }

    pub fn cells_iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut C> {
        self.cells.iter_mut()
    }

    pub fn cell(&self, loc: Loc) -> Option<&C> {
        loc.grid_index(self.size).map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, loc: Loc) -> Option<&mut C> {
        loc.grid_index(self.size).map(|index| &mut self.cells[index])
    }

    pub fn copy_from(&mut self, source: &Self) {
        self.cells.copy_from_slice(&source.cells);
    }
}

impl<C> Index<Loc> for WorldGridCells<C>
where
    C: GridCell,
{
    type Output = C;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> IndexMut<Loc> for WorldGridCells<C>
where
    C: GridCell,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

pub trait GridCell
where
    Self: Copy + Default,
{
    /// Whatever parameters the transition function needs besides the neighborhood.
    type Rules;

    fn color_rgba(&self) -> [u8; 4];

    /// Writes this cell's next state into `next_cell`, which starts out as a copy of `self`.
    /// `neighborhood` only ever sees the current generation.
    fn update(&self, neighborhood: &Neighborhood<Self>, next_cell: &mut Self, rules: &Self::Rules);
}

/// The Moore neighborhood of one cell, clipped to the grid. Positions past an edge
/// are absent rather than wrapped around.
pub struct Neighborhood<'a, C>
where
    C: GridCell,
{
    cells: &'a WorldGridCells<C>,
    rows: [Option<u32>; 3],
    cols: [Option<u32>; 3],
}

impl<'a, C> Neighborhood<'a, C>
where
    C: GridCell,
{
    pub fn new(cells: &'a WorldGridCells<C>, center: Loc) -> Self {
        let (row_above, row_below) = Self::adjacent_indexes(center.row, cells.height());
        let (col_left, col_right) = Self::adjacent_indexes(center.col, cells.width());
        Self {
            cells,
            rows: [row_above, Some(center.row), row_below],
            cols: [col_left, Some(center.col), col_right],
        }
    }

    /// `row` and `col` are relative, in `0..=2`, with `(1, 1)` the center.
    pub fn cell(&self, row: u32, col: u32) -> Option<&C> {
        let loc = Loc::new(self.rows[row as usize]?, self.cols[col as usize]?);
        self.cells.cell(loc)
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(&C),
    {
        self.for_cell(0, 0, &mut f);
        self.for_cell(0, 1, &mut f);
        self.for_cell(0, 2, &mut f);

        self.for_cell(1, 0, &mut f);
        self.for_cell(1, 2, &mut f);

        self.for_cell(2, 0, &mut f);
        self.for_cell(2, 1, &mut f);
        self.for_cell(2, 2, &mut f);
    }

    pub fn count_neighbors<P>(&self, predicate: P) -> u32
    where
        P: Fn(&C) -> bool,
    {
        let mut result = 0;
        self.for_neighbor_cells(|neighbor| {
            if predicate(neighbor) {
                result += 1;
            }
        });
        result
    }

    pub fn num_neighbor_positions(&self) -> u32 {
        self.count_neighbors(|_| true)
    }

    fn for_cell<F>(&self, row: u32, col: u32, f: &mut F)
    where
        F: FnMut(&C),
    {
        if let Some(cell) = self.cell(row, col) {
            f(cell);
        }
    }

    fn adjacent_indexes(cell_index: u32, max: u32) -> (Option<u32>, Option<u32>) {
        (
            cell_index.checked_sub(1),
            cell_index.checked_add(1).filter(|&next| next < max),
        )
    }
}

/// `col` runs along the width (x), `row` along the height (y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        if self.row < size.height && self.col < size.width {
            Some(self.row as usize * size.width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Panics unless `0.0 <= p <= 1.0`.
    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
