#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Cave maps grown from random noise with a birth/death neighbor-count automaton.
//!
//! Each cell of the grid starts alive with probability `birth_chance`; every
//! [`CaveGenerator::step`] then applies [`CaveRules`] to all cells at once, against the
//! previous generation, over the clipped 8-cell Moore neighborhood.

mod error;
mod params;

pub use error::{CaveError, Result};
pub use params::CaveParams;

use cave_grid::{GridCell, Loc, Neighborhood, Random, World, WorldGrid, WorldGridCells};
use log::{debug, info, trace};

const ALIVE_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const DEAD_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];

#[derive(Debug)]
pub struct CaveGenerator {
    grid: WorldGrid<CaveCell>,
    params: CaveParams,
    rules: CaveRules,
    rand: Random,
}

impl CaveGenerator {
    pub fn new(params: CaveParams, rand: Random) -> Result<Self> {
        let mut result = Self::new_empty(params, rand)?;
        result.randomize();
        info!(
            "Created {} x {} cave, birth chance {}, birth limit {}, death limit {}",
            params.width, params.height, params.birth_chance, params.birth_limit, params.death_limit
        );
        Ok(result)
    }

    pub fn with_seed(params: CaveParams, seed: u64) -> Result<Self> {
        Self::new(params, Random::from_seed(seed))
    }

    fn new_empty(params: CaveParams, rand: Random) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            grid: WorldGrid::new(params.grid_size()),
            params,
            rules: CaveRules::new(params.birth_limit, params.death_limit),
            rand,
        })
    }

    /// Replaces every cell with a fresh draw. Successive calls keep drawing from the same
    /// generator, so each reset yields an independent grid.
    pub fn randomize(&mut self) {
        let birth_chance = self.params.birth_chance;
        for cell in self.grid.cells.cells_iter_mut() {
            cell.alive = self.rand.next_bool(birth_chance);
        }
        debug!("Randomized cave: {} cells alive", self.alive_count());
    }

    pub fn step(&mut self) {
        self.grid.update(&self.rules);
        trace!("Stepped cave: {} cells alive", self.alive_count());
    }

    pub fn alive_count(&self) -> usize {
        self.grid.cells_iter().filter(|cell| cell.alive).count()
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn birth_chance(&self) -> f64 {
        self.params.birth_chance
    }

    pub fn birth_limit(&self) -> i32 {
        self.params.birth_limit
    }

    pub fn death_limit(&self) -> i32 {
        self.params.death_limit
    }

    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    pub fn rules(&self) -> CaveRules {
        self.rules
    }

    /// The current generation. Changes only through [`Self::randomize`] and [`Self::step`].
    pub fn cells(&self) -> &WorldGridCells<CaveCell> {
        &self.grid.cells
    }

    /// Panics if `loc` is outside the grid.
    pub fn is_alive(&self, loc: Loc) -> bool {
        self.grid.cells[loc].alive
    }

    /// Panics if `loc` is outside the grid.
    pub fn alive_neighbors(&self, loc: Loc) -> u32 {
        assert!(
            loc.grid_index(self.grid.size()).is_some(),
            "Neighbors of {}, {} out of bounds",
            loc.row,
            loc.col
        );
        CaveCell::num_live_neighbors(&Neighborhood::new(&self.grid.cells, loc))
    }
}

impl World for CaveGenerator {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn num_cells(&self) -> usize {
        self.grid.num_cells()
    }

    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone {
        self.grid.cells_iter()
    }

    fn update(&mut self) {
        self.step();
    }

    fn reset(&mut self) {
        self.randomize();
    }

    fn status_lines(&self) -> Vec<String> {
        vec![
            format!("Size: {} x {}", self.width(), self.height()),
            format!("Alive cells: {}", self.alive_count()),
            format!("Birth chance: {}%", (self.birth_chance() * 100.0) as i32),
            format!("Birth limit: {}", self.birth_limit()),
            format!("Death limit: {}", self.death_limit()),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaveRules {
    pub birth_limit: i32,
    pub death_limit: i32,
}

impl CaveRules {
    pub fn new(birth_limit: i32, death_limit: i32) -> Self {
        Self {
            birth_limit,
            death_limit,
        }
    }

    /// Death needs strictly fewer than `death_limit` neighbors, birth strictly more than
    /// `birth_limit`.
    pub fn next_state(&self, alive: bool, live_neighbors: u32) -> bool {
        let live_neighbors = live_neighbors as i32;
        if alive {
            live_neighbors >= self.death_limit
        } else {
            live_neighbors > self.birth_limit
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaveCell {
    pub alive: bool,
}

impl CaveCell {
    fn num_live_neighbors(neighborhood: &Neighborhood<CaveCell>) -> u32 {
        neighborhood.count_neighbors(|neighbor| neighbor.alive)
    }
}

impl GridCell for CaveCell {
    type Rules = CaveRules;

    fn color_rgba(&self) -> [u8; 4] {
        if self.alive { ALIVE_COLOR } else { DEAD_COLOR }
    }

    fn update(
        &self,
        neighborhood: &Neighborhood<CaveCell>,
        next_cell: &mut CaveCell,
        rules: &CaveRules,
    ) {
        next_cell.alive = rules.next_state(self.alive, Self::num_live_neighbors(neighborhood));
    }
}
