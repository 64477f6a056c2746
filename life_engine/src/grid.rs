// grid.rs - Cell grid and generation stepping for Conway's Game of Life

use log::debug;
use rand::Rng;

use crate::error::{Error, Result};

/// `ticks_since_death` of a cell that has not died recently. Larger than any trail.
pub const NEVER_DIED: u32 = 100;

// Moore neighbourhood, row by row
#[rustfmt::skip]
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    /// Generations since the cell last went from alive to dead. Zero while alive.
    pub ticks_since_death: u32,
    boundary: bool,
}

impl Cell {
    fn new(boundary: bool) -> Self {
        Self {
            alive: false,
            ticks_since_death: NEVER_DIED,
            boundary,
        }
    }

    /// Boundary cells belong to the dead wall around the interior. Fixed at construction.
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }
}

/// The simulation surface: a row-major `width * height` cell array whose outer
/// `wall_thickness` rings are permanently dead.
///
/// A `Grid` is not synchronised. Stepping and editing need `&mut Grid`, so the
/// owner must serialise them; rendering only borrows it.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    neighbours: Vec<u8>,       // Scratch counts, rebuilt every step
    width: usize,
    height: usize,
    wall_thickness: usize,
}

impl Grid {
    /// Creates an all-dead grid. `width` and `height` include the wall.
    pub fn new(width: usize, height: usize, wall_thickness: usize) -> Result<Self> {
        if wall_thickness == 0 {
            return Err(Error::WallTooThin);
        }
        // A wall too thick to double leaves no interior either
        let has_interior = wall_thickness
            .checked_mul(2)
            .is_some_and(|walls| width > walls && height > walls);
        if !has_interior {
            return Err(Error::NoInterior {
                width,
                height,
                wall_thickness,
            });
        }
        // Vec caps allocations at isize::MAX bytes
        let len = width
            .checked_mul(height)
            .filter(|len| {
                len.checked_mul(size_of::<Cell>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(Error::GridTooLarge {
                width,
                height,
                wall_thickness,
            })?;

        let cells = (0..len)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                Cell::new(
                    x < wall_thickness
                        || x >= width - wall_thickness
                        || y < wall_thickness
                        || y >= height - wall_thickness,
                )
            })
            .collect();

        debug!("created {width}x{height} grid with wall thickness {wall_thickness}");
        Ok(Self {
            cells,
            neighbours: vec![0; len],
            width,
            height,
            wall_thickness,
        })
    }

    /// Creates a grid whose interior is `interior_width * interior_height`, padded by the wall.
    pub fn with_interior(
        interior_width: usize,
        interior_height: usize,
        wall_thickness: usize,
    ) -> Result<Self> {
        let too_large = || Error::GridTooLarge {
            width: interior_width,
            height: interior_height,
            wall_thickness,
        };
        let walls = wall_thickness.checked_mul(2).ok_or_else(too_large)?;
        Self::new(
            interior_width.checked_add(walls).ok_or_else(too_large)?,
            interior_height.checked_add(walls).ok_or_else(too_large)?,
            wall_thickness,
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wall_thickness(&self) -> usize {
        self.wall_thickness
    }

    pub fn interior_width(&self) -> usize {
        self.width - 2 * self.wall_thickness
    }

    pub fn interior_height(&self) -> usize {
        self.height - 2 * self.wall_thickness
    }

    /// Number of interior cells, which is the number of rendered pixels.
    pub fn interior_len(&self) -> usize {
        self.interior_width() * self.interior_height()
    }

    /// Panics if `(x, y)` lies outside the grid.
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Panics if `(x, y)` lies outside the grid.
    ///
    /// Setting a boundary cell alive breaks the grid's invariants; prefer [`Grid::set_alive`].
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let index = self.index(x, y);
        &mut self.cells[index]
    }

    /// Sets the life state of an interior cell, leaving `ticks_since_death` untouched.
    /// Returns false, changing nothing, for boundary cells.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> bool {
        let cell = self.get_mut(x, y);
        if cell.boundary {
            return false;
        }
        cell.alive = alive;
        true
    }

    /// All cells in row-major order, boundary included.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.alive)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    pub fn boundary_is_dead(&self) -> bool {
        self.cells.iter().all(|cell| !cell.boundary || !cell.alive)
    }

    /// Kills every cell and forgets all deaths.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.alive = false;
            cell.ticks_since_death = NEVER_DIED;
        }
    }

    /// Brings each interior cell to life with probability one half.
    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in interior_indices(self.width, self.height, self.wall_thickness) {
            self.cells[i].alive = rng.random_bool(0.5);
        }
    }

    /// Advances one generation under B3/S23.
    ///
    /// Neighbour counts for the whole interior are gathered before any cell
    /// changes, so every cell sees the previous generation.
    pub fn step(&mut self) {
        self.neighbours.fill(0);

        let row = self.width as isize;
        let offsets = NEIGHBOURS.map(|(dx, dy)| dx + dy * row);

        for i in interior_indices(self.width, self.height, self.wall_thickness) {
            if self.cells[i].alive {
                for offset in offsets {
                    self.neighbours[i.wrapping_add_signed(offset)] += 1;
                }
            }
        }

        for i in interior_indices(self.width, self.height, self.wall_thickness) {
            let cell = &mut self.cells[i];
            match (self.neighbours[i], cell.alive) {
                (3, _) => {
                    cell.alive = true;               // Birth or survival
                    cell.ticks_since_death = 0;
                }
                (2, true) => {}                      // Survival
                _ => {
                    cell.alive = false;              // Death or stays dead
                    cell.ticks_since_death = cell.ticks_since_death.saturating_add(1);
                }
            }
        }

        debug_assert!(self.boundary_is_dead(), "a boundary cell came alive");
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }
}

/// Linear indices of the interior, row-major.
pub(crate) fn interior_indices(
    width: usize,
    height: usize,
    wall_thickness: usize,
) -> impl Iterator<Item = usize> {
    (wall_thickness..height - wall_thickness).flat_map(move |y| {
        (wall_thickness..width - wall_thickness).map(move |x| y * width + x)
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn outer_ring_is_boundary() {
        let grid = Grid::new(5, 4, 1).unwrap();
        for y in 0..4 {
            for x in 0..5 {
                let edge = x == 0 || x == 4 || y == 0 || y == 3;
                assert_eq!(grid.get(x, y).is_boundary(), edge, "({x}, {y})");
                assert!(!grid.get(x, y).alive);
                assert_eq!(grid.get(x, y).ticks_since_death, NEVER_DIED);
            }
        }
        assert_eq!(grid.interior_len(), 6);
    }

    #[test]
    fn thick_walls_shrink_the_interior() {
        let grid = Grid::with_interior(4, 3, 3).unwrap();
        assert_eq!((grid.width(), grid.height()), (10, 9));
        assert_eq!((grid.interior_width(), grid.interior_height()), (4, 3));
        assert!(grid.get(2, 5).is_boundary());
        assert!(!grid.get(3, 3).is_boundary());
        assert!(!grid.get(6, 5).is_boundary());
        assert!(grid.get(7, 5).is_boundary());
        let interior = grid.cells().iter().filter(|c| !c.is_boundary()).count();
        assert_eq!(interior, 12);
    }

    #[test]
    fn rejects_grids_without_interior() {
        assert!(matches!(
            Grid::new(2, 10, 1),
            Err(Error::NoInterior { width: 2, height: 10, wall_thickness: 1 })
        ));
        assert!(matches!(Grid::new(10, 6, 3), Err(Error::NoInterior { .. })));
        assert!(Grid::new(3, 3, 1).is_ok());
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert!(matches!(
            Grid::new(usize::MAX, usize::MAX, 1),
            Err(Error::GridTooLarge { .. })
        ));
        assert!(matches!(
            Grid::new(usize::MAX / 4, 2, 1),
            Err(Error::GridTooLarge { .. })
        ));
        assert!(matches!(
            Grid::new(10, 10, usize::MAX),
            Err(Error::NoInterior { .. })
        ));
        assert!(matches!(
            Grid::with_interior(usize::MAX, 4, 1),
            Err(Error::GridTooLarge { width: usize::MAX, height: 4, wall_thickness: 1 })
        ));
        assert!(matches!(
            Grid::with_interior(4, 4, usize::MAX / 2 + 1),
            Err(Error::GridTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_missing_wall() {
        assert!(matches!(Grid::new(10, 10, 0), Err(Error::WallTooThin)));
    }

    #[test]
    #[should_panic(expected = "outside the 4x4 grid")]
    fn out_of_bounds_access_panics() {
        let grid = Grid::new(4, 4, 1).unwrap();
        grid.get(4, 0);
    }

    #[test]
    fn set_alive_refuses_boundary_cells() {
        let mut grid = Grid::new(5, 5, 1).unwrap();
        assert!(!grid.set_alive(0, 2, true));
        assert!(!grid.get(0, 2).alive);
        assert!(grid.set_alive(2, 2, true));
        assert!(grid.get(2, 2).alive);
        assert_eq!(grid.get(2, 2).ticks_since_death, NEVER_DIED);
    }

    #[test]
    fn lonely_cell_dies_and_ages() {
        let mut grid = Grid::new(5, 5, 1).unwrap();
        grid.get_mut(2, 2).ticks_since_death = 0;
        grid.set_alive(2, 2, true);

        grid.step();
        assert!(!grid.get(2, 2).alive);
        assert_eq!(grid.get(2, 2).ticks_since_death, 1);

        grid.step();
        grid.step();
        assert_eq!(grid.get(2, 2).ticks_since_death, 3);
        // Never-alive neighbours keep counting up from the sentinel
        assert_eq!(grid.get(1, 1).ticks_since_death, NEVER_DIED + 3);
    }

    #[test]
    fn birth_resets_age() {
        let mut grid = Grid::new(6, 6, 1).unwrap();
        for (x, y) in [(1, 1), (2, 1), (3, 1)] {
            grid.set_alive(x, y, true);
        }
        grid.step();
        let born = grid.get(2, 2);
        assert!(born.alive);
        assert_eq!(born.ticks_since_death, 0);
    }

    #[test]
    fn age_saturates() {
        let mut grid = Grid::new(3, 3, 1).unwrap();
        grid.get_mut(1, 1).ticks_since_death = u32::MAX;
        grid.step();
        assert_eq!(grid.get(1, 1).ticks_since_death, u32::MAX);
    }

    #[test]
    fn clear_restores_sentinel() {
        let mut grid = Grid::new(6, 6, 1).unwrap();
        grid.set_alive(2, 2, true);
        grid.step();
        grid.clear();
        assert_eq!(grid.population(), 0);
        assert!(grid.cells().iter().all(|c| c.ticks_since_death == NEVER_DIED));
    }

    #[test]
    fn randomise_only_touches_interior() {
        let mut grid = Grid::new(20, 20, 2).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        grid.randomise(&mut rng);
        assert!(grid.boundary_is_dead());
        let population = grid.population();
        assert!(population > 0 && population < grid.interior_len());
    }

    #[test]
    fn interior_indices_are_row_major() {
        let indices: Vec<_> = interior_indices(4, 4, 1).collect();
        assert_eq!(indices, vec![5, 6, 9, 10]);
    }
}
