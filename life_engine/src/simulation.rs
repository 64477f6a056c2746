// simulation.rs - A board, its colour clock and the pause state a driver toggles

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::grid::Grid;
use crate::patterns::Pattern;
use crate::render::Renderer;
use crate::settings::Settings;

/// Everything a front end needs to run the game: step while running, edit
/// while paused, draw every frame.
///
/// All access goes through `&mut self` or `&self`; sharing a `Simulation`
/// between threads needs external locking.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    renderer: Renderer,
    paused: bool,
}

impl Simulation {
    /// An empty board sized and coloured by `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            grid: Grid::with_interior(
                settings.board_width,
                settings.board_height,
                settings.wall_thickness,
            )?,
            renderer: Renderer::new(settings.colour_period, settings.trail_length)?,
            paused: settings.starts_paused(),
        })
    }

    /// Like [`Simulation::new`], then seeds the board from the pattern file,
    /// or randomly if `settings.random` is set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut simulation = Self::new(settings)?;
        if let Some(path) = &settings.pattern_path {
            let pattern = Pattern::load(path)?;
            simulation.load_pattern(&pattern)?;
        } else if settings.random {
            let mut rng = match settings.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            simulation.randomise(&mut rng);
        }
        Ok(simulation)
    }

    /// Runs one generation unless paused. Returns whether it did.
    pub fn update(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.grid.step();
        self.renderer.tick();
        true
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            debug!("{} at generation {}", if paused { "paused" } else { "running" }, self.generation());
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Sets a visible cell, `(0, 0)` being the top-left of the drawn area.
    /// Ignored while running and outside the visible area; returns whether the
    /// cell was written.
    pub fn paint(&mut self, x: usize, y: usize, alive: bool) -> bool {
        if !self.paused || x >= self.visible_width() || y >= self.visible_height() {
            return false;
        }
        let wall = self.grid.wall_thickness();
        self.grid.set_alive(x + wall, y + wall, alive)
    }

    /// Renders the board at the current generation. See [`crate::render::render`].
    pub fn draw(&self, buffer: &mut [u8]) {
        self.renderer.render(buffer, &self.grid);
    }

    pub fn new_buffer(&self) -> Vec<u8> {
        self.renderer.new_buffer(&self.grid)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.randomise(rng);
        info!("randomised board, {} cells alive", self.grid.population());
    }

    /// Replaces the board with `pattern`, centred. The board is unchanged if the pattern does not fit.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        pattern.check_fits(&self.grid)?;
        self.grid.clear();
        pattern.place_centered(&mut self.grid)
    }

    /// Generations run so far; also the colour clock.
    pub fn generation(&self) -> u64 {
        self.renderer.time()
    }

    pub fn visible_width(&self) -> usize {
        self.grid.interior_width()
    }

    pub fn visible_height(&self) -> usize {
        self.grid.interior_height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn small() -> Settings {
        Settings {
            board_width: 6,
            board_height: 6,
            ..Settings::default()
        }
    }

    #[test]
    fn paused_board_does_not_step() {
        let mut simulation = Simulation::new(&small()).unwrap();
        assert!(simulation.is_paused());
        assert!(simulation.paint(0, 0, true));
        assert!(!simulation.update());
        assert_eq!(simulation.generation(), 0);
        assert_eq!(simulation.grid().population(), 1);
    }

    #[test]
    fn running_board_steps_and_ticks() {
        let mut simulation = Simulation::new(&small()).unwrap();
        simulation.paint(0, 0, true);
        simulation.toggle_pause();
        assert!(simulation.update());
        assert_eq!(simulation.generation(), 1);
        assert_eq!(simulation.grid().population(), 0);
    }

    #[test]
    fn painting_needs_pause_and_stays_visible() {
        let settings = Settings {
            wall_thickness: 3,
            ..small()
        };
        let mut simulation = Simulation::new(&settings).unwrap();
        assert!(simulation.paint(5, 5, true));
        assert!(simulation.grid().get(8, 8).alive);
        assert!(!simulation.paint(6, 0, true));
        assert!(!simulation.paint(0, 6, true));

        assert!(simulation.paint(5, 5, false));
        assert!(!simulation.grid().get(8, 8).alive);

        simulation.set_paused(false);
        assert!(!simulation.paint(1, 1, true));
        assert_eq!(simulation.grid().population(), 0);
    }

    #[test]
    fn seeded_random_fill_is_reproducible() {
        let settings = Settings {
            board_width: 32,
            board_height: 32,
            random: true,
            seed: Some(42),
            ..Settings::default()
        };
        let first = Simulation::from_settings(&settings).unwrap();
        let second = Simulation::from_settings(&settings).unwrap();
        assert!(!first.is_paused());
        assert!(first.grid().population() > 0);
        assert_eq!(first.grid().live_cells(), second.grid().live_cells());
    }

    #[test]
    fn oversized_pattern_leaves_board_alone() {
        let mut simulation = Simulation::new(&small()).unwrap();
        simulation.paint(2, 2, true);
        let wide = Pattern::parse("wide", "OOOOOOO");
        assert!(matches!(
            simulation.load_pattern(&wide),
            Err(Error::PatternTooLarge { board_width: 6, .. })
        ));
        assert_eq!(simulation.grid().population(), 1);
    }

    #[test]
    fn oversized_pattern_reports_like_direct_placement() {
        let mut simulation = Simulation::new(&small()).unwrap();
        let tall = Pattern::parse("tall", "O\nO\nO\nO\nO\nO\nO");
        let via_simulation = simulation.load_pattern(&tall).unwrap_err().to_string();
        let mut grid = simulation.grid().clone();
        let direct = tall.place_centered(&mut grid).unwrap_err().to_string();
        assert_eq!(via_simulation, direct);
    }

    #[test]
    fn load_pattern_replaces_board() {
        let mut simulation = Simulation::new(&small()).unwrap();
        simulation.paint(0, 0, true);
        simulation.load_pattern(&Pattern::parse("blinker", "OOO")).unwrap();
        assert_eq!(simulation.grid().live_cells(), vec![(3, 4), (4, 4), (5, 4)]);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            colour_period: 0,
            ..small()
        };
        assert!(Simulation::new(&settings).is_err());
    }
}
