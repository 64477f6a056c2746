//! Conway's Game of Life on a fixed, walled grid, rendered to an RGBA buffer
//! where recently dead cells leave a fading rainbow trail.
//!
//! [`Grid`] holds the cells and steps them. [`render()`] turns a grid into
//! pixels, colouring trails with [`colour()`]. [`Simulation`] ties a grid to its
//! colour clock and pause state for a front end to drive:
//!
//! ```
//! use life_engine::{Settings, Simulation};
//!
//! let settings = Settings { board_width: 16, board_height: 16, random: true, seed: Some(1), ..Settings::default() };
//! let mut simulation = Simulation::from_settings(&settings)?;
//! let mut buffer = simulation.new_buffer();
//! simulation.update();
//! simulation.draw(&mut buffer);
//! assert_eq!(buffer.len(), 16 * 16 * 4);
//! # Ok::<(), life_engine::Error>(())
//! ```

pub mod colour;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod settings;
pub mod simulation;

pub use colour::{Rgb, brightness, colour};
pub use error::{Error, Result};
pub use grid::{Cell, Grid, NEVER_DIED};
pub use patterns::Pattern;
pub use render::{BYTES_PER_PIXEL, Renderer, buffer_len, render};
pub use settings::Settings;
pub use simulation::Simulation;
