// render.rs - Grid to RGBA pixel buffer

use crate::colour::colour;
use crate::error::{Error, Result};
use crate::grid::Grid;

pub const BYTES_PER_PIXEL: usize = 4;

const LIVE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const EMPTY: [u8; 4] = [0, 0, 0, 0];

/// Bytes needed to render the interior of `grid`.
pub fn buffer_len(grid: &Grid) -> usize {
    grid.interior_len() * BYTES_PER_PIXEL
}

/// Fills `buffer` with one interleaved RGBA pixel per interior cell, row-major.
/// Boundary cells produce no pixel. Only the first [`buffer_len`] bytes are written.
///
/// Live cells are opaque white. Cells that died fewer than `trail_length` ticks
/// ago take the rainbow colour of the tick they died on, with alpha 0. Anything
/// else is transparent black.
///
/// Panics if `buffer` is shorter than [`buffer_len`].
pub fn render(buffer: &mut [u8], grid: &Grid, time: i64, period: u32, trail_length: u32) {
    let needed = buffer_len(grid);
    assert!(
        buffer.len() >= needed,
        "pixel buffer holds {} bytes but the grid needs {needed}",
        buffer.len()
    );

    let visible = grid.cells().iter().filter(|cell| !cell.is_boundary());
    for (pixel, cell) in buffer[..needed].chunks_exact_mut(BYTES_PER_PIXEL).zip(visible) {
        let age = cell.ticks_since_death;
        let rgba = if cell.alive {
            LIVE
        } else if age != 0 && age < trail_length {
            let [r, g, b] = colour(time - i64::from(age), period, age, trail_length);
            [r, g, b, 0]
        } else {
            EMPTY
        };
        pixel.copy_from_slice(&rgba);
    }
}

/// Frame clock and colour settings for drawing a [`Grid`].
#[derive(Debug, Clone)]
pub struct Renderer {
    time: u64,                 // Simulated ticks, not frames
    colour_period: u32,
    trail_length: u32,
}

impl Renderer {
    pub fn new(colour_period: u32, trail_length: u32) -> Result<Self> {
        if colour_period == 0 {
            return Err(Error::InvalidSetting {
                name: "colour_period",
                reason: "must be at least 1".into(),
            });
        }
        if trail_length == 0 {
            return Err(Error::InvalidSetting {
                name: "trail_length",
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            time: 0,
            colour_period,
            trail_length,
        })
    }

    /// Advances the colour clock. Call once per simulated generation.
    pub fn tick(&mut self) {
        self.time += 1;
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn colour_period(&self) -> u32 {
        self.colour_period
    }

    pub fn trail_length(&self) -> u32 {
        self.trail_length
    }

    /// Same argument order as the free [`render`] function.
    pub fn render(&self, buffer: &mut [u8], grid: &Grid) {
        let time = i64::try_from(self.time).unwrap_or(i64::MAX);
        render(buffer, grid, time, self.colour_period, self.trail_length);
    }

    /// A zeroed buffer sized for `grid`.
    pub fn new_buffer(&self, grid: &Grid) -> Vec<u8> {
        vec![0; buffer_len(grid)]
    }
}
