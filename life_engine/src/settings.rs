// settings.rs - Board and display configuration

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ticks per second at a speed of 1.
pub const BASE_TICK_RATE: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visible board size in cells.
    pub board_width: usize,
    pub board_height: usize,
    /// Screen pixels per cell.
    pub scale: usize,
    /// Ticks per radian of the trail colour cycle.
    pub colour_period: u32,
    /// Ticks a dead cell keeps its trail.
    pub trail_length: u32,
    /// Dead rings around the visible board.
    pub wall_thickness: usize,
    /// `None` starts paused only when there is nothing to run.
    pub start_paused: Option<bool>,
    pub random: bool,
    /// Fixed seed for `random`. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub pattern_path: Option<PathBuf>,
    /// Simulation speed multiplier.
    pub speed: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: 300,
            board_height: 300,
            scale: 3,
            colour_period: 30,
            trail_length: 10,
            wall_thickness: 1,
            start_paused: None,
            random: false,
            seed: None,
            pattern_path: None,
            speed: 1.0,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| Error::Settings {
            path: path.to_owned(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("scale", self.scale),
            ("colour_period", self.colour_period as usize),
            ("trail_length", self.trail_length as usize),
            ("wall_thickness", self.wall_thickness),
        ];
        if let Some((name, _)) = positive.into_iter().find(|&(_, value)| value == 0) {
            return Err(Error::InvalidSetting {
                name,
                reason: "must be at least 1".into(),
            });
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(Error::InvalidSetting {
                name: "speed",
                reason: format!("must be a positive number, got {}", self.speed),
            });
        }
        if self.try_tick_interval().is_none() {
            return Err(Error::InvalidSetting {
                name: "speed",
                reason: format!("{} is too slow to schedule", self.speed),
            });
        }
        Ok(())
    }

    /// Without an explicit choice the board opens in editing mode unless a
    /// pattern or random fill gives it something to run.
    pub fn starts_paused(&self) -> bool {
        self.start_paused
            .unwrap_or(self.pattern_path.is_none() && !self.random)
    }

    /// Wall-clock time between generations. Saturates at [`Duration::MAX`]
    /// for speeds [`Settings::validate`] rejects.
    pub fn tick_interval(&self) -> Duration {
        self.try_tick_interval().unwrap_or(Duration::MAX)
    }

    fn try_tick_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(1.0 / (BASE_TICK_RATE * self.speed)).ok()
    }

    /// Window size in screen pixels.
    pub fn window_size(&self) -> [f32; 2] {
        [
            (self.board_width * self.scale) as f32,
            (self.board_height * self.scale) as f32,
        ]
    }
}
