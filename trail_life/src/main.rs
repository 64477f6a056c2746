// main.rs - Conway's Game of Life with fading rainbow trails
// Board logic lives in life_engine; this crate is the window around it

use eframe::egui;
use log::error;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::time::{Duration, Instant};

use life_engine::{Error, Pattern, Settings, Simulation};
use rand::SeedableRng;
use rand::rngs::SmallRng;

mod ui;

// Height reserved above the board for the control bar
const CONTROLS_HEIGHT: f32 = 40.0;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let settings = parse_args(std::env::args().skip(1)).unwrap_or_else(|err| fail(err));
    let app = TrailLife::new(&settings).unwrap_or_else(|err| fail(err));

    let [width, height] = settings.window_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height + CONTROLS_HEIGHT])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
}

fn fail(err: Error) -> ! {
    error!("{err}");
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        error!("  caused by: {cause}");
        source = cause.source();
    }
    process::exit(1);
}

/// Board, pixels and frame pacing for one window.
pub struct TrailLife {
    pub simulation: Simulation,
    pub pixels: Vec<u8>,
    pub texture: Option<egui::TextureHandle>,
    pub scale: f32,
    pub last_update: Instant,
    pub tick_interval: Duration,
    pub patterns: Vec<Pattern>,
    pub selected_pattern: usize,
    rng: SmallRng,
}

impl TrailLife {
    pub fn new(settings: &Settings) -> life_engine::Result<Self> {
        let simulation = Simulation::from_settings(settings)?;
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Ok(Self {
            pixels: simulation.new_buffer(),
            simulation,
            texture: None,
            scale: settings.scale as f32,
            last_update: Instant::now(),
            tick_interval: settings.tick_interval(),
            patterns: Pattern::builtin(),
            selected_pattern: 0,
            rng,
        })
    }

    /// Runs every generation that is due, at most `MAX_TICKS_PER_FRAME` of them.
    pub fn advance(&mut self) {
        const MAX_TICKS_PER_FRAME: u32 = 8;

        if self.simulation.is_paused() {
            return;
        }
        let mut ticks = 0;
        while self.last_update.elapsed() >= self.tick_interval {
            if ticks == MAX_TICKS_PER_FRAME {
                // Fell behind; drop the backlog instead of spiralling
                self.last_update = Instant::now();
                break;
            }
            self.simulation.update();
            self.last_update += self.tick_interval;
            ticks += 1;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.simulation.toggle_pause();
        self.last_update = Instant::now();
    }

    pub fn clear(&mut self) {
        self.simulation.set_paused(true);
        self.simulation.clear();
    }

    pub fn randomise(&mut self) {
        self.simulation.set_paused(true);
        self.simulation.randomise(&mut self.rng);
    }

    pub fn apply_selected_pattern(&mut self) {
        let Some(pattern) = self.patterns.get(self.selected_pattern) else {
            return;
        };
        self.simulation.set_paused(true);
        if let Err(err) = self.simulation.load_pattern(pattern) {
            log::warn!("{err}");
        }
    }
}

// -----------------------------
// CLI parsing
// -----------------------------

/// Settings from `--settings FILE` (if given), overridden by the other flags.
/// `args` excludes the program name.
fn parse_args(args: impl IntoIterator<Item = String>) -> life_engine::Result<Settings> {
    let args: Vec<String> = args.into_iter().collect();

    let mut settings = match args.iter().position(|arg| arg == "--settings") {
        Some(i) => {
            let path = args.get(i + 1).ok_or_else(|| missing_value("--settings"))?;
            Settings::load(Path::new(path))?
        }
        None => Settings::default(),
    };

    let mut args = args.iter();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--settings" => {
                args.next();
            }
            "--pattern" => {
                let path = args.next().ok_or_else(|| missing_value("--pattern"))?;
                settings.pattern_path = Some(PathBuf::from(path));
            }
            "--random" => settings.random = true,
            "--paused" => settings.start_paused = Some(true),
            "--running" => settings.start_paused = Some(false),
            "--seed" => settings.seed = Some(number(&mut args, "--seed")?),
            "--width" => settings.board_width = number(&mut args, "--width")?,
            "--height" => settings.board_height = number(&mut args, "--height")?,
            "--scale" => settings.scale = number(&mut args, "--scale")?,
            "--wall" => settings.wall_thickness = number(&mut args, "--wall")?,
            "--trail" => settings.trail_length = number(&mut args, "--trail")?,
            "--period" => settings.colour_period = number(&mut args, "--period")?,
            "--speed" => settings.speed = number(&mut args, "--speed")?,
            other => {
                return Err(Error::InvalidSetting {
                    name: "arguments",
                    reason: format!("unknown flag `{other}`"),
                });
            }
        }
    }

    settings.validate()?;
    Ok(settings)
}

fn number<'a, T>(args: &mut impl Iterator<Item = &'a String>, flag: &'static str) -> life_engine::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = args.next().ok_or_else(|| missing_value(flag))?;
    value.parse().map_err(|err| Error::InvalidSetting {
        name: flag,
        reason: format!("`{value}`: {err}"),
    })
}

fn missing_value(flag: &'static str) -> Error {
    Error::InvalidSetting {
        name: flag,
        reason: "expects a value".into(),
    }
}
