// colour.rs - Rainbow colour for fading trails

use std::f64::consts::PI;

pub type Rgb = [u8; 3];

// Red, green and blue run a third of a cycle apart
const PHASES: [f64; 3] = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];

/// Amplitude for a trail `age` ticks old: 128 at age 0, falling linearly to 0 at `trail_length`.
pub fn brightness(age: u32, trail_length: u32) -> f64 {
    128.0 - 128.0 * f64::from(age) / f64::from(trail_length)
}

/// Trail colour at `time`. The hue cycles every `2π * period` ticks and the
/// amplitude fades with `age`, see [`brightness`].
///
/// Each channel is `brightness * (1 + sin(time / period + phase))`, clamped to
/// `0..=255` and truncated.
pub fn colour(time: i64, period: u32, age: u32, trail_length: u32) -> Rgb {
    let amplitude = brightness(age, trail_length);
    let angle = time as f64 / f64::from(period);
    PHASES.map(|phase| (amplitude * (1.0 + (angle + phase).sin())).clamp(0.0, 255.0) as u8)
}
