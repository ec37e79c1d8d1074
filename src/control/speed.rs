//! Smoke-to-fan-speed control law
//!
//! Linear mapping from the smoke reading to fan duty, scaled so that a
//! full-scale reading yields `max_speed`, then clamped to the configured
//! limits.  Every narrowing step is an explicit function so the rounding
//! and saturation rules are visible and testable.

use crate::config::FanConfig;

/// Largest raw reading the sensor driver reports (10-bit).
pub const ADC_MAX: u16 = 1023;

/// Reduce a raw 10-bit reading to the 0–255 scale (integer divide by 4).
/// Out-of-range input saturates at 255.
pub fn scale_reading(raw: u16) -> u8 {
    (raw / 4).min(u16::from(u8::MAX)) as u8
}

/// Fraction of full duty that a full-scale reading maps to.
pub fn speed_ratio(max_speed: u8) -> f32 {
    f32::from(max_speed) / 255.0
}

/// `scaled × ratio`, truncated toward zero and saturated to 0–255.
pub fn proportional_speed(scaled: u8, ratio: f32) -> u8 {
    let speed = f32::from(scaled) * ratio;
    // `as` truncates toward zero and saturates (NaN becomes 0).
    speed as u8
}

/// Apply the floor, then the ceiling.
///
/// The order matters when `min > max`: the ceiling is applied last, so
/// the result is `max`.
pub fn clamp_speed(speed: u8, min: u8, max: u8) -> u8 {
    let mut speed = speed;
    if speed < min {
        speed = min;
    }
    if speed > max {
        speed = max;
    }
    speed
}

/// One evaluation of the control law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedCommand {
    pub sensor: u8,
    pub ratio: f32,
    pub speed: u8,
}

/// Map a raw reading to a clamped fan duty under `config`.
pub fn compute(raw: u16, config: &FanConfig) -> SpeedCommand {
    let ratio = speed_ratio(config.max_speed);
    let sensor = scale_reading(raw);
    let speed = clamp_speed(
        proportional_speed(sensor, ratio),
        config.min_speed,
        config.max_speed,
    );
    SpeedCommand {
        sensor,
        ratio,
        speed,
    }
}
