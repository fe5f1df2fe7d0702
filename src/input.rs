//! Shot input validation
//!
//! The physics layer trusts what it is given; range checks live here at the
//! input boundary.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Angle below this is too flat to be useful
pub const MIN_PLAYABLE_ANGLE: f64 = 10.0;
/// Angle above this is too steep to be useful
pub const MAX_PLAYABLE_ANGLE: f64 = 170.0;
pub const LOW_VELOCITY_HINT: f64 = 25.0;
pub const HIGH_VELOCITY_HINT: f64 = 80.0;
/// Gorillas closer than this are "close range" for overshoot warnings
pub const CLOSE_RANGE_DISTANCE: f64 = 300.0;

/// A throw: degrees counter-clockwise from the +x axis and launch speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub angle: f64,
    pub velocity: f64,
}

impl Shot {
    pub fn new(angle: f64, velocity: f64) -> Self {
        Self { angle, velocity }
    }
}

/// Accepted shot plus an optional advisory
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedShot {
    pub shot: Shot,
    pub warning: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn validate_angle(&self, angle: f64) -> bool {
        (MIN_ANGLE..=MAX_ANGLE).contains(&angle)
    }

    pub fn validate_velocity(&self, velocity: f64) -> bool {
        (MIN_VELOCITY..=MAX_VELOCITY).contains(&velocity)
    }

    pub fn check_angle(&self, angle: f64) -> GameResult<f64> {
        if self.validate_angle(angle) {
            Ok(angle)
        } else {
            Err(GameError::AngleOutOfRange(angle))
        }
    }

    pub fn check_velocity(&self, velocity: f64) -> GameResult<f64> {
        if self.validate_velocity(velocity) {
            Ok(velocity)
        } else {
            Err(GameError::VelocityOutOfRange(velocity))
        }
    }

    /// Both ranges checked; every failure is reported, angle first
    pub fn validate_shot(&self, angle: f64, velocity: f64) -> Result<Shot, Vec<GameError>> {
        let errors: Vec<GameError> = [
            self.check_angle(angle).err(),
            self.check_velocity(velocity).err(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if errors.is_empty() {
            Ok(Shot::new(angle, velocity))
        } else {
            Err(errors)
        }
    }

    /// Parse the number typed text starts with; anything unparsable becomes 0
    pub fn sanitize_angle(&self, input: &str) -> f64 {
        parse_rounded(input).unwrap_or(0.0)
    }

    /// Parse the number typed text starts with; anything unparsable becomes 1
    pub fn sanitize_velocity(&self, input: &str) -> f64 {
        parse_rounded(input).unwrap_or(1.0)
    }

    pub fn is_playable_angle(&self, angle: f64) -> bool {
        (MIN_PLAYABLE_ANGLE..=MAX_PLAYABLE_ANGLE).contains(&angle)
    }

    /// Comma-separated tips; empty when the shot looks reasonable
    pub fn suggestion(&self, angle: f64, velocity: f64) -> String {
        let mut tips = Vec::new();
        if angle < MIN_PLAYABLE_ANGLE {
            tips.push("Try a higher angle");
        }
        if angle > MAX_PLAYABLE_ANGLE {
            tips.push("Try a lower angle");
        }
        if velocity < LOW_VELOCITY_HINT {
            tips.push("increase velocity");
        }
        if velocity > HIGH_VELOCITY_HINT {
            tips.push("reduce velocity for better control");
        }
        tips.join(", ")
    }

    /// Range check plus an overshoot warning for hard throws at close range
    pub fn validate_for_distance(
        &self,
        angle: f64,
        velocity: f64,
        distance: f64,
    ) -> Result<CheckedShot, Vec<GameError>> {
        let shot = self.validate_shot(angle, velocity)?;
        let warning = (velocity > HIGH_VELOCITY_HINT && distance < CLOSE_RANGE_DISTANCE)
            .then_some("High velocity may overshoot at close range");
        Ok(CheckedShot { shot, warning })
    }
}

/// Halves round up, matching what players see in the prompt
fn parse_rounded(input: &str) -> Option<f64> {
    numeric_prefix(input.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v + 0.5).floor())
}

/// Longest leading decimal literal: `"45deg"` gives `"45"`, `"1e2x"` gives `"1e2"`
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        let rest = bytes.get(start..).unwrap_or_default();
        start + rest.iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            digits += frac_end - end - 1;
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &text[..end]
}
